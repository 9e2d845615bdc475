pub mod buy_tickets;
pub mod claim_tickets;
pub mod close_lottery;
pub mod draw_final_number;
pub mod inject_funds;
pub mod start_lottery;
pub mod transfer_operator;
pub mod update_config;
