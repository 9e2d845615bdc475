pub mod anchor_compat;
pub mod constants;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod instruction_layouts;
pub mod ledger;
pub mod machine;
pub mod merkle;
pub mod processors;
pub mod randomness;
pub mod state;
pub mod suffix_index;
pub mod utils;

pub use errors::LotteryError;
pub use events::LotteryEvent;
pub use instruction_layouts::{TicketClaim, UpdateConfigArgs};
pub use ledger::{InMemoryLedger, TokenLedger};
pub use machine::{LotteryMachine, UserTicket};
pub use processors::process_instruction;
pub use randomness::{MockVrfCoordinator, RandomnessProvider};
pub use state::{Amount, LotteryConfig, Pubkey, Round, RoundId, RoundStatus, Ticket, TicketId};
