use crate::{
    constants::BRACKET_COUNT,
    randomness::RequestId,
    state::{Amount, Pubkey, RoundId, TicketId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryOpen {
    pub round_id: RoundId,
    pub ticket_price: Amount,
    pub reward_breakdown: [u16; BRACKET_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryInjection {
    pub round_id: RoundId,
    pub injector: Pubkey,
    pub amount: Amount,
    pub amount_collected_after: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketsPurchase {
    pub round_id: RoundId,
    pub buyer: Pubkey,
    pub first_ticket_id: TicketId,
    pub ticket_count: u32,
    pub amount_collected_after: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryClose {
    pub round_id: RoundId,
    pub request_id: RequestId,
    pub tickets_sold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryNumberDrawn {
    pub round_id: RoundId,
    pub final_number: u32,
    pub winners_per_bracket: [u64; BRACKET_COUNT],
    pub reward_per_bracket: [Amount; BRACKET_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketsClaim {
    pub round_id: RoundId,
    pub claimer: Pubkey,
    pub amount: Amount,
    pub claims: Vec<(TicketId, u8)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigUpdated {
    pub injector: Pubkey,
    pub max_tickets_per_buy_or_claim: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTransferred {
    pub previous: Pubkey,
    pub operator: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotteryEvent {
    LotteryOpen(LotteryOpen),
    LotteryInjection(LotteryInjection),
    TicketsPurchase(TicketsPurchase),
    LotteryClose(LotteryClose),
    LotteryNumberDrawn(LotteryNumberDrawn),
    TicketsClaim(TicketsClaim),
    ConfigUpdated(ConfigUpdated),
    OperatorTransferred(OperatorTransferred),
}

macro_rules! impl_into_event {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for LotteryEvent {
                fn from(value: $ty) -> Self {
                    LotteryEvent::$ty(value)
                }
            }
        )*
    };
}

impl_into_event!(
    LotteryOpen,
    LotteryInjection,
    TicketsPurchase,
    LotteryClose,
    LotteryNumberDrawn,
    TicketsClaim,
    ConfigUpdated,
    OperatorTransferred,
);
