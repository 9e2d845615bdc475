use core::fmt;

use pinocchio::error::ProgramError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum LotteryError {
    InvalidBreakdown = 6000,
    InvalidPrice = 6001,
    RoundAlreadyActive = 6002,
    InvalidState = 6003,
    NumberOutOfRange = 6004,
    InsufficientBalance = 6005,
    InsufficientAllowance = 6006,
    RandomnessNotReady = 6007,
    BracketNotEligible = 6008,
    AlreadyClaimed = 6009,
    Unauthorized = 6010,
    RoundNotFound = 6011,
    TicketNotFound = 6012,
    NotTicketOwner = 6013,
    InvalidBracket = 6014,
    EmptyTicketBatch = 6015,
    TooManyTickets = 6016,
    MathOverflow = 6017,
    UnknownRandomnessRequest = 6018,
    RandomnessAlreadyFulfilled = 6019,
    InvalidConfig = 6020,
}

impl LotteryError {
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidBreakdown => "Reward breakdown must sum to 10000 bps",
            Self::InvalidPrice => "Ticket price must be positive",
            Self::RoundAlreadyActive => "Previous round is not claimable yet",
            Self::InvalidState => "Round is not in the required status",
            Self::NumberOutOfRange => "Ticket number is outside the ticket domain",
            Self::InsufficientBalance => "Insufficient ledger balance",
            Self::InsufficientAllowance => "Insufficient ledger allowance",
            Self::RandomnessNotReady => "Randomness has not been delivered yet",
            Self::BracketNotEligible => "Ticket does not match the requested bracket",
            Self::AlreadyClaimed => "Bracket already claimed for this ticket",
            Self::Unauthorized => "Unauthorized",
            Self::RoundNotFound => "Round does not exist",
            Self::TicketNotFound => "Ticket does not exist in this round",
            Self::NotTicketOwner => "Caller does not own the ticket",
            Self::InvalidBracket => "Bracket index out of range",
            Self::EmptyTicketBatch => "No tickets in batch",
            Self::TooManyTickets => "Too many tickets in batch",
            Self::MathOverflow => "Math overflow",
            Self::UnknownRandomnessRequest => "Unknown randomness request",
            Self::RandomnessAlreadyFulfilled => "Randomness request already fulfilled",
            Self::InvalidConfig => "Invalid lottery config",
        }
    }
}

impl fmt::Display for LotteryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), *self as u32)
    }
}

impl From<LotteryError> for ProgramError {
    fn from(value: LotteryError) -> Self {
        ProgramError::Custom(value as u32)
    }
}
