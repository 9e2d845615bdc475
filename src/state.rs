use std::collections::BTreeMap;

use pinocchio::error::ProgramError;

use crate::{
    constants::{BRACKET_COUNT, DEFAULT_MAX_TICKETS_PER_BUY_OR_CLAIM},
    errors::LotteryError,
    randomness::RequestId,
    suffix_index::SuffixIndex,
};

pub const PUBKEY_LEN: usize = 32;

pub type Pubkey = [u8; PUBKEY_LEN];
pub type Amount = u128;
pub type RoundId = u64;
pub type TicketId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum RoundStatus {
    Pending = 0,
    Open = 1,
    Closed = 2,
    Claimable = 3,
}

impl TryFrom<u8> for RoundStatus {
    type Error = ProgramError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Open),
            2 => Ok(Self::Closed),
            3 => Ok(Self::Claimable),
            _ => Err(ProgramError::InvalidAccountData),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotteryConfig {
    pub operator: Pubkey,
    pub injector: Pubkey,
    pub max_tickets_per_buy_or_claim: u32,
}

impl LotteryConfig {
    pub fn new(operator: Pubkey, injector: Pubkey) -> Self {
        Self {
            operator,
            injector,
            max_tickets_per_buy_or_claim: DEFAULT_MAX_TICKETS_PER_BUY_OR_CLAIM,
        }
    }

    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.max_tickets_per_buy_or_claim == 0 {
            return Err(LotteryError::InvalidConfig.into());
        }
        Ok(())
    }

    pub fn is_operator(&self, caller: &Pubkey) -> bool {
        self.operator == *caller
    }

    pub fn can_inject(&self, caller: &Pubkey) -> bool {
        self.operator == *caller || self.injector == *caller
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub owner: Pubkey,
    pub number: u32,
    /// Bit `b` set once bracket `b` has been paid out.
    pub claimed_brackets: u8,
}

impl Ticket {
    pub fn new(owner: Pubkey, number: u32) -> Self {
        Self {
            owner,
            number,
            claimed_brackets: 0,
        }
    }

    pub fn is_claimed(&self, bracket: usize) -> bool {
        self.claimed_brackets & (1u8 << bracket) != 0
    }

    pub(crate) fn mark_claimed(&mut self, bracket: usize) {
        self.claimed_brackets |= 1u8 << bracket;
    }
}

/// One lottery cycle. Owns its tickets and suffix index for its whole lifetime.
#[derive(Debug, Clone)]
pub struct Round {
    pub id: RoundId,
    pub status: RoundStatus,
    pub ticket_price: Amount,
    pub reward_breakdown: [u16; BRACKET_COUNT],
    /// Historical total of sales and injections; payouts never reduce it.
    pub amount_collected: Amount,
    pub amount_claimed: Amount,
    pub final_number: Option<u32>,
    pub winners_per_bracket: [u64; BRACKET_COUNT],
    pub reward_per_bracket: [Amount; BRACKET_COUNT],
    pub pending_request: Option<RequestId>,
    pub(crate) tickets: Vec<Ticket>,
    pub(crate) tickets_by_owner: BTreeMap<Pubkey, Vec<TicketId>>,
    pub(crate) suffix_index: SuffixIndex,
}

impl Round {
    pub(crate) fn open(
        id: RoundId,
        ticket_price: Amount,
        reward_breakdown: [u16; BRACKET_COUNT],
    ) -> Self {
        Self {
            id,
            status: RoundStatus::Open,
            ticket_price,
            reward_breakdown,
            amount_collected: 0,
            amount_claimed: 0,
            final_number: None,
            winners_per_bracket: [0; BRACKET_COUNT],
            reward_per_bracket: [0; BRACKET_COUNT],
            pending_request: None,
            tickets: Vec::new(),
            tickets_by_owner: BTreeMap::new(),
            suffix_index: SuffixIndex::default(),
        }
    }

    pub fn tickets_sold(&self) -> u64 {
        self.tickets.len() as u64
    }

    pub fn ticket(&self, ticket_id: TicketId) -> Result<&Ticket, ProgramError> {
        usize::try_from(ticket_id)
            .ok()
            .and_then(|index| self.tickets.get(index))
            .ok_or_else(|| LotteryError::TicketNotFound.into())
    }

    pub fn ticket_ids_of(&self, owner: &Pubkey) -> &[TicketId] {
        self.tickets_by_owner
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn suffix_index(&self) -> &SuffixIndex {
        &self.suffix_index
    }

    /// Remaining pool for this round: collected minus already paid out.
    pub fn unclaimed_amount(&self) -> Amount {
        self.amount_collected.saturating_sub(self.amount_claimed)
    }

    pub(crate) fn push_ticket(&mut self, owner: Pubkey, number: u32) -> Result<TicketId, ProgramError> {
        let ticket_id = self.tickets.len() as TicketId;
        self.suffix_index.insert(number)?;
        self.tickets.push(Ticket::new(owner, number));
        self.tickets_by_owner.entry(owner).or_default().push(ticket_id);
        Ok(ticket_id)
    }

    pub(crate) fn ticket_mut(&mut self, ticket_id: TicketId) -> Result<&mut Ticket, ProgramError> {
        usize::try_from(ticket_id)
            .ok()
            .and_then(|index| self.tickets.get_mut(index))
            .ok_or_else(|| LotteryError::TicketNotFound.into())
    }
}
