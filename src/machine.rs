use std::collections::BTreeMap;

use pinocchio::error::ProgramError;

use crate::{
    constants::BRACKET_COUNT,
    errors::LotteryError,
    events::LotteryEvent,
    handlers::{
        buy_tickets, claim_tickets, close_lottery, draw_final_number, inject_funds,
        start_lottery, transfer_operator, update_config,
    },
    instruction_layouts::{TicketClaim, UpdateConfigArgs},
    ledger::TokenLedger,
    randomness::RandomnessProvider,
    state::{Amount, LotteryConfig, Pubkey, Round, RoundId, RoundStatus, TicketId},
    suffix_index::best_matching_bracket,
};

/// Sequential lottery rounds over a token ledger and a randomness provider.
///
/// `vault` is the machine's own ledger account: it is the spender of
/// participants' allowances and holds every round's pool.
pub struct LotteryMachine<L, R> {
    pub(crate) config: LotteryConfig,
    pub(crate) vault: Pubkey,
    pub(crate) rounds: BTreeMap<RoundId, Round>,
    pub(crate) current_round_id: RoundId,
    pub(crate) ledger: L,
    pub(crate) rng: R,
    pub(crate) events: Vec<LotteryEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTicket {
    pub ticket_id: TicketId,
    pub number: u32,
    pub claimed_brackets: u8,
    /// Highest bracket the ticket matches, once the round has a final number.
    pub best_bracket: Option<u8>,
}

impl<L: TokenLedger, R: RandomnessProvider> LotteryMachine<L, R> {
    pub fn new(config: LotteryConfig, vault: Pubkey, ledger: L, rng: R) -> Result<Self, ProgramError> {
        config.validate()?;
        Ok(Self {
            config,
            vault,
            rounds: BTreeMap::new(),
            current_round_id: 0,
            ledger,
            rng,
            events: Vec::new(),
        })
    }

    pub fn start_lottery(
        &mut self,
        caller: &Pubkey,
        reward_breakdown: [u16; BRACKET_COUNT],
        ticket_price: Amount,
    ) -> Result<RoundId, ProgramError> {
        start_lottery::process(self, caller, reward_breakdown, ticket_price)
    }

    pub fn inject_funds(
        &mut self,
        caller: &Pubkey,
        round_id: RoundId,
        amount: Amount,
    ) -> Result<(), ProgramError> {
        inject_funds::process(self, caller, round_id, amount)
    }

    pub fn buy_ticket(
        &mut self,
        caller: &Pubkey,
        round_id: RoundId,
        number: u32,
    ) -> Result<TicketId, ProgramError> {
        let ticket_ids = buy_tickets::process(self, caller, round_id, &[number])?;
        ticket_ids
            .first()
            .copied()
            .ok_or_else(|| LotteryError::EmptyTicketBatch.into())
    }

    pub fn buy_tickets(
        &mut self,
        caller: &Pubkey,
        round_id: RoundId,
        numbers: &[u32],
    ) -> Result<Vec<TicketId>, ProgramError> {
        buy_tickets::process(self, caller, round_id, numbers)
    }

    pub fn close_lottery(&mut self, caller: &Pubkey, round_id: RoundId) -> Result<(), ProgramError> {
        close_lottery::process(self, caller, round_id)
    }

    pub fn draw_final_number_and_make_lottery_claimable(
        &mut self,
        caller: &Pubkey,
        round_id: RoundId,
    ) -> Result<u32, ProgramError> {
        draw_final_number::process(self, caller, round_id)
    }

    pub fn claim_ticket(
        &mut self,
        caller: &Pubkey,
        round_id: RoundId,
        ticket_id: TicketId,
        bracket: u8,
    ) -> Result<Amount, ProgramError> {
        claim_tickets::process(self, caller, round_id, &[TicketClaim { ticket_id, bracket }])
    }

    pub fn claim_tickets(
        &mut self,
        caller: &Pubkey,
        round_id: RoundId,
        claims: &[TicketClaim],
    ) -> Result<Amount, ProgramError> {
        claim_tickets::process(self, caller, round_id, claims)
    }

    pub fn update_config(&mut self, caller: &Pubkey, args: UpdateConfigArgs) -> Result<(), ProgramError> {
        update_config::process(self, caller, args)
    }

    pub fn transfer_operator(&mut self, caller: &Pubkey, new_operator: Pubkey) -> Result<(), ProgramError> {
        transfer_operator::process(self, caller, new_operator)
    }

    pub fn view_user_tickets(&self, round_id: RoundId, owner: &Pubkey) -> Result<Vec<UserTicket>, ProgramError> {
        let round = self.round(round_id)?;
        round
            .ticket_ids_of(owner)
            .iter()
            .map(|ticket_id| {
                let ticket = round.ticket(*ticket_id)?;
                Ok(UserTicket {
                    ticket_id: *ticket_id,
                    number: ticket.number,
                    claimed_brackets: ticket.claimed_brackets,
                    best_bracket: round
                        .final_number
                        .and_then(|final_number| best_matching_bracket(ticket.number, final_number))
                        .map(|bracket| bracket as u8),
                })
            })
            .collect()
    }

    /// What claiming `bracket` for this ticket would pay right now; zero when
    /// the round is not claimable, the ticket misses the bracket, or it was paid.
    pub fn view_rewards_for_ticket(
        &self,
        round_id: RoundId,
        ticket_id: TicketId,
        bracket: u8,
    ) -> Result<Amount, ProgramError> {
        let round = self.round(round_id)?;
        let ticket = round.ticket(ticket_id)?;
        let bracket = usize::from(bracket);
        if bracket >= BRACKET_COUNT {
            return Err(LotteryError::InvalidBracket.into());
        }
        let Some(final_number) = round.final_number else {
            return Ok(0);
        };
        if round.status != RoundStatus::Claimable
            || ticket.is_claimed(bracket)
            || best_matching_bracket(ticket.number, final_number) < Some(bracket)
        {
            return Ok(0);
        }
        Ok(round.reward_per_bracket[bracket])
    }
}

impl<L, R> LotteryMachine<L, R> {
    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    pub fn vault(&self) -> &Pubkey {
        &self.vault
    }

    pub fn current_round_id(&self) -> RoundId {
        self.current_round_id
    }

    pub fn round(&self, round_id: RoundId) -> Result<&Round, ProgramError> {
        self.rounds
            .get(&round_id)
            .ok_or_else(|| LotteryError::RoundNotFound.into())
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn events(&self) -> &[LotteryEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<LotteryEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn round_mut(&mut self, round_id: RoundId) -> Result<&mut Round, ProgramError> {
        self.rounds
            .get_mut(&round_id)
            .ok_or_else(|| LotteryError::RoundNotFound.into())
    }

    pub(crate) fn emit(&mut self, event: impl Into<LotteryEvent>) {
        self.events.push(event.into());
    }

    pub(crate) fn require_operator(&self, caller: &Pubkey) -> Result<(), ProgramError> {
        if !self.config.is_operator(caller) {
            return Err(LotteryError::Unauthorized.into());
        }
        Ok(())
    }
}
