use std::collections::BTreeSet;

use pinocchio::error::ProgramError;

use crate::{
    constants::BRACKET_COUNT,
    errors::LotteryError,
    events::TicketsClaim,
    instruction_layouts::{ClaimTicketsArgs, TicketClaim},
    ledger::{transfer, TokenLedger},
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::{Amount, Pubkey, RoundId, RoundStatus, TicketId},
    suffix_index::matches_at,
    utils::checked_add_amount,
};

/// Pays every `(ticket, bracket)` entry in one transfer from the pool.
///
/// A ticket may collect each bracket it satisfies once. The whole batch is
/// rejected if any entry fails, including an entry repeated within the batch.
pub fn process<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    round_id: RoundId,
    claims: &[TicketClaim],
) -> Result<Amount, ProgramError> {
    let round = machine.round(round_id)?;
    if round.status != RoundStatus::Claimable {
        return Err(LotteryError::InvalidState.into());
    }
    if claims.is_empty() {
        return Err(LotteryError::EmptyTicketBatch.into());
    }
    if claims.len() > machine.config.max_tickets_per_buy_or_claim as usize {
        return Err(LotteryError::TooManyTickets.into());
    }
    let final_number = round.final_number.ok_or(LotteryError::InvalidState)?;

    let mut seen = BTreeSet::new();
    let mut total: Amount = 0;
    for claim in claims {
        let bracket = usize::from(claim.bracket);
        if bracket >= BRACKET_COUNT {
            return Err(LotteryError::InvalidBracket.into());
        }
        let ticket = round.ticket(claim.ticket_id)?;
        if ticket.owner != *caller {
            return Err(LotteryError::NotTicketOwner.into());
        }
        if !matches_at(ticket.number, final_number, bracket) {
            return Err(LotteryError::BracketNotEligible.into());
        }
        if ticket.is_claimed(bracket) || !seen.insert((claim.ticket_id, claim.bracket)) {
            return Err(LotteryError::AlreadyClaimed.into());
        }
        total = checked_add_amount(total, round.reward_per_bracket[bracket])?;
    }

    let amount_claimed = checked_add_amount(round.amount_claimed, total)?;
    if amount_claimed > round.amount_collected {
        return Err(LotteryError::InsufficientBalance.into());
    }

    let vault = machine.vault;
    transfer(&mut machine.ledger, &vault, caller, total)?;

    let round = machine.round_mut(round_id)?;
    for claim in claims {
        round
            .ticket_mut(claim.ticket_id)?
            .mark_claimed(usize::from(claim.bracket));
    }
    round.amount_claimed = amount_claimed;

    machine.emit(TicketsClaim {
        round_id,
        claimer: *caller,
        amount: total,
        claims: claims
            .iter()
            .map(|claim| (claim.ticket_id, claim.bracket))
            .collect::<Vec<(TicketId, u8)>>(),
    });
    Ok(total)
}

pub fn process_anchor_bytes<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let args =
        ClaimTicketsArgs::parse(ix_data).map_err(|_| ProgramError::InvalidInstructionData)?;
    process(machine, caller, args.round_id, &args.claims).map(|_| ())
}
