use pinocchio::error::ProgramError;

use crate::{
    errors::LotteryError,
    events::TicketsPurchase,
    instruction_layouts::BuyTicketsArgs,
    ledger::{transfer_from, TokenLedger},
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::{Amount, Pubkey, RoundId, RoundStatus, TicketId},
    utils::{checked_add_amount, checked_mul_amount, validate_ticket_number},
};

/// Sells `numbers` to `caller` as one atomic batch, paid in a single pull.
pub fn process<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    round_id: RoundId,
    numbers: &[u32],
) -> Result<Vec<TicketId>, ProgramError> {
    let round = machine.round(round_id)?;
    if round.status != RoundStatus::Open {
        return Err(LotteryError::InvalidState.into());
    }
    if numbers.is_empty() {
        return Err(LotteryError::EmptyTicketBatch.into());
    }
    if numbers.len() > machine.config.max_tickets_per_buy_or_claim as usize {
        return Err(LotteryError::TooManyTickets.into());
    }
    for number in numbers {
        validate_ticket_number(*number)?;
    }
    let cost = checked_mul_amount(round.ticket_price, numbers.len() as Amount)?;
    let amount_collected = checked_add_amount(round.amount_collected, cost)?;
    let first_ticket_id = round.tickets_sold();

    let vault = machine.vault;
    transfer_from(&mut machine.ledger, caller, &vault, &vault, cost)?;

    let round = machine.round_mut(round_id)?;
    let mut ticket_ids = Vec::with_capacity(numbers.len());
    for number in numbers {
        ticket_ids.push(round.push_ticket(*caller, *number)?);
    }
    round.amount_collected = amount_collected;

    machine.emit(TicketsPurchase {
        round_id,
        buyer: *caller,
        first_ticket_id,
        ticket_count: numbers.len() as u32,
        amount_collected_after: amount_collected,
    });
    Ok(ticket_ids)
}

pub fn process_anchor_bytes<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let args = BuyTicketsArgs::parse(ix_data).map_err(|_| ProgramError::InvalidInstructionData)?;
    process(machine, caller, args.round_id, &args.numbers).map(|_| ())
}
