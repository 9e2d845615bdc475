use pinocchio::error::ProgramError;

use crate::{
    errors::LotteryError,
    events::LotteryClose,
    instruction_layouts::parse_round_id_ix,
    ledger::TokenLedger,
    machine::LotteryMachine,
    randomness::{request_draw, RandomnessProvider},
    state::{Pubkey, RoundId, RoundStatus},
};

/// Ends sales and fires the randomness request; the draw happens later.
pub fn process<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    round_id: RoundId,
) -> Result<(), ProgramError> {
    machine.require_operator(caller)?;
    let round = machine.round(round_id)?;
    if round.status != RoundStatus::Open {
        return Err(LotteryError::InvalidState.into());
    }
    let tickets_sold = round.tickets_sold();

    let request_id = request_draw(&mut machine.rng, round_id)?;

    let round = machine.round_mut(round_id)?;
    round.status = RoundStatus::Closed;
    round.pending_request = Some(request_id);

    machine.emit(LotteryClose {
        round_id,
        request_id,
        tickets_sold,
    });
    Ok(())
}

pub fn process_anchor_bytes<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let round_id = parse_round_id_ix(ix_data, "close_lottery")
        .map_err(|_| ProgramError::InvalidInstructionData)?;
    process(machine, caller, round_id)
}
