use pinocchio::error::ProgramError;

use crate::{
    errors::LotteryError,
    events::LotteryNumberDrawn,
    instruction_layouts::parse_round_id_ix,
    ledger::TokenLedger,
    machine::LotteryMachine,
    randomness::{poll_final_number, RandomnessProvider},
    state::{Pubkey, RoundId, RoundStatus},
    utils::compute_reward_per_bracket,
};

pub const IX_NAME: &str = "draw_final_number_and_make_lottery_claimable";

/// Reads the delivered randomness, counts winners per bracket, fixes the
/// payouts and opens claims. Fails with `RandomnessNotReady` while the
/// provider has not answered; nothing changes in that case.
pub fn process<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    round_id: RoundId,
) -> Result<u32, ProgramError> {
    machine.require_operator(caller)?;
    let round = machine.round(round_id)?;
    if round.status != RoundStatus::Closed {
        return Err(LotteryError::InvalidState.into());
    }
    let request_id = round.pending_request.ok_or(LotteryError::InvalidState)?;
    let final_number = poll_final_number(&machine.rng, &request_id)?;

    let winners_per_bracket = round.suffix_index().winners_at(final_number);
    let reward_per_bracket = compute_reward_per_bracket(
        round.amount_collected,
        &round.reward_breakdown,
        &winners_per_bracket,
    )?;

    let round = machine.round_mut(round_id)?;
    round.final_number = Some(final_number);
    round.winners_per_bracket = winners_per_bracket;
    round.reward_per_bracket = reward_per_bracket;
    round.pending_request = None;
    round.status = RoundStatus::Claimable;

    machine.emit(LotteryNumberDrawn {
        round_id,
        final_number,
        winners_per_bracket,
        reward_per_bracket,
    });
    Ok(final_number)
}

pub fn process_anchor_bytes<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let round_id =
        parse_round_id_ix(ix_data, IX_NAME).map_err(|_| ProgramError::InvalidInstructionData)?;
    process(machine, caller, round_id).map(|_| ())
}
