use pinocchio::error::ProgramError;

use crate::{
    errors::LotteryError,
    events::LotteryInjection,
    instruction_layouts::InjectFundsArgs,
    ledger::{transfer_from, TokenLedger},
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::{Amount, Pubkey, RoundId, RoundStatus},
    utils::checked_add_amount,
};

pub fn process<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    round_id: RoundId,
    amount: Amount,
) -> Result<(), ProgramError> {
    if !machine.config.can_inject(caller) {
        return Err(LotteryError::Unauthorized.into());
    }
    let round = machine.round(round_id)?;
    if !matches!(round.status, RoundStatus::Open | RoundStatus::Closed) {
        return Err(LotteryError::InvalidState.into());
    }
    let amount_collected = checked_add_amount(round.amount_collected, amount)?;

    let vault = machine.vault;
    transfer_from(&mut machine.ledger, caller, &vault, &vault, amount)?;
    machine.round_mut(round_id)?.amount_collected = amount_collected;

    machine.emit(LotteryInjection {
        round_id,
        injector: *caller,
        amount,
        amount_collected_after: amount_collected,
    });
    Ok(())
}

pub fn process_anchor_bytes<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let args = InjectFundsArgs::parse(ix_data).map_err(|_| ProgramError::InvalidInstructionData)?;
    process(machine, caller, args.round_id, args.amount)
}
