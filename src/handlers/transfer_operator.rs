use pinocchio::error::ProgramError;

use crate::{
    errors::LotteryError,
    events::OperatorTransferred,
    instruction_layouts::TransferOperatorArgs,
    ledger::TokenLedger,
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::{Pubkey, PUBKEY_LEN},
};

pub fn process<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    new_operator: Pubkey,
) -> Result<(), ProgramError> {
    machine.require_operator(caller)?;
    if new_operator == [0u8; PUBKEY_LEN] || new_operator == machine.config.operator {
        return Err(LotteryError::InvalidConfig.into());
    }

    let previous = machine.config.operator;
    machine.config.operator = new_operator;

    machine.emit(OperatorTransferred {
        previous,
        operator: new_operator,
    });
    Ok(())
}

pub fn process_anchor_bytes<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let args =
        TransferOperatorArgs::parse(ix_data).map_err(|_| ProgramError::InvalidInstructionData)?;
    process(machine, caller, args.new_operator)
}
