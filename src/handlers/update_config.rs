use pinocchio::error::ProgramError;

use crate::{
    events::ConfigUpdated,
    instruction_layouts::UpdateConfigArgs,
    ledger::TokenLedger,
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::Pubkey,
};

pub fn process<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    args: UpdateConfigArgs,
) -> Result<(), ProgramError> {
    machine.require_operator(caller)?;

    let mut config = machine.config;
    if let Some(injector) = args.injector {
        config.injector = injector;
    }
    if let Some(cap) = args.max_tickets_per_buy_or_claim {
        config.max_tickets_per_buy_or_claim = cap;
    }
    config.validate()?;
    machine.config = config;

    machine.emit(ConfigUpdated {
        injector: config.injector,
        max_tickets_per_buy_or_claim: config.max_tickets_per_buy_or_claim,
    });
    Ok(())
}

pub fn process_anchor_bytes<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let args =
        UpdateConfigArgs::parse(ix_data).map_err(|_| ProgramError::InvalidInstructionData)?;
    process(machine, caller, args)
}
