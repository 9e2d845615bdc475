pub mod admin_config;
pub mod round_lifecycle;
pub mod tickets;

use pinocchio::error::ProgramError;

use crate::{
    ledger::TokenLedger, machine::LotteryMachine, randomness::RandomnessProvider, state::Pubkey,
};

pub use admin_config::AdminConfigProcessor;
pub use round_lifecycle::RoundLifecycleProcessor;
pub use tickets::TicketsProcessor;

/// Decodes one Anchor-encoded instruction and applies it on behalf of `caller`.
///
/// Each processor answers `InvalidInstructionData` for discriminators it does
/// not own, which hands the bytes to the next one.
pub fn process_instruction<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let admin = AdminConfigProcessor {
        operator_pubkey: *caller,
        machine: &mut *machine,
    }
    .process(ix_data);
    match admin {
        Ok(()) => Ok(()),
        Err(ProgramError::InvalidInstructionData) => {
            let lifecycle = RoundLifecycleProcessor {
                caller_pubkey: *caller,
                machine: &mut *machine,
            }
            .process(ix_data);
            match lifecycle {
                Ok(()) => Ok(()),
                Err(ProgramError::InvalidInstructionData) => TicketsProcessor {
                    caller_pubkey: *caller,
                    machine,
                }
                .process(ix_data),
                Err(err) => Err(err),
            }
        }
        Err(err) => Err(err),
    }
}
