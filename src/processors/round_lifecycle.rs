use pinocchio::error::ProgramError;

use crate::{
    anchor_compat::instruction_discriminator,
    handlers,
    ledger::TokenLedger,
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::Pubkey,
};

/// Routes the operator-driven round transitions: start, close and draw.
pub struct RoundLifecycleProcessor<'a, L, R> {
    pub caller_pubkey: Pubkey,
    pub machine: &'a mut LotteryMachine<L, R>,
}

impl<'a, L: TokenLedger, R: RandomnessProvider> RoundLifecycleProcessor<'a, L, R> {
    pub fn process(&mut self, ix_data: &[u8]) -> Result<(), ProgramError> {
        let discriminator = ix_data
            .get(..8)
            .ok_or(ProgramError::InvalidInstructionData)?;

        if discriminator == instruction_discriminator("start_lottery") {
            return handlers::start_lottery::process_anchor_bytes(
                self.machine,
                &self.caller_pubkey,
                ix_data,
            );
        }

        if discriminator == instruction_discriminator("close_lottery") {
            return handlers::close_lottery::process_anchor_bytes(
                self.machine,
                &self.caller_pubkey,
                ix_data,
            );
        }

        if discriminator == instruction_discriminator(handlers::draw_final_number::IX_NAME) {
            return handlers::draw_final_number::process_anchor_bytes(
                self.machine,
                &self.caller_pubkey,
                ix_data,
            );
        }

        Err(ProgramError::InvalidInstructionData)
    }
}
