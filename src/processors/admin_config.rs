use pinocchio::error::ProgramError;

use crate::{
    anchor_compat::instruction_discriminator,
    handlers,
    ledger::TokenLedger,
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::Pubkey,
};

pub struct AdminConfigProcessor<'a, L, R> {
    pub operator_pubkey: Pubkey,
    pub machine: &'a mut LotteryMachine<L, R>,
}

impl<'a, L: TokenLedger, R: RandomnessProvider> AdminConfigProcessor<'a, L, R> {
    pub fn process(&mut self, ix_data: &[u8]) -> Result<(), ProgramError> {
        let discriminator = ix_data
            .get(..8)
            .ok_or(ProgramError::InvalidInstructionData)?;

        if discriminator == instruction_discriminator("update_config") {
            return handlers::update_config::process_anchor_bytes(
                self.machine,
                &self.operator_pubkey,
                ix_data,
            );
        }

        if discriminator == instruction_discriminator("transfer_operator") {
            return handlers::transfer_operator::process_anchor_bytes(
                self.machine,
                &self.operator_pubkey,
                ix_data,
            );
        }

        Err(ProgramError::InvalidInstructionData)
    }
}
