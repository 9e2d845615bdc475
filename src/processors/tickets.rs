use pinocchio::error::ProgramError;

use crate::{
    anchor_compat::instruction_discriminator,
    handlers,
    ledger::TokenLedger,
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::Pubkey,
};

/// Routes the value-moving instructions: injections, purchases and claims.
pub struct TicketsProcessor<'a, L, R> {
    pub caller_pubkey: Pubkey,
    pub machine: &'a mut LotteryMachine<L, R>,
}

impl<'a, L: TokenLedger, R: RandomnessProvider> TicketsProcessor<'a, L, R> {
    pub fn process(&mut self, ix_data: &[u8]) -> Result<(), ProgramError> {
        let discriminator = ix_data
            .get(..8)
            .ok_or(ProgramError::InvalidInstructionData)?;

        if discriminator == instruction_discriminator("inject_funds") {
            return handlers::inject_funds::process_anchor_bytes(
                self.machine,
                &self.caller_pubkey,
                ix_data,
            );
        }

        if discriminator == instruction_discriminator("buy_tickets") {
            return handlers::buy_tickets::process_anchor_bytes(
                self.machine,
                &self.caller_pubkey,
                ix_data,
            );
        }

        if discriminator == instruction_discriminator("claim_tickets") {
            return handlers::claim_tickets::process_anchor_bytes(
                self.machine,
                &self.caller_pubkey,
                ix_data,
            );
        }

        Err(ProgramError::InvalidInstructionData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handlers::fixtures::{close_with_final, machine, open_round, ALICE, INJECTOR, OPERATOR},
        instruction_layouts::{BuyTicketsArgs, ClaimTicketsArgs, InjectFundsArgs, TicketClaim},
    };

    #[test]
    fn routes_inject_buy_and_claim() {
        let mut machine = machine();
        let round_id = open_round(&mut machine);

        let inject = InjectFundsArgs {
            round_id,
            amount: 10_000,
        }
        .to_ix_data();
        TicketsProcessor {
            caller_pubkey: INJECTOR,
            machine: &mut machine,
        }
        .process(&inject)
        .unwrap();

        let buy = BuyTicketsArgs {
            round_id,
            numbers: vec![1_123_456],
        }
        .to_ix_data();
        TicketsProcessor {
            caller_pubkey: ALICE,
            machine: &mut machine,
        }
        .process(&buy)
        .unwrap();
        assert_eq!(machine.round(round_id).unwrap().tickets_sold(), 1);

        close_with_final(&mut machine, round_id, 1_123_456);
        machine
            .draw_final_number_and_make_lottery_claimable(&OPERATOR, round_id)
            .unwrap();

        let claim = ClaimTicketsArgs {
            round_id,
            claims: vec![TicketClaim {
                ticket_id: 0,
                bracket: 5,
            }],
        }
        .to_ix_data();
        TicketsProcessor {
            caller_pubkey: ALICE,
            machine: &mut machine,
        }
        .process(&claim)
        .unwrap();

        let round = machine.round(round_id).unwrap();
        assert_eq!(round.amount_claimed, round.reward_per_bracket[5]);
    }

    #[test]
    fn malformed_payload_is_invalid_instruction_data() {
        let mut machine = machine();
        let round_id = open_round(&mut machine);
        let mut buy = BuyTicketsArgs {
            round_id,
            numbers: vec![1_123_456],
        }
        .to_ix_data();
        buy.truncate(buy.len() - 1);

        let err = TicketsProcessor {
            caller_pubkey: ALICE,
            machine: &mut machine,
        }
        .process(&buy)
        .unwrap_err();
        assert_eq!(err, ProgramError::InvalidInstructionData);
    }
}
