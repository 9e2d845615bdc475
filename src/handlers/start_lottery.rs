use pinocchio::error::ProgramError;

use crate::{
    constants::BRACKET_COUNT,
    errors::LotteryError,
    events::LotteryOpen,
    instruction_layouts::StartLotteryArgs,
    ledger::TokenLedger,
    machine::LotteryMachine,
    randomness::RandomnessProvider,
    state::{Amount, Pubkey, Round, RoundId, RoundStatus},
    utils::validate_breakdown,
};

pub fn process<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    reward_breakdown: [u16; BRACKET_COUNT],
    ticket_price: Amount,
) -> Result<RoundId, ProgramError> {
    machine.require_operator(caller)?;
    validate_breakdown(&reward_breakdown)?;
    if ticket_price == 0 {
        return Err(LotteryError::InvalidPrice.into());
    }
    if let Some(latest) = machine.rounds.get(&machine.current_round_id) {
        if latest.status != RoundStatus::Claimable {
            return Err(LotteryError::RoundAlreadyActive.into());
        }
    }

    let round_id = machine
        .current_round_id
        .checked_add(1)
        .ok_or(LotteryError::MathOverflow)?;
    machine
        .rounds
        .insert(round_id, Round::open(round_id, ticket_price, reward_breakdown));
    machine.current_round_id = round_id;

    machine.emit(LotteryOpen {
        round_id,
        ticket_price,
        reward_breakdown,
    });
    Ok(round_id)
}

pub fn process_anchor_bytes<L: TokenLedger, R: RandomnessProvider>(
    machine: &mut LotteryMachine<L, R>,
    caller: &Pubkey,
    ix_data: &[u8],
) -> Result<(), ProgramError> {
    let args = StartLotteryArgs::parse(ix_data).map_err(|_| ProgramError::InvalidInstructionData)?;
    process(machine, caller, args.reward_breakdown, args.ticket_price).map(|_| ())
}
