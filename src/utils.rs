use pinocchio::error::ProgramError;

use crate::{
    constants::{BPS_DENOMINATOR, BRACKET_COUNT, TICKET_DOMAIN_END, TICKET_DOMAIN_START},
    errors::LotteryError,
    state::Amount,
};

pub fn checked_add_amount(a: Amount, b: Amount) -> Result<Amount, ProgramError> {
    a.checked_add(b).ok_or_else(|| LotteryError::MathOverflow.into())
}

pub fn checked_mul_amount(a: Amount, b: Amount) -> Result<Amount, ProgramError> {
    a.checked_mul(b).ok_or_else(|| LotteryError::MathOverflow.into())
}

pub fn validate_breakdown(breakdown: &[u16; BRACKET_COUNT]) -> Result<(), ProgramError> {
    let total: u32 = breakdown.iter().map(|weight| u32::from(*weight)).sum();
    if u128::from(total) != BPS_DENOMINATOR {
        return Err(LotteryError::InvalidBreakdown.into());
    }
    Ok(())
}

pub fn validate_ticket_number(number: u32) -> Result<(), ProgramError> {
    if !(TICKET_DOMAIN_START..=TICKET_DOMAIN_END).contains(&number) {
        return Err(LotteryError::NumberOutOfRange.into());
    }
    Ok(())
}

/// Pari-mutuel payout per winning ticket for every bracket.
///
/// `floor(amount_collected * breakdown[b] / 10_000 / winners[b])`, or zero for a
/// bracket nobody hit. The division remainder stays in the pool.
pub fn compute_reward_per_bracket(
    amount_collected: Amount,
    breakdown: &[u16; BRACKET_COUNT],
    winners: &[u64; BRACKET_COUNT],
) -> Result<[Amount; BRACKET_COUNT], ProgramError> {
    let overflow = || ProgramError::from(LotteryError::MathOverflow);
    let mut rewards = [0 as Amount; BRACKET_COUNT];
    for bracket in 0..BRACKET_COUNT {
        if winners[bracket] == 0 {
            continue;
        }
        let bracket_pot = amount_collected
            .checked_mul(Amount::from(breakdown[bracket]))
            .ok_or_else(overflow)?
            .checked_div(BPS_DENOMINATOR)
            .ok_or_else(overflow)?;
        rewards[bracket] = bracket_pot
            .checked_div(Amount::from(winners[bracket]))
            .ok_or_else(overflow)?;
    }
    Ok(rewards)
}
