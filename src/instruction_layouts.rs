use crate::{
    anchor_compat::{instruction_discriminator, ANCHOR_DISCRIMINATOR_LEN},
    constants::BRACKET_COUNT,
    state::{Amount, Pubkey, RoundId, TicketId, PUBKEY_LEN},
};

pub const START_LOTTERY_IX_LEN: usize = 8 + 2 * BRACKET_COUNT + 16;
pub const ROUND_ID_IX_LEN: usize = 8 + 8;
pub const INJECT_FUNDS_IX_LEN: usize = 8 + 8 + 16;
pub const TRANSFER_OPERATOR_IX_LEN: usize = 8 + PUBKEY_LEN;
/// Encoded size of one `(ticket_id, bracket)` claim entry.
pub const TICKET_CLAIM_LEN: usize = 8 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionLayoutError {
    SliceTooShort,
    WrongDiscriminator,
    InvalidOptionTag,
    TrailingBytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartLotteryArgs {
    pub reward_breakdown: [u16; BRACKET_COUNT],
    pub ticket_price: Amount,
}

impl StartLotteryArgs {
    pub fn parse(ix_data: &[u8]) -> Result<Self, InstructionLayoutError> {
        let mut offset = expect_discriminator(ix_data, "start_lottery", START_LOTTERY_IX_LEN)?;
        let mut reward_breakdown = [0u16; BRACKET_COUNT];
        for weight in reward_breakdown.iter_mut() {
            *weight = read_fixed_u16(ix_data, &mut offset)?;
        }
        let ticket_price = read_fixed_u128(ix_data, &mut offset)?;
        expect_consumed(ix_data, offset)?;
        Ok(Self {
            reward_breakdown,
            ticket_price,
        })
    }

    pub fn to_ix_data(&self) -> Vec<u8> {
        let mut ix = Vec::with_capacity(START_LOTTERY_IX_LEN);
        ix.extend_from_slice(&instruction_discriminator("start_lottery"));
        for weight in self.reward_breakdown {
            ix.extend_from_slice(&weight.to_le_bytes());
        }
        ix.extend_from_slice(&self.ticket_price.to_le_bytes());
        ix
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectFundsArgs {
    pub round_id: RoundId,
    pub amount: Amount,
}

impl InjectFundsArgs {
    pub fn parse(ix_data: &[u8]) -> Result<Self, InstructionLayoutError> {
        let mut offset = expect_discriminator(ix_data, "inject_funds", INJECT_FUNDS_IX_LEN)?;
        let round_id = read_fixed_u64(ix_data, &mut offset)?;
        let amount = read_fixed_u128(ix_data, &mut offset)?;
        expect_consumed(ix_data, offset)?;
        Ok(Self { round_id, amount })
    }

    pub fn to_ix_data(&self) -> Vec<u8> {
        let mut ix = Vec::with_capacity(INJECT_FUNDS_IX_LEN);
        ix.extend_from_slice(&instruction_discriminator("inject_funds"));
        ix.extend_from_slice(&self.round_id.to_le_bytes());
        ix.extend_from_slice(&self.amount.to_le_bytes());
        ix
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyTicketsArgs {
    pub round_id: RoundId,
    pub numbers: Vec<u32>,
}

impl BuyTicketsArgs {
    pub fn parse(ix_data: &[u8]) -> Result<Self, InstructionLayoutError> {
        let mut offset = expect_discriminator(ix_data, "buy_tickets", ROUND_ID_IX_LEN + 4)?;
        let round_id = read_fixed_u64(ix_data, &mut offset)?;
        let count = read_fixed_u32(ix_data, &mut offset)? as usize;
        ensure_remaining(ix_data, offset, count, 4)?;
        let mut numbers = Vec::with_capacity(count);
        for _ in 0..count {
            numbers.push(read_fixed_u32(ix_data, &mut offset)?);
        }
        expect_consumed(ix_data, offset)?;
        Ok(Self { round_id, numbers })
    }

    pub fn to_ix_data(&self) -> Vec<u8> {
        let mut ix = Vec::with_capacity(ROUND_ID_IX_LEN + 4 + 4 * self.numbers.len());
        ix.extend_from_slice(&instruction_discriminator("buy_tickets"));
        ix.extend_from_slice(&self.round_id.to_le_bytes());
        ix.extend_from_slice(&(self.numbers.len() as u32).to_le_bytes());
        for number in &self.numbers {
            ix.extend_from_slice(&number.to_le_bytes());
        }
        ix
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketClaim {
    pub ticket_id: TicketId,
    pub bracket: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimTicketsArgs {
    pub round_id: RoundId,
    pub claims: Vec<TicketClaim>,
}

impl ClaimTicketsArgs {
    pub fn parse(ix_data: &[u8]) -> Result<Self, InstructionLayoutError> {
        let mut offset = expect_discriminator(ix_data, "claim_tickets", ROUND_ID_IX_LEN + 4)?;
        let round_id = read_fixed_u64(ix_data, &mut offset)?;
        let count = read_fixed_u32(ix_data, &mut offset)? as usize;
        ensure_remaining(ix_data, offset, count, TICKET_CLAIM_LEN)?;
        let mut claims = Vec::with_capacity(count);
        for _ in 0..count {
            let ticket_id = read_fixed_u64(ix_data, &mut offset)?;
            let bracket = read_fixed_u8(ix_data, &mut offset)?;
            claims.push(TicketClaim { ticket_id, bracket });
        }
        expect_consumed(ix_data, offset)?;
        Ok(Self { round_id, claims })
    }

    pub fn to_ix_data(&self) -> Vec<u8> {
        let mut ix = Vec::with_capacity(ROUND_ID_IX_LEN + 4 + TICKET_CLAIM_LEN * self.claims.len());
        ix.extend_from_slice(&instruction_discriminator("claim_tickets"));
        ix.extend_from_slice(&self.round_id.to_le_bytes());
        ix.extend_from_slice(&(self.claims.len() as u32).to_le_bytes());
        for claim in &self.claims {
            ix.extend_from_slice(&claim.ticket_id.to_le_bytes());
            ix.push(claim.bracket);
        }
        ix
    }
}

/// Partial config update; `None` leaves the field as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateConfigArgs {
    pub injector: Option<Pubkey>,
    pub max_tickets_per_buy_or_claim: Option<u32>,
}

impl UpdateConfigArgs {
    pub fn parse(ix_data: &[u8]) -> Result<Self, InstructionLayoutError> {
        let mut offset = expect_discriminator(ix_data, "update_config", ANCHOR_DISCRIMINATOR_LEN)?;
        let injector = if read_option_tag(ix_data, &mut offset)? == 1 {
            Some(read_fixed_pubkey(ix_data, &mut offset)?)
        } else {
            None
        };
        let max_tickets_per_buy_or_claim = if read_option_tag(ix_data, &mut offset)? == 1 {
            Some(read_fixed_u32(ix_data, &mut offset)?)
        } else {
            None
        };
        expect_consumed(ix_data, offset)?;
        Ok(Self {
            injector,
            max_tickets_per_buy_or_claim,
        })
    }

    pub fn to_ix_data(&self) -> Vec<u8> {
        let mut ix = Vec::with_capacity(ANCHOR_DISCRIMINATOR_LEN + 1 + PUBKEY_LEN + 1 + 4);
        ix.extend_from_slice(&instruction_discriminator("update_config"));
        match self.injector {
            Some(injector) => {
                ix.push(1);
                ix.extend_from_slice(&injector);
            }
            None => ix.push(0),
        }
        match self.max_tickets_per_buy_or_claim {
            Some(cap) => {
                ix.push(1);
                ix.extend_from_slice(&cap.to_le_bytes());
            }
            None => ix.push(0),
        }
        ix
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOperatorArgs {
    pub new_operator: Pubkey,
}

impl TransferOperatorArgs {
    pub fn parse(ix_data: &[u8]) -> Result<Self, InstructionLayoutError> {
        let mut offset =
            expect_discriminator(ix_data, "transfer_operator", TRANSFER_OPERATOR_IX_LEN)?;
        let new_operator = read_fixed_pubkey(ix_data, &mut offset)?;
        expect_consumed(ix_data, offset)?;
        Ok(Self { new_operator })
    }

    pub fn to_ix_data(&self) -> Vec<u8> {
        let mut ix = Vec::with_capacity(TRANSFER_OPERATOR_IX_LEN);
        ix.extend_from_slice(&instruction_discriminator("transfer_operator"));
        ix.extend_from_slice(&self.new_operator);
        ix
    }
}

/// `close_lottery` and `draw_final_number_and_make_lottery_claimable` carry
/// only the round id.
pub fn parse_round_id_ix(ix_data: &[u8], ix_name: &str) -> Result<RoundId, InstructionLayoutError> {
    let mut offset = expect_discriminator(ix_data, ix_name, ROUND_ID_IX_LEN)?;
    let round_id = read_fixed_u64(ix_data, &mut offset)?;
    expect_consumed(ix_data, offset)?;
    Ok(round_id)
}

pub fn round_id_ix_data(ix_name: &str, round_id: RoundId) -> Vec<u8> {
    let mut ix = Vec::with_capacity(ROUND_ID_IX_LEN);
    ix.extend_from_slice(&instruction_discriminator(ix_name));
    ix.extend_from_slice(&round_id.to_le_bytes());
    ix
}

fn expect_discriminator(
    ix_data: &[u8],
    ix_name: &str,
    min_len: usize,
) -> Result<usize, InstructionLayoutError> {
    if ix_data.len() < min_len || ix_data.len() < ANCHOR_DISCRIMINATOR_LEN {
        return Err(InstructionLayoutError::SliceTooShort);
    }
    let expected = instruction_discriminator(ix_name);
    if ix_data[..ANCHOR_DISCRIMINATOR_LEN] != expected {
        return Err(InstructionLayoutError::WrongDiscriminator);
    }
    Ok(ANCHOR_DISCRIMINATOR_LEN)
}

fn expect_consumed(data: &[u8], offset: usize) -> Result<(), InstructionLayoutError> {
    if data.len() != offset {
        return Err(InstructionLayoutError::TrailingBytes);
    }
    Ok(())
}

/// Rejects a length prefix that claims more entries than the buffer holds
/// before anything is allocated for them.
fn ensure_remaining(
    data: &[u8],
    offset: usize,
    count: usize,
    entry_len: usize,
) -> Result<(), InstructionLayoutError> {
    let needed = count
        .checked_mul(entry_len)
        .and_then(|len| len.checked_add(offset))
        .ok_or(InstructionLayoutError::SliceTooShort)?;
    if data.len() < needed {
        return Err(InstructionLayoutError::SliceTooShort);
    }
    Ok(())
}

fn read_option_tag(data: &[u8], offset: &mut usize) -> Result<u8, InstructionLayoutError> {
    let out = read_fixed_u8(data, offset)?;
    if out > 1 {
        return Err(InstructionLayoutError::InvalidOptionTag);
    }
    Ok(out)
}

fn read_fixed_u8(data: &[u8], offset: &mut usize) -> Result<u8, InstructionLayoutError> {
    let out = *data
        .get(*offset)
        .ok_or(InstructionLayoutError::SliceTooShort)?;
    *offset += 1;
    Ok(out)
}

fn read_fixed_pubkey(data: &[u8], offset: &mut usize) -> Result<Pubkey, InstructionLayoutError> {
    read_array::<PUBKEY_LEN>(data, offset)
}

fn read_fixed_u16(data: &[u8], offset: &mut usize) -> Result<u16, InstructionLayoutError> {
    read_array::<2>(data, offset).map(u16::from_le_bytes)
}

fn read_fixed_u32(data: &[u8], offset: &mut usize) -> Result<u32, InstructionLayoutError> {
    read_array::<4>(data, offset).map(u32::from_le_bytes)
}

fn read_fixed_u64(data: &[u8], offset: &mut usize) -> Result<u64, InstructionLayoutError> {
    read_array::<8>(data, offset).map(u64::from_le_bytes)
}

fn read_fixed_u128(data: &[u8], offset: &mut usize) -> Result<u128, InstructionLayoutError> {
    read_array::<16>(data, offset).map(u128::from_le_bytes)
}

fn read_array<const N: usize>(
    data: &[u8],
    offset: &mut usize,
) -> Result<[u8; N], InstructionLayoutError> {
    let end = offset
        .checked_add(N)
        .ok_or(InstructionLayoutError::SliceTooShort)?;
    let mut out = [0u8; N];
    out.copy_from_slice(
        data.get(*offset..end)
            .ok_or(InstructionLayoutError::SliceTooShort)?,
    );
    *offset = end;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_lottery_anchor_bytes() {
        let mut ix = Vec::new();
        ix.extend_from_slice(&instruction_discriminator("start_lottery"));
        for weight in [500u16, 500, 500, 500, 3_000, 5_000] {
            ix.extend_from_slice(&weight.to_le_bytes());
        }
        ix.extend_from_slice(&5_000u128.to_le_bytes());

        let parsed = StartLotteryArgs::parse(&ix).unwrap();
        assert_eq!(parsed.reward_breakdown, [500, 500, 500, 500, 3_000, 5_000]);
        assert_eq!(parsed.ticket_price, 5_000);
        assert_eq!(parsed.to_ix_data(), ix);
    }

    #[test]
    fn parses_inject_funds_anchor_bytes() {
        let mut ix = Vec::new();
        ix.extend_from_slice(&instruction_discriminator("inject_funds"));
        ix.extend_from_slice(&81u64.to_le_bytes());
        ix.extend_from_slice(&(10_000u128 * 10u128.pow(18)).to_le_bytes());

        let parsed = InjectFundsArgs::parse(&ix).unwrap();
        assert_eq!(parsed.round_id, 81);
        assert_eq!(parsed.amount, 10_000u128 * 10u128.pow(18));
    }

    #[test]
    fn parses_buy_tickets_vector() {
        let mut ix = Vec::new();
        ix.extend_from_slice(&instruction_discriminator("buy_tickets"));
        ix.extend_from_slice(&3u64.to_le_bytes());
        ix.extend_from_slice(&2u32.to_le_bytes());
        ix.extend_from_slice(&1_123_456u32.to_le_bytes());
        ix.extend_from_slice(&1_999_999u32.to_le_bytes());

        let parsed = BuyTicketsArgs::parse(&ix).unwrap();
        assert_eq!(parsed.round_id, 3);
        assert_eq!(parsed.numbers, vec![1_123_456, 1_999_999]);
    }

    #[test]
    fn rejects_vector_longer_than_payload() {
        let mut ix = Vec::new();
        ix.extend_from_slice(&instruction_discriminator("buy_tickets"));
        ix.extend_from_slice(&3u64.to_le_bytes());
        ix.extend_from_slice(&u32::MAX.to_le_bytes());
        ix.extend_from_slice(&1_123_456u32.to_le_bytes());

        assert_eq!(
            BuyTicketsArgs::parse(&ix).unwrap_err(),
            InstructionLayoutError::SliceTooShort
        );
    }

    #[test]
    fn parses_claim_tickets_entries() {
        let args = ClaimTicketsArgs {
            round_id: 9,
            claims: vec![
                TicketClaim { ticket_id: 0, bracket: 5 },
                TicketClaim { ticket_id: 4, bracket: 2 },
            ],
        };
        let ix = args.to_ix_data();
        assert_eq!(ix.len(), ROUND_ID_IX_LEN + 4 + 2 * TICKET_CLAIM_LEN);
        assert_eq!(ClaimTicketsArgs::parse(&ix).unwrap(), args);
    }

    #[test]
    fn parses_update_config_options() {
        let mut ix = Vec::new();
        ix.extend_from_slice(&instruction_discriminator("update_config"));
        ix.push(0);
        ix.push(1);
        ix.extend_from_slice(&25u32.to_le_bytes());

        let parsed = UpdateConfigArgs::parse(&ix).unwrap();
        assert_eq!(parsed.injector, None);
        assert_eq!(parsed.max_tickets_per_buy_or_claim, Some(25));

        ix[8] = 2;
        assert_eq!(
            UpdateConfigArgs::parse(&ix).unwrap_err(),
            InstructionLayoutError::InvalidOptionTag
        );
    }

    #[test]
    fn parses_transfer_operator_anchor_bytes() {
        let mut ix = Vec::new();
        ix.extend_from_slice(&instruction_discriminator("transfer_operator"));
        ix.extend_from_slice(&[5u8; 32]);

        let parsed = TransferOperatorArgs::parse(&ix).unwrap();
        assert_eq!(parsed.new_operator, [5u8; 32]);
    }

    #[test]
    fn parses_round_id_ix() {
        let ix = round_id_ix_data("close_lottery", 81);
        assert_eq!(parse_round_id_ix(&ix, "close_lottery").unwrap(), 81);
        assert_eq!(
            parse_round_id_ix(&ix, "draw_final_number_and_make_lottery_claimable").unwrap_err(),
            InstructionLayoutError::WrongDiscriminator
        );
        assert_eq!(
            parse_round_id_ix(&ix[..12], "close_lottery").unwrap_err(),
            InstructionLayoutError::SliceTooShort
        );
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut ix = round_id_ix_data("close_lottery", 81);
        ix.push(0);
        assert_eq!(
            parse_round_id_ix(&ix, "close_lottery").unwrap_err(),
            InstructionLayoutError::TrailingBytes
        );
    }
}
