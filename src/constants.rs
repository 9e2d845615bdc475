pub const BRACKET_COUNT: usize = 6;
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Tickets are 7-digit numbers with the leading digit pinned to 1.
pub const TICKET_DOMAIN_START: u32 = 1_000_000;
pub const TICKET_DOMAIN_SIZE: u32 = 1_000_000;
pub const TICKET_DOMAIN_END: u32 = TICKET_DOMAIN_START + TICKET_DOMAIN_SIZE - 1;

/// `10^(b+1)` for each bracket `b`.
pub const SUFFIX_MODULI: [u32; BRACKET_COUNT] = [10, 100, 1_000, 10_000, 100_000, 1_000_000];

pub const DEFAULT_MAX_TICKETS_PER_BUY_OR_CLAIM: u32 = 100;

pub const SEED_DRAW: &[u8] = b"draw";
