/// Anchor-compatible instruction discriminators backed by build-time
/// precomputed constants.
///
/// Outside of tests `instruction_discriminator()` is a plain `match` against
/// compile-time constants. `#[cfg(test)]` builds keep a runtime `sha2`
/// fallback so test-only names still resolve.
mod precomputed {
    include!(concat!(env!("OUT_DIR"), "/discriminators.rs"));
}

pub const ANCHOR_DISCRIMINATOR_LEN: usize = 8;

pub use precomputed::*;

#[inline(always)]
pub fn instruction_discriminator(name: &str) -> [u8; ANCHOR_DISCRIMINATOR_LEN] {
    match name {
        "start_lottery"     => precomputed::IX_START_LOTTERY,
        "inject_funds"      => precomputed::IX_INJECT_FUNDS,
        "buy_tickets"       => precomputed::IX_BUY_TICKETS,
        "close_lottery"     => precomputed::IX_CLOSE_LOTTERY,
        "draw_final_number_and_make_lottery_claimable" => {
            precomputed::IX_DRAW_FINAL_NUMBER_AND_MAKE_LOTTERY_CLAIMABLE
        }
        "claim_tickets"     => precomputed::IX_CLAIM_TICKETS,
        "update_config"     => precomputed::IX_UPDATE_CONFIG,
        "transfer_operator" => precomputed::IX_TRANSFER_OPERATOR,
        #[cfg(test)]
        unknown => runtime_discriminator("global", unknown),
        #[cfg(not(test))]
        _ => [0u8; ANCHOR_DISCRIMINATOR_LEN], // no instruction is routed to the zero tag
    }
}

#[cfg(test)]
fn runtime_discriminator(namespace: &str, name: &str) -> [u8; ANCHOR_DISCRIMINATOR_LEN] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; ANCHOR_DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..ANCHOR_DISCRIMINATOR_LEN]);
    out
}
