//! Per-round winner counting by trailing-digit suffix.
//!
//! Every sold ticket bumps one counter per bracket, keyed by the bracket and
//! the ticket's `(b + 1)`-digit suffix. The winners of any drawn number are
//! then read back with one lookup per bracket, regardless of how many tickets
//! the round sold.

use std::collections::HashMap;

use pinocchio::error::ProgramError;

use crate::{
    constants::{BRACKET_COUNT, SUFFIX_MODULI},
    errors::LotteryError,
};

/// The integer formed by the `bracket + 1` least-significant digits of `number`.
#[inline]
pub const fn suffix(number: u32, bracket: usize) -> u32 {
    number % SUFFIX_MODULI[bracket]
}

#[inline]
pub const fn matches_at(ticket_number: u32, final_number: u32, bracket: usize) -> bool {
    suffix(ticket_number, bracket) == suffix(final_number, bracket)
}

/// Largest bracket at which `ticket_number` matches `final_number`, if any.
///
/// Suffixes nest, so the scan stops at the first mismatch.
pub fn best_matching_bracket(ticket_number: u32, final_number: u32) -> Option<usize> {
    let mut best = None;
    for bracket in 0..BRACKET_COUNT {
        if !matches_at(ticket_number, final_number, bracket) {
            break;
        }
        best = Some(bracket);
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SuffixKey {
    bracket: u8,
    suffix: u32,
}

impl SuffixKey {
    fn of(number: u32, bracket: usize) -> Self {
        Self {
            bracket: bracket as u8,
            suffix: suffix(number, bracket),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuffixIndex {
    counts: HashMap<SuffixKey, u64>,
    inserted: u64,
}

impl SuffixIndex {
    pub fn insert(&mut self, number: u32) -> Result<(), ProgramError> {
        let inserted = self
            .inserted
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?;
        for bracket in 0..BRACKET_COUNT {
            let counter = self.counts.entry(SuffixKey::of(number, bracket)).or_insert(0);
            // Bounded by `inserted`, which was checked above.
            *counter += 1;
        }
        self.inserted = inserted;
        Ok(())
    }

    pub fn winners_at(&self, final_number: u32) -> [u64; BRACKET_COUNT] {
        let mut winners = [0u64; BRACKET_COUNT];
        for (bracket, slot) in winners.iter_mut().enumerate() {
            *slot = self.count(bracket, suffix(final_number, bracket));
        }
        winners
    }

    pub fn count(&self, bracket: usize, suffix: u32) -> u64 {
        self.counts
            .get(&SuffixKey {
                bracket: bracket as u8,
                suffix,
            })
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> u64 {
        self.inserted
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }
}
