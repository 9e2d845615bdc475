//! Randomness bridge.
//!
//! Closing a round only *requests* randomness; drawing polls for the
//! delivered word and fails with `RandomnessNotReady` until it shows up.
//! The raw word is a little-endian 256-bit integer folded into the ticket
//! domain.

use std::collections::BTreeMap;

use pinocchio::error::ProgramError;
use sha2::{Digest, Sha256};

use crate::{
    constants::{SEED_DRAW, TICKET_DOMAIN_SIZE, TICKET_DOMAIN_START},
    errors::LotteryError,
    state::RoundId,
};

pub type RequestId = [u8; 32];
pub type RandomWord = [u8; 32];

pub trait RandomnessProvider {
    /// Fire-and-forget request; the returned id correlates the later fulfilment.
    fn request_randomness(&mut self, caller_seed: [u8; 32]) -> Result<RequestId, ProgramError>;

    fn try_fulfill(&self, request_id: &RequestId) -> Option<RandomWord>;
}

pub fn draw_caller_seed(round_id: RoundId) -> [u8; 32] {
    let mut caller_seed = [0u8; 32];
    caller_seed[..SEED_DRAW.len()].copy_from_slice(SEED_DRAW);
    caller_seed[24..].copy_from_slice(&round_id.to_le_bytes());
    caller_seed
}

pub fn request_draw<R: RandomnessProvider + ?Sized>(
    provider: &mut R,
    round_id: RoundId,
) -> Result<RequestId, ProgramError> {
    provider.request_randomness(draw_caller_seed(round_id))
}

pub fn poll_final_number<R: RandomnessProvider + ?Sized>(
    provider: &R,
    request_id: &RequestId,
) -> Result<u32, ProgramError> {
    let word = provider
        .try_fulfill(request_id)
        .ok_or(LotteryError::RandomnessNotReady)?;
    Ok(derive_final_number(&word))
}

/// `TICKET_DOMAIN_START + (word mod TICKET_DOMAIN_SIZE)` over the full 256-bit word.
pub fn derive_final_number(word: &RandomWord) -> u32 {
    let modulus = u64::from(TICKET_DOMAIN_SIZE);
    let remainder = word
        .iter()
        .rev()
        .fold(0u64, |acc, byte| (acc * 256 + u64::from(*byte)) % modulus);
    TICKET_DOMAIN_START + remainder as u32
}

pub fn word_from_u128(value: u128) -> RandomWord {
    let mut word = [0u8; 32];
    word[..16].copy_from_slice(&value.to_le_bytes());
    word
}

/// In-process coordinator that mimics an oracle: requests stay pending until
/// a test or operator explicitly fulfils them.
#[derive(Debug, Clone, Default)]
pub struct MockVrfCoordinator {
    nonce: u64,
    requests: BTreeMap<RequestId, Option<RandomWord>>,
    last_request_id: Option<RequestId>,
}

impl MockVrfCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_request_id(&self) -> Option<RequestId> {
        self.last_request_id
    }

    pub fn pending_requests(&self) -> usize {
        self.requests.values().filter(|word| word.is_none()).count()
    }

    pub fn fulfill_random_words(&mut self, request_id: &RequestId) -> Result<RandomWord, ProgramError> {
        let mut hasher = Sha256::new();
        hasher.update(b"vrf-word");
        hasher.update(request_id);
        let mut word = [0u8; 32];
        word.copy_from_slice(&hasher.finalize());
        self.deliver(request_id, word)?;
        Ok(word)
    }

    pub fn fulfill_random_words_with_override(
        &mut self,
        request_id: &RequestId,
        word: RandomWord,
    ) -> Result<(), ProgramError> {
        self.deliver(request_id, word)
    }

    /// Delivers `value` as the low 128 bits of an otherwise zero word.
    pub fn fulfill_random_words_with_value(
        &mut self,
        request_id: &RequestId,
        value: u128,
    ) -> Result<(), ProgramError> {
        self.fulfill_random_words_with_override(request_id, word_from_u128(value))
    }

    fn deliver(&mut self, request_id: &RequestId, word: RandomWord) -> Result<(), ProgramError> {
        let slot = self
            .requests
            .get_mut(request_id)
            .ok_or(LotteryError::UnknownRandomnessRequest)?;
        if slot.is_some() {
            return Err(LotteryError::RandomnessAlreadyFulfilled.into());
        }
        *slot = Some(word);
        Ok(())
    }
}

impl RandomnessProvider for MockVrfCoordinator {
    fn request_randomness(&mut self, caller_seed: [u8; 32]) -> Result<RequestId, ProgramError> {
        self.nonce = self
            .nonce
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?;
        let mut hasher = Sha256::new();
        hasher.update(caller_seed);
        hasher.update(self.nonce.to_le_bytes());
        let mut request_id = [0u8; 32];
        request_id.copy_from_slice(&hasher.finalize());

        self.requests.insert(request_id, None);
        self.last_request_id = Some(request_id);
        Ok(request_id)
    }

    fn try_fulfill(&self, request_id: &RequestId) -> Option<RandomWord> {
        self.requests.get(request_id).copied().flatten()
    }
}
