//! Development-network collaborators.
//!
//! Stand-ins for the external oracle and price feed, deployed wherever no
//! real collaborator is reachable: the test suites and the backend's local
//! mode both run against these.

use std::sync::atomic::{AtomicI64, Ordering};

use sha2::{Digest, Sha256};

use crate::error::MintError;
use crate::events::NftMinted;
use crate::oracle::{PriceFeed, RandomnessOracle, RequestId};
use crate::random_mint::RandomIpfsNft;

/// Randomness coordinator that issues sequential request ids and fulfills
/// on demand with deterministic pseudo-random words.
#[derive(Debug, Default)]
pub struct MockVrfCoordinator {
    next_request_id: RequestId,
}

impl MockVrfCoordinator {
    pub fn new() -> Self {
        Self { next_request_id: 0 }
    }

    /// Expand a request id into `num_words` words:
    /// `word[i] = first 8 bytes of SHA256(request_id_le || i_le)`.
    pub fn random_words(request_id: RequestId, num_words: usize) -> Vec<u64> {
        (0..num_words as u32)
            .map(|i| {
                let mut hasher = Sha256::new();
                hasher.update(request_id.to_le_bytes());
                hasher.update(i.to_le_bytes());
                let hash = hasher.finalize();
                u64::from_le_bytes(hash[..8].try_into().expect("SHA256 output is 32 bytes"))
            })
            .collect()
    }

    /// Deliver the fulfillment for `request_id` to a consumer, the way the
    /// live oracle would: one callback, words derived from the request id.
    pub fn fulfill(
        consumer: &mut RandomIpfsNft<MockVrfCoordinator>,
        request_id: RequestId,
    ) -> Result<NftMinted, MintError> {
        let words = Self::random_words(request_id, 1);
        consumer.fulfill_random_words(request_id, &words)
    }
}

impl RandomnessOracle for MockVrfCoordinator {
    fn request_random_words(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }
}

/// Initial mock reading: 2000 units at 8 decimals.
pub const INITIAL_PRICE: i64 = 200_000_000_000;

/// Settable price feed holding a single fixed-point answer.
#[derive(Debug)]
pub struct MockPriceFeed {
    answer: AtomicI64,
}

impl MockPriceFeed {
    pub fn new(initial_answer: i64) -> Self {
        Self {
            answer: AtomicI64::new(initial_answer),
        }
    }

    /// Update the stored answer; later reads observe the new value.
    pub fn set_answer(&self, answer: i64) {
        self.answer.store(answer, Ordering::Relaxed);
    }
}

impl Default for MockPriceFeed {
    fn default() -> Self {
        Self::new(INITIAL_PRICE)
    }
}

impl PriceFeed for MockPriceFeed {
    fn latest_reading(&self) -> i64 {
        self.answer.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_sequential_from_one() {
        let mut coordinator = MockVrfCoordinator::new();
        assert_eq!(coordinator.request_random_words(), 1);
        assert_eq!(coordinator.request_random_words(), 2);
        assert_eq!(coordinator.request_random_words(), 3);
    }

    #[test]
    fn words_are_deterministic_per_request_id() {
        let a = MockVrfCoordinator::random_words(7, 3);
        let b = MockVrfCoordinator::random_words(7, 3);
        let c = MockVrfCoordinator::random_words(8, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn price_feed_answers_are_settable() {
        let feed = MockPriceFeed::default();
        assert_eq!(feed.latest_reading(), INITIAL_PRICE);
        feed.set_answer(42);
        assert_eq!(feed.latest_reading(), 42);
    }
}
