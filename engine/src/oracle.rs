//! Collaborator seams: the randomness oracle and the price feed.

/// Correlation handle issued at request time and echoed back by the oracle's
/// fulfillment, arbitrarily later.
pub type RequestId = u64;

/// Number of implied decimals in a [`PriceFeed`] reading.
pub const PRICE_DECIMALS: u32 = 8;

/// External verifiable-randomness oracle.
///
/// `request_random_words` opens a request and returns its handle; the
/// fulfillment arrives out-of-band through the consumer's callback entry
/// point (`fulfill_random_words`) after an unspecified delay. No timeout or
/// cancellation is modeled: a request either gets fulfilled eventually or
/// stays pending forever. Consumers must validate the delivered words are
/// non-empty before use.
pub trait RandomnessOracle {
    fn request_random_words(&mut self) -> RequestId;
}

/// Live external price feed.
///
/// Returns a signed fixed-point value with [`PRICE_DECIMALS`] implied
/// decimals, read fresh on every call — staleness is the caller's problem.
/// A reading ≤ 0 is a degenerate feed state; consumers must keep functioning
/// and any stricter policy is theirs to enforce.
pub trait PriceFeed {
    fn latest_reading(&self) -> i64;
}
