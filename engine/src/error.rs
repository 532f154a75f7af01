//! Error kinds for the minting services.

use thiserror::Error;

use crate::oracle::RequestId;
use crate::TokenId;

/// Failure kinds surfaced by the minting services.
///
/// Every failing operation aborts with no partial mutation; none are retried
/// internally. Variants are matchable so callers and tests can assert on the
/// specific kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    /// The paid amount is below the mint fee. Caller-correctable.
    #[error("paid {paid} base units, mint fee is {required}")]
    InsufficientFee { paid: u64, required: u64 },
    /// A modded rng value fell outside `[0, 100)`. Unreachable when the input
    /// really is a modulus, but checked rather than trusted.
    #[error("modded rng {modded} is outside the chance range")]
    RangeOutOfBounds { modded: u64 },
    /// Query for a token id that was never minted.
    #[error("token {token_id} has not been minted")]
    NonexistentToken { token_id: TokenId },
    /// Privileged operation attempted by a non-owner identity.
    #[error("caller is not the owner")]
    NotOwner,
    /// Fulfillment for a request id with no ledger entry: never issued here,
    /// or already consumed. The callback aborts with no state change.
    #[error("no pending request with id {request_id}")]
    UnknownRequest { request_id: RequestId },
    /// The oracle delivered a fulfillment with no random words.
    #[error("fulfillment for request {request_id} carried no random words")]
    EmptyRandomWords { request_id: RequestId },
}
