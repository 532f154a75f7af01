//! Events emitted by the minting services.
//!
//! Each service keeps an ordered per-instance log of everything it emitted;
//! mutating operations also return the event they produced so callers can
//! forward it (the backend feeds `MintRequested` into its fulfiller channel
//! this way).

use serde::Serialize;

use crate::account::AccountId;
use crate::breed::Breed;
use crate::oracle::RequestId;
use crate::TokenId;

/// Emitted when a caller pays the mint fee and a randomness request is
/// opened. No token exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintRequested {
    pub request_id: RequestId,
    pub requester: AccountId,
}

/// Emitted when an oracle fulfillment finalizes a random mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NftMinted {
    pub breed: Breed,
    pub owner: AccountId,
}

/// Emitted when a dynamic SVG token is minted with its caller-supplied value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedNft {
    pub token_id: TokenId,
    pub value: i64,
}

/// Ordered event log entry for the random minting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RandomMintEvent {
    MintRequested(MintRequested),
    NftMinted(NftMinted),
}
