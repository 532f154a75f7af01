//! NFT minting state machines.
//!
//! Two sibling minting services share one request → finalize pattern:
//!
//! - [`RandomIpfsNft`] — two-phase mint backed by a randomness oracle. A
//!   caller pays a fee and opens a request; the oracle later delivers exactly
//!   one fulfillment carrying the request id and random words, which mints a
//!   dog NFT whose breed is picked by weighted ranges over `word[0] % 100`.
//! - [`DynamicSvgNft`] — single-phase mint. The caller stores a numeric value
//!   at mint time; at *read* time the token's metadata embeds a happy or
//!   frown SVG depending on how the stored value compares against the
//!   current price-feed reading.
//!
//! ## Random mint lifecycle
//!
//! 1. **Request** — `request_nft` validates the fee, forwards one request to
//!    the [`RandomnessOracle`], records `request_id → requester`, and emits
//!    [`MintRequested`].
//! 2. **Wait** — arbitrarily many other operations may interleave; each
//!    pending request is tracked independently.
//! 3. **Fulfill** — the oracle calls back `fulfill_random_words` exactly once
//!    per request id. The mint finalizes all-or-nothing and emits
//!    [`NftMinted`]. A second delivery for the same id fails loudly.
//!
//! Both services assume serialized-transaction semantics: every mutating
//! operation takes `&mut self` and either completes fully or leaves no trace.

pub mod account;
pub mod breed;
pub mod dynamic_mint;
pub mod error;
pub mod events;
pub mod metadata;
pub mod mocks;
pub mod oracle;
pub mod random_mint;

pub use account::AccountId;
pub use breed::{Breed, MAX_CHANCE_VALUE};
pub use dynamic_mint::{mood_for_value, DynamicSvgNft, Mood};
pub use error::MintError;
pub use events::{CreatedNft, MintRequested, NftMinted, RandomMintEvent};
pub use metadata::{Attribute, TokenMetadata, JSON_URI_PREFIX, SVG_URI_PREFIX};
pub use oracle::{PriceFeed, RandomnessOracle, RequestId, PRICE_DECIMALS};
pub use random_mint::{RandomIpfsNft, MINT_FEE};

/// Token identifier. Append-only per service instance: never reused, never
/// decremented.
pub type TokenId = u64;
