//! Single-phase dynamic SVG minting service.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::account::AccountId;
use crate::error::MintError;
use crate::events::CreatedNft;
use crate::metadata::{svg_to_image_uri, Attribute, TokenMetadata};
use crate::oracle::PriceFeed;
use crate::TokenId;

/// Collection name embedded in every descriptor.
const COLLECTION_NAME: &str = "Dynamic SVG NFT";

/// Mood tier of a dynamic token, selected at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Frown,
    Happy,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Frown => f.write_str("frown"),
            Mood::Happy => f.write_str("happy"),
        }
    }
}

/// Pick the mood for a stored value against the current feed reading.
///
/// A value at or above the reading is [`Mood::Happy`]; strictly below is
/// [`Mood::Frown`]. The boundary is inclusive on the happy side.
pub fn mood_for_value(value: i64, reading: i64) -> Mood {
    if value >= reading {
        Mood::Happy
    } else {
        Mood::Frown
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DynamicToken {
    owner: AccountId,
    value: i64,
}

/// Dynamic SVG NFT minting service.
///
/// Minting is one atomic step with no oracle round trip; the price feed is
/// consulted only when a token URI is read. The same token can therefore
/// render different content across reads as the live reading moves — that
/// non-idempotence is the point of the design.
pub struct DynamicSvgNft<P> {
    price_feed: P,
    /// Frown image, inlined as a data URI once at construction.
    low_img_uri: String,
    /// Happy image, inlined as a data URI once at construction.
    high_img_uri: String,
    token_counter: TokenId,
    tokens: HashMap<TokenId, DynamicToken>,
    events: Vec<CreatedNft>,
}

impl<P: PriceFeed> DynamicSvgNft<P> {
    /// Create a service instance from the two raw SVG sources. Both are
    /// encoded immediately and never change afterwards. Token ids start at 1.
    pub fn new(price_feed: P, low_svg: &str, high_svg: &str) -> Self {
        Self {
            price_feed,
            low_img_uri: svg_to_image_uri(low_svg),
            high_img_uri: svg_to_image_uri(high_svg),
            token_counter: 0,
            tokens: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Mint a token carrying `value`. No fee, no asynchronous gap; the value
    /// is stored exactly as supplied and only interpreted at read time.
    pub fn mint_nft(&mut self, caller: AccountId, value: i64) -> CreatedNft {
        self.token_counter += 1;
        let token_id = self.token_counter;
        self.tokens.insert(
            token_id,
            DynamicToken {
                owner: caller,
                value,
            },
        );

        info!(token_id, owner = %caller, value, "dynamic nft created");

        let event = CreatedNft { token_id, value };
        self.events.push(event.clone());
        event
    }

    /// Encoded descriptor for a minted token, built against the *current*
    /// feed reading.
    pub fn token_uri(&self, token_id: TokenId) -> Result<String, MintError> {
        let token = self
            .tokens
            .get(&token_id)
            .ok_or(MintError::NonexistentToken { token_id })?;

        let reading = self.price_feed.latest_reading();
        if reading <= 0 {
            warn!(token_id, reading, "price feed reading is not positive");
        }

        let mood = mood_for_value(token.value, reading);
        let image = match mood {
            Mood::Frown => self.low_img_uri.clone(),
            Mood::Happy => self.high_img_uri.clone(),
        };

        let metadata = TokenMetadata {
            name: format!("{COLLECTION_NAME} #{token_id}"),
            description: "An NFT that changes with a live price feed".into(),
            image,
            attributes: vec![
                Attribute {
                    trait_type: "mood".into(),
                    value: mood.to_string(),
                },
                Attribute {
                    trait_type: "value".into(),
                    value: token.value.to_string(),
                },
            ],
        };
        Ok(metadata.to_token_uri())
    }

    /// Value stored at mint time, exactly as supplied.
    pub fn token_value(&self, token_id: TokenId) -> Result<i64, MintError> {
        self.tokens
            .get(&token_id)
            .map(|token| token.value)
            .ok_or(MintError::NonexistentToken { token_id })
    }

    /// Owner of a minted token.
    pub fn token_owner(&self, token_id: TokenId) -> Result<&AccountId, MintError> {
        self.tokens
            .get(&token_id)
            .map(|token| &token.owner)
            .ok_or(MintError::NonexistentToken { token_id })
    }

    /// Number of finalized mints; also the latest token id.
    pub fn get_token_counter(&self) -> TokenId {
        self.token_counter
    }

    /// Encoded frown image, fixed at construction.
    pub fn get_low_img_uri(&self) -> &str {
        &self.low_img_uri
    }

    /// Encoded happy image, fixed at construction.
    pub fn get_high_img_uri(&self) -> &str {
        &self.high_img_uri
    }

    pub fn price_feed(&self) -> &P {
        &self.price_feed
    }

    /// Ordered log of every event this instance emitted.
    pub fn events(&self) -> &[CreatedNft] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_boundary_is_inclusive_on_the_happy_side() {
        let reading = 200_000_000_000;
        assert_eq!(mood_for_value(reading - 1, reading), Mood::Frown);
        assert_eq!(mood_for_value(reading, reading), Mood::Happy);
        assert_eq!(mood_for_value(reading + 1, reading), Mood::Happy);
    }
}
