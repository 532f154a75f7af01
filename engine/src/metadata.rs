//! Self-contained token metadata encoding.
//!
//! Descriptors are rendered as base64 data URIs so a client that obtains the
//! token URI needs no further round trip to resolve the JSON or the image.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Scheme prefix of an encoded metadata descriptor.
pub const JSON_URI_PREFIX: &str = "data:application/json;base64,";

/// Scheme prefix of an inlined SVG image.
pub const SVG_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// A single `{trait_type, value}` entry in a descriptor's attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// Structural token descriptor: name, description, inlined image, traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<Attribute>,
}

impl TokenMetadata {
    /// Render the descriptor as a directly fetchable data URI.
    pub fn to_token_uri(&self) -> String {
        let json = serde_json::to_vec(self).expect("descriptor serialization is infallible");
        format!("{JSON_URI_PREFIX}{}", STANDARD.encode(json))
    }
}

/// Inline an SVG source as a data URI.
pub fn svg_to_image_uri(svg: &str) -> String {
    format!("{SVG_URI_PREFIX}{}", STANDARD.encode(svg))
}

/// Decode the payload of a data URI produced by this module.
///
/// Returns `None` when the prefix is not one of the published schemes or the
/// payload is not valid base64.
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri
        .strip_prefix(JSON_URI_PREFIX)
        .or_else(|| uri.strip_prefix(SVG_URI_PREFIX))?;
    STANDARD.decode(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SVG: &str =
        r##"<svg xmlns="http://www.w3.org/2000/svg"><circle r="10" fill="#000"/></svg>"##;

    #[test]
    fn svg_encoding_round_trips_byte_exact() {
        let uri = svg_to_image_uri(SAMPLE_SVG);
        assert!(uri.starts_with(SVG_URI_PREFIX));
        assert_eq!(decode_data_uri(&uri).unwrap(), SAMPLE_SVG.as_bytes());
    }

    #[test]
    fn descriptor_round_trips_through_data_uri() {
        let metadata = TokenMetadata {
            name: "Dynamic SVG NFT #1".into(),
            description: "An NFT that changes with a live price feed".into(),
            image: svg_to_image_uri(SAMPLE_SVG),
            attributes: vec![Attribute {
                trait_type: "mood".into(),
                value: "happy".into(),
            }],
        };

        let uri = metadata.to_token_uri();
        assert!(uri.starts_with(JSON_URI_PREFIX));

        let decoded = decode_data_uri(&uri).unwrap();
        let back: TokenMetadata = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert_eq!(decode_data_uri("ipfs://bafy/metadata.json"), None);
    }
}
