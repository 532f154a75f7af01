//! Deterministic VRF output computation.
//!
//! Uses HMAC-SHA256 keyed by the oracle's secret to produce a 32-byte
//! pseudo-random output that is deterministic (same inputs = same output)
//! but unpredictable without the secret key.

use hmac::{Hmac, Mac};
use mint_engine::{AccountId, RequestId};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Compute the 32-byte VRF output for a mint request.
///
/// ```text
/// output = HMAC-SHA256(secret, request_id_le || requester_bytes)
/// ```
///
/// The `request_id` ensures uniqueness across requests; the `requester`
/// binds the output to the identity that opened the request.
pub fn compute_randomness(
    hmac_secret: &[u8],
    request_id: RequestId,
    requester: &AccountId,
) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(hmac_secret).expect("HMAC accepts keys of any size");

    mac.update(&request_id.to_le_bytes());
    mac.update(requester.as_bytes());

    let result = mac.finalize();
    let bytes = result.into_bytes();

    let mut output = [0u8; 32];
    output.copy_from_slice(&bytes);
    output
}

/// Expand a base output into `num_words` random words:
/// `word[i] = first 8 bytes of SHA256(base || i_le_bytes)`.
pub fn expand_words(base: &[u8; 32], num_words: u32) -> Vec<u64> {
    (0..num_words)
        .map(|i| {
            let mut hasher = Sha256::new();
            hasher.update(base);
            hasher.update(i.to_le_bytes());
            let hash = hasher.finalize();
            u64::from_le_bytes(hash[..8].try_into().expect("SHA256 output is 32 bytes"))
        })
        .collect()
}
