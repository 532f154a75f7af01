//! Weighted breed selection from a modded random value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MintError;

/// Upper bound (exclusive) of the modded rng space.
pub const MAX_CHANCE_VALUE: u64 = 100;

/// Cumulative range boundaries. Each breed owns the contiguous sub-range from
/// the previous boundary (inclusive) to its own (exclusive):
/// `[0,10) → Pug`, `[10,40) → Shiba`, `[40,100) → StBernard`.
const CHANCE_ARRAY: [u64; 3] = [10, 40, MAX_CHANCE_VALUE];

/// Dog breed minted by the random IPFS service, ordered rarest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Breed {
    Pug,
    Shiba,
    StBernard,
}

impl Breed {
    pub const ALL: [Breed; 3] = [Breed::Pug, Breed::Shiba, Breed::StBernard];

    /// Map a modded rng value to a breed via the cumulative chance array.
    ///
    /// The ranges partition `[0, MAX_CHANCE_VALUE)` with no gaps and no
    /// overlaps; anything at or past the end is a hard
    /// [`MintError::RangeOutOfBounds`], never a clamp.
    pub fn from_modded_rng(modded: u64) -> Result<Breed, MintError> {
        let mut cumulative = 0;
        for (breed, upper) in Breed::ALL.into_iter().zip(CHANCE_ARRAY) {
            if (cumulative..upper).contains(&modded) {
                return Ok(breed);
            }
            cumulative = upper;
        }
        Err(MintError::RangeOutOfBounds { modded })
    }

    /// Position in the ordered breed set, used to index per-breed content.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breed::Pug => f.write_str("pug"),
            Breed::Shiba => f.write_str("shiba"),
            Breed::StBernard => f.write_str("st-bernard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_range_is_pug() {
        for n in 0..10 {
            assert_eq!(Breed::from_modded_rng(n).unwrap(), Breed::Pug);
        }
    }

    #[test]
    fn mid_range_is_shiba() {
        for n in 10..40 {
            assert_eq!(Breed::from_modded_rng(n).unwrap(), Breed::Shiba);
        }
    }

    #[test]
    fn high_range_is_st_bernard() {
        for n in 40..100 {
            assert_eq!(Breed::from_modded_rng(n).unwrap(), Breed::StBernard);
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        for n in [100, 101, u64::MAX] {
            assert_eq!(
                Breed::from_modded_rng(n),
                Err(MintError::RangeOutOfBounds { modded: n })
            );
        }
    }

    #[test]
    fn indices_follow_declaration_order() {
        assert_eq!(Breed::Pug.index(), 0);
        assert_eq!(Breed::Shiba.index(), 1);
        assert_eq!(Breed::StBernard.index(), 2);
    }
}
