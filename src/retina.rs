//! RetinaMapping - permutation of input positions feeding the neurons.
//!
//! Neuron `k` reads input positions `k*bits .. (k+1)*bits` *after* mapping.
//! A random retina scatters structurally adjacent input bits over different
//! neurons, which helps generalization. A linear retina keeps the identity.
//!
//! # Examples
//!
//! ```
//! use wisard::{MapType, RetinaMapping};
//!
//! let retina = RetinaMapping::build(8, MapType::Random, 42);
//! for i in 0..8 {
//!     assert_eq!(retina.inverse()[retina.forward()[i]], i);
//! }
//!
//! let linear = RetinaMapping::build(4, MapType::Linear, -1);
//! assert_eq!(linear.forward(), &[0, 1, 2, 3]);
//! ```

use crate::error::{Result, WisardError};
use crate::utils::{rng_from_seed, shuffle_indices};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How input positions are assigned to neuron address bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum MapType {
    /// Identity mapping
    Linear,
    /// Seeded Fisher-Yates shuffle
    #[default]
    Random,
}

impl FromStr for MapType {
    type Err = WisardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LINEAR" => Ok(MapType::Linear),
            "RANDOM" => Ok(MapType::Random),
            other => Err(WisardError::InvalidConfiguration(format!(
                "received wrong mapping mode '{}' (expected LINEAR or RANDOM)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for MapType {
    type Error = WisardError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapType::Linear => write!(f, "LINEAR"),
            MapType::Random => write!(f, "RANDOM"),
        }
    }
}

/// A bijection over `[0, size)` and its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetinaMapping {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl RetinaMapping {
    /// Build a mapping over `size` positions.
    ///
    /// For [`MapType::Random`] a non-negative `seed` makes the shuffle
    /// reproducible; a negative seed draws from OS entropy. The seed is
    /// ignored for [`MapType::Linear`].
    pub fn build(size: usize, map_type: MapType, seed: i64) -> Self {
        let mut forward: Vec<usize> = (0..size).collect();

        if map_type == MapType::Random {
            let mut rng = rng_from_seed(seed);
            shuffle_indices(&mut forward, &mut rng);
        }

        let mut inverse = vec![0; size];
        for (i, &f) in forward.iter().enumerate() {
            inverse[f] = i;
        }

        Self { forward, inverse }
    }

    /// Build a mapping from a mode name (`"LINEAR"` or `"RANDOM"`).
    ///
    /// Fails with a configuration error for any other name.
    pub fn from_mode_name(size: usize, mode: &str, seed: i64) -> Result<Self> {
        Ok(Self::build(size, mode.parse()?, seed))
    }

    /// Forward permutation: slot → original input position.
    #[inline]
    pub fn forward(&self) -> &[usize] {
        &self.forward
    }

    /// Inverse permutation: original input position → slot.
    #[inline]
    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }

    /// Number of mapped positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// True for a mapping over zero positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Approximate heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>()
            + (self.forward.capacity() + self.inverse.capacity()) * std::mem::size_of::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_is_identity() {
        let m = RetinaMapping::build(6, MapType::Linear, 3);
        assert_eq!(m.forward(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(m.inverse(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_random_seeded_is_reproducible() {
        let a = RetinaMapping::build(64, MapType::Random, 42);
        let b = RetinaMapping::build(64, MapType::Random, 42);
        assert_eq!(a, b);

        let c = RetinaMapping::build(64, MapType::Random, 43);
        assert_ne!(a.forward(), c.forward());
    }

    #[test]
    fn test_inverse_composes_to_identity() {
        let m = RetinaMapping::build(100, MapType::Random, -1);
        for i in 0..100 {
            assert_eq!(m.inverse()[m.forward()[i]], i);
            assert_eq!(m.forward()[m.inverse()[i]], i);
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("LINEAR".parse::<MapType>().unwrap(), MapType::Linear);
        assert_eq!("RANDOM".parse::<MapType>().unwrap(), MapType::Random);
        assert_eq!(MapType::default(), MapType::Random);
        assert_eq!(MapType::Random.to_string(), "RANDOM");

        let err = RetinaMapping::from_mode_name(8, "SPIRAL", 0).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
