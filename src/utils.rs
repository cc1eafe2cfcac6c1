//! Utility functions for the WiSARD engine.
//!
//! This module provides the random number generation helpers and the
//! Fisher-Yates shuffle used to build retina mappings.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Create a random number generator from a mapping seed.
///
/// A non-negative seed gives a reproducible generator. Any negative seed
/// (conventionally `-1`) draws a fresh generator from OS entropy.
///
/// # Examples
///
/// ```
/// use wisard::utils::rng_from_seed;
/// use rand::Rng;
///
/// let mut a = rng_from_seed(7);
/// let mut b = rng_from_seed(7);
/// assert_eq!(a.gen::<u64>(), b.gen::<u64>());
/// ```
pub fn rng_from_seed(seed: i64) -> StdRng {
    if seed >= 0 {
        StdRng::seed_from_u64(seed as u64)
    } else {
        StdRng::from_entropy()
    }
}

/// Shuffle a slice of usize values in-place using Fisher-Yates algorithm.
///
/// Walks `i` from `len - 1` down to `1`, picking `j` uniformly in `[0, i]`
/// and swapping positions `i` and `j`.
///
/// # Examples
///
/// ```
/// use wisard::utils::shuffle_indices;
/// use rand::SeedableRng;
///
/// let mut indices = vec![0, 1, 2, 3, 4];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// shuffle_indices(&mut indices, &mut rng);
/// // indices is now shuffled
/// ```
pub fn shuffle_indices<R: Rng>(arr: &mut [usize], rng: &mut R) {
    for i in (1..arr.len()).rev() {
        let j = rng.gen_range(0..=i);
        arr.swap(i, j);
    }
}

/// Ceiling division for sizes.
///
/// # Examples
///
/// ```
/// use wisard::utils::div_ceil;
///
/// assert_eq!(div_ceil(8, 2), 4);
/// assert_eq!(div_ceil(9, 4), 3);
/// ```
#[inline]
pub fn div_ceil(num: usize, den: usize) -> usize {
    num / den + usize::from(num % den != 0)
}
