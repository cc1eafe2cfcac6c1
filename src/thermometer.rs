//! ThermometerScale - real-valued attribute quantization for scaled addressing.
//!
//! Each attribute `a_k` is quantized to a level
//! `v_k = trunc((a_k - offset_k) * z / range_k)` and thermometer-encoded as `z`
//! bits where bit `p` is set iff `p < v_k`. The codes of all attributes are
//! concatenated into a virtual binary "image" of `z * attr_count` pixels:
//! pixel `pix` belongs to attribute `pix / z` at thermometer position
//! `pix % z`.
//!
//! Addressing never builds that image. A discriminator computes the levels
//! once per sample and asks [`ThermometerScale::bit`] for each pixel it needs.
//! [`ThermometerScale::encode`] materializes the image for diagnostics only.
//!
//! # Examples
//!
//! ```
//! use wisard::ThermometerScale;
//!
//! let scale = ThermometerScale::new(vec![0.0, 0.0], vec![4.0, 4.0], 4).unwrap();
//! let levels = scale.levels(&[2.0, 4.0]).unwrap();
//! assert_eq!(levels, vec![2, 4]);
//!
//! // attribute 0 -> 1100, attribute 1 -> 1111
//! let image = scale.encode(&[2.0, 4.0]).unwrap();
//! let bits: Vec<bool> = image.iter().by_vals().collect();
//! assert_eq!(bits, vec![true, true, false, false, true, true, true, true]);
//! ```

use crate::error::{Result, WisardError};
use bitvec::prelude::*;

/// Per-attribute `(offset, range)` pairs plus the resolution `z`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermometerScale {
    offsets: Vec<f64>,
    ranges: Vec<f64>,
    resolution: usize,
}

impl ThermometerScale {
    /// Create a scale.
    ///
    /// `offsets` and `ranges` must be non-empty and of equal length, and
    /// `resolution` must be at least 1. Ranges are taken as given; computing
    /// them from a corpus is the caller's job.
    pub fn new(offsets: Vec<f64>, ranges: Vec<f64>, resolution: usize) -> Result<Self> {
        if offsets.is_empty() {
            return Err(WisardError::InvalidConfiguration(
                "thermometer scale needs at least one attribute".into(),
            ));
        }
        if offsets.len() != ranges.len() {
            return Err(WisardError::InvalidConfiguration(format!(
                "{} offsets but {} ranges",
                offsets.len(),
                ranges.len()
            )));
        }
        if resolution == 0 {
            return Err(WisardError::InvalidConfiguration(
                "resolution must be at least 1".into(),
            ));
        }

        Ok(Self {
            offsets,
            ranges,
            resolution,
        })
    }

    /// Number of attributes.
    #[inline]
    pub fn num_attrs(&self) -> usize {
        self.offsets.len()
    }

    /// Thermometer width `z` of every attribute.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Length of the virtual binary image (`z * attr_count`).
    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.resolution * self.offsets.len()
    }

    /// Per-attribute offsets.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Per-attribute ranges.
    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Quantized level of `value` for attribute `attr`.
    ///
    /// Values below the offset give a level <= 0 (all bits clear), values at
    /// or above `offset + range` give a level >= z (all bits set). A constant
    /// attribute (range 0) sitting at its offset yields level 0.
    #[inline]
    pub fn level(&self, attr: usize, value: f64) -> i64 {
        // `as` truncates toward zero, saturates on overflow and maps NaN to 0
        ((value - self.offsets[attr]) * self.resolution as f64 / self.ranges[attr]) as i64
    }

    /// Quantized levels of a whole feature vector.
    pub fn levels(&self, data: &[f64]) -> Result<Vec<i64>> {
        if data.len() != self.num_attrs() {
            return Err(WisardError::InvalidInputSize {
                expected: self.num_attrs(),
                actual: data.len(),
            });
        }

        Ok(data
            .iter()
            .enumerate()
            .map(|(attr, &value)| self.level(attr, value))
            .collect())
    }

    /// Value of image pixel `pix` given precomputed `levels`.
    #[inline]
    pub fn bit(&self, levels: &[i64], pix: usize) -> bool {
        ((pix % self.resolution) as i64) < levels[pix / self.resolution]
    }

    /// Materialize the full thermometer image of `data`.
    ///
    /// Costs O(z * attr_count); addressing never calls this.
    pub fn encode(&self, data: &[f64]) -> Result<BitVec<u32, Lsb0>> {
        let levels = self.levels(data)?;
        let mut image = bitvec![u32, Lsb0; 0; self.num_pixels()];
        for pix in 0..self.num_pixels() {
            if self.bit(&levels, pix) {
                image.set(pix, true);
            }
        }
        Ok(image)
    }
}
