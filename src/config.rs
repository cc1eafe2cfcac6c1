//! Model configuration.
//!
//! [`WisardConfig`] carries every parameter the engine consumes. It can be
//! built in code, or saved to and loaded from JSON with serde.
//!
//! # Example
//!
//! ```
//! use wisard::{MapType, WisardConfig};
//!
//! let config = WisardConfig::default()
//!     .with_bits_per_neuron(4)
//!     .with_resolution(16)
//!     .with_map_type(MapType::Linear)
//!     .with_bleaching(true);
//! config.validate().unwrap();
//!
//! let json = config.to_json().unwrap();
//! let restored = WisardConfig::from_json_str(&json).unwrap();
//! assert_eq!(config, restored);
//! ```

use crate::discriminator::MAX_BITS_PER_NEURON;
use crate::error::{Result, WisardError};
use crate::retina::MapType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest supported thermometer resolution.
pub const MAX_RESOLUTION: usize = 8192;

/// Parameters of a WiSARD ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WisardConfig {
    /// Address width of every neuron, in `[1, 32]`
    pub bits_per_neuron: usize,
    /// Thermometer levels per attribute (`z`), in `[1, 8192]`
    pub resolution: usize,
    /// Retina mode
    pub map_type: MapType,
    /// Retina seed; `-1` for a fresh shuffle per discriminator
    pub seed: i64,
    /// Enable the bleaching tie-break
    pub bleaching: bool,
    /// Initial bleaching threshold and increment
    pub bleach_step: f64,
    /// Confidence needed to stop bleaching, in `(0, 1)`
    pub bleach_confidence: f64,
}

impl Default for WisardConfig {
    fn default() -> Self {
        Self {
            bits_per_neuron: 8,
            resolution: 256,
            map_type: MapType::Random,
            seed: -1,
            bleaching: false,
            bleach_step: 1.0,
            bleach_confidence: 0.01,
        }
    }
}

impl WisardConfig {
    pub fn with_bits_per_neuron(mut self, bits: usize) -> Self {
        self.bits_per_neuron = bits;
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_map_type(mut self, map_type: MapType) -> Self {
        self.map_type = map_type;
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bleaching(mut self, enabled: bool) -> Self {
        self.bleaching = enabled;
        self
    }

    pub fn with_bleach_step(mut self, step: f64) -> Self {
        self.bleach_step = step;
        self
    }

    pub fn with_bleach_confidence(mut self, confidence: f64) -> Self {
        self.bleach_confidence = confidence;
        self
    }

    /// Check every parameter against its legal domain.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BITS_PER_NEURON).contains(&self.bits_per_neuron) {
            return Err(WisardError::InvalidConfiguration(format!(
                "Bit resolution ranges in [1..{}], got {}",
                MAX_BITS_PER_NEURON, self.bits_per_neuron
            )));
        }
        if !(1..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(WisardError::InvalidConfiguration(format!(
                "Scaling range must be in [1..{}], got {}",
                MAX_RESOLUTION, self.resolution
            )));
        }
        if self.seed < -1 {
            return Err(WisardError::InvalidConfiguration(format!(
                "Mapping seed can be -1 (no seed) or nonnegative, got {}",
                self.seed
            )));
        }
        if !(self.bleach_step.is_finite() && self.bleach_step > 0.0) {
            return Err(WisardError::InvalidConfiguration(format!(
                "Bleaching step must be positive, got {}",
                self.bleach_step
            )));
        }
        if !(self.bleach_confidence > 0.0 && self.bleach_confidence < 1.0) {
            return Err(WisardError::InvalidConfiguration(format!(
                "Bleaching confidence must be in range (0, 1), got {}",
                self.bleach_confidence
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their default values. Well-formed JSON carrying an
    /// illegal value (such as an unknown map type) is a configuration error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                WisardError::InvalidConfiguration(e.to_string())
            } else {
                WisardError::Serialization(e)
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WisardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bits_per_neuron, 8);
        assert_eq!(config.resolution, 256);
        assert_eq!(config.map_type, MapType::Random);
        assert_eq!(config.seed, -1);
        assert!(!config.bleaching);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let base = WisardConfig::default();
        assert!(base.clone().with_bits_per_neuron(0).validate().is_err());
        assert!(base.clone().with_bits_per_neuron(33).validate().is_err());
        assert!(base.clone().with_bits_per_neuron(32).validate().is_ok());
        assert!(base.clone().with_resolution(0).validate().is_err());
        assert!(base.clone().with_resolution(8193).validate().is_err());
        assert!(base.clone().with_seed(-2).validate().is_err());
        assert!(base.clone().with_bleach_step(0.0).validate().is_err());
        assert!(base.clone().with_bleach_confidence(0.0).validate().is_err());
        assert!(base.clone().with_bleach_confidence(1.0).validate().is_err());
    }

    #[test]
    fn test_json_partial_and_unknown_map_type() {
        let config = WisardConfig::from_json_str(r#"{"bits_per_neuron": 4, "map_type": "LINEAR"}"#)
            .unwrap();
        assert_eq!(config.bits_per_neuron, 4);
        assert_eq!(config.map_type, MapType::Linear);
        assert_eq!(config.resolution, 256);

        let err = WisardConfig::from_json_str(r#"{"map_type": "SPIRAL"}"#).unwrap_err();
        assert!(err.is_configuration_error());

        let err = WisardConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, WisardError::Serialization(_)));

        let err = WisardConfig::from_json_str(r#"{"bits_per_neuron": 40}"#).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
