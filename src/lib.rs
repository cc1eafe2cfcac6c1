//! WiSARD - Weightless RAM-Discriminator Associative Memory
//!
//! This crate implements the memory and addressing engine of a WiSARD
//! classifier. Instead of weighted connections, every neuron is a sparse lookup
//! table addressed directly by a handful of input bits. A class is represented
//! by a **discriminator** (an array of such neurons), and an **ensemble** of
//! discriminators turns their responses into per-class scores.
//!
//! # Key Characteristics
//!
//! - Lazily allocated sparse neuron memory (addresses up to 32 bits)
//! - Direct tuple addressing or on-the-fly thermometer encoding of real values
//! - Seeded random retina decorrelating input bits across neurons
//! - Bleaching tie-break over raw neuron counters
//!
//! # Architecture
//!
//! - **Cell / SparseMemory**: address→counter storage of one neuron
//! - **RetinaMapping**: permutation of input positions (identity or shuffle)
//! - **ThermometerScale**: per-attribute quantization for real-valued samples
//! - **Discriminator**: the neurons of one class, plus addressing logic
//! - **Ensemble**: one discriminator per label and the decision layer
//!
//! # Examples
//!
//! ## Tuple Mode
//!
//! ```
//! use wisard::{Discriminator, MapType};
//!
//! let mut d = Discriminator::new(2, 8, MapType::Random, 42).unwrap();
//! d.train(&[0, 1, 1, 0]).unwrap();
//! assert_eq!(d.classify(&[0, 1, 1, 0]).unwrap(), 1.0);
//! ```
//!
//! ## Classifying Real-Valued Samples With Bleaching
//!
//! ```
//! use wisard::{Ensemble, Sample, WisardConfig};
//!
//! let config = WisardConfig::default()
//!     .with_bits_per_neuron(4)
//!     .with_resolution(8)
//!     .with_seed(0)
//!     .with_bleaching(true);
//! let mut wisard = Ensemble::scaled(config, ["a", "b"], vec![0.0; 2], vec![1.0; 2]).unwrap();
//!
//! wisard.train("a", Sample::Features(&[0.1, 0.2])).unwrap();
//! wisard.train("b", Sample::Features(&[0.9, 0.8])).unwrap();
//!
//! let scores = wisard.classify(Sample::Features(&[0.1, 0.2])).unwrap();
//! assert_eq!(scores.len(), 2);
//! ```

pub mod bleaching;
pub mod cell;
pub mod config;
pub mod discriminator;
pub mod ensemble;
pub mod error;
pub mod retina;
pub mod sparse_memory;
pub mod thermometer;
pub mod utils;

// Re-exports for convenient access
pub use bleaching::{bleach, confidence, BleachOutcome, Bleached, NO_RUNNER_UP};
pub use cell::{Address, Cell};
pub use config::{WisardConfig, MAX_RESOLUTION};
pub use discriminator::{Discriminator, MaxKey, MentalImage, MAX_BITS_PER_NEURON};
pub use ensemble::{Classification, Ensemble, Sample};
pub use error::{Result, WisardError};
pub use retina::{MapType, RetinaMapping};
pub use sparse_memory::SparseMemory;
pub use thermometer::ThermometerScale;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "WiSARD";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(ver.contains("WiSARD"));
        assert!(ver.contains(VERSION));
    }

    #[test]
    fn test_re_exports() {
        // Verify re-exports are accessible
        let _ram = SparseMemory::new();
        let _result: Result<()> = Ok(());
        assert_eq!(MAX_BITS_PER_NEURON, 32);
        assert_eq!(MAX_RESOLUTION, 8192);
    }
}
