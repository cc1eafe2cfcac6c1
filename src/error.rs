//! Error types for the WiSARD engine.
//!
//! This module provides a unified error type for all operations in the crate,
//! using the `thiserror` crate for ergonomic error handling.
//!
//! Errors fall into three families:
//!
//! - **Configuration** errors are raised at construction time and are fatal to
//!   that construction call.
//! - **Input** errors are raised per training/classification call. The call is
//!   aborted before any state is mutated, so the caller may retry with a
//!   corrected input.
//! - **Algorithm faults** signal a violated internal invariant during bleaching
//!   and abort the classification of that sample.

use thiserror::Error;

/// The main error type for WiSARD operations.
#[derive(Error, Debug)]
pub enum WisardError {
    /// A construction parameter is outside its legal domain
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Direct-mode tuple does not have one address per neuron
    #[error("Wrong tuple size: expected {expected} addresses, got {actual}")]
    InvalidTupleLength {
        /// Number of neurons in the discriminator
        expected: usize,
        /// Length of the supplied tuple
        actual: usize,
    },

    /// Direct-mode tuple holds an address outside the neuron's address space
    #[error("Address {address} for neuron {neuron} exceeds address space {address_space}")]
    AddressOutOfRange {
        /// Neuron the address was meant for
        neuron: usize,
        /// Offending address
        address: u64,
        /// Size of the neuron address space (2^bits)
        address_space: u64,
    },

    /// Input size does not match expected size
    #[error("Invalid input size: expected {expected}, got {actual}")]
    InvalidInputSize {
        /// Expected size
        expected: usize,
        /// Actual size received
        actual: usize,
    },

    /// Label is not part of the ensemble's closed label set
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Sample kind cannot be encoded by this ensemble
    #[error("Unsupported sample: {0}")]
    UnsupportedSample(String),

    /// Internal invariant violated while bleaching
    #[error("Algorithm fault: {0}")]
    AlgorithmFault(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WisardError {
    /// True for errors raised while constructing a model.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, WisardError::InvalidConfiguration(_))
    }

    /// True for per-call input errors. These never leave partial state behind.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            WisardError::InvalidTupleLength { .. }
                | WisardError::AddressOutOfRange { .. }
                | WisardError::InvalidInputSize { .. }
                | WisardError::UnknownLabel(_)
                | WisardError::UnsupportedSample(_)
        )
    }

    /// True when bleaching hit the undefined-confidence sentinel.
    pub fn is_algorithm_fault(&self) -> bool {
        matches!(self, WisardError::AlgorithmFault(_))
    }
}

/// A specialized `Result` type for WiSARD operations.
///
/// This is a type alias for `Result<T, WisardError>` and is used
/// throughout the codebase for consistency.
pub type Result<T> = std::result::Result<T, WisardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WisardError::InvalidConfiguration("Up to 32 bit supported".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Up to 32 bit supported"
        );

        let err = WisardError::InvalidTupleLength {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Wrong tuple size: expected 4 addresses, got 3"
        );

        let err = WisardError::AddressOutOfRange {
            neuron: 2,
            address: 9,
            address_space: 4,
        };
        assert_eq!(
            err.to_string(),
            "Address 9 for neuron 2 exceeds address space 4"
        );
    }

    #[test]
    fn test_error_families() {
        assert!(WisardError::InvalidConfiguration("x".into()).is_configuration_error());
        assert!(WisardError::UnknownLabel("cat".into()).is_input_error());
        assert!(WisardError::InvalidInputSize {
            expected: 3,
            actual: 2
        }
        .is_input_error());
        assert!(WisardError::AlgorithmFault("x".into()).is_algorithm_fault());
        assert!(!WisardError::AlgorithmFault("x".into()).is_input_error());
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(returns_result().unwrap(), 42);
    }
}
