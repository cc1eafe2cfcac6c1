//! Bleaching - confidence-driven tie-break over raw neuron responses.
//!
//! Plain WiSARD scoring only asks whether a neuron's addressed cell was ever
//! written. When several classes recognize a sample equally well, bleaching
//! raises a threshold `b` on the raw counters until one class stands out:
//!
//! ```text
//! SCANNING(b = step)
//!   counts[c] = #{neurons of class c with response > b}
//!   confidence >= threshold          -> CONVERGED
//!   sum(counts) == 0                 -> FALLBACK (recount with response >= 1)
//!   otherwise                        -> SCANNING(b + k*step)
//! ```
//!
//! Counts only change when `b` reaches a stored response value, so a pass that
//! neither converges nor falls back jumps straight to the first multiple of
//! `step` at or above the next larger response. Results match stepping one
//! increment at a time, and the number of passes is bounded by the number of
//! distinct responses.
//!
//! # Examples
//!
//! ```
//! use wisard::bleaching::{bleach, BleachOutcome};
//!
//! // Both classes have 2 neurons above 1, only class 0 has one above 2
//! let class_a = [3.0, 2.0, 0.0];
//! let class_b = [2.0, 2.0, 1.0];
//! let result = bleach(&[&class_a[..], &class_b[..]], 1.0, 0.1).unwrap();
//!
//! assert_eq!(result.counts, vec![1, 0]);
//! assert_eq!(result.scores, vec![1.0, 0.0]);
//! assert!(matches!(result.outcome, BleachOutcome::Converged { .. }));
//! ```

use crate::error::{Result, WisardError};
use tracing::{debug, trace};

/// Confidence value reported when no runner-up exists.
///
/// Only reachable with a single class; callers must treat it as a fault.
pub const NO_RUNNER_UP: f64 = -1.0;

/// Threshold used for the final recount when every count collapsed to zero.
pub const FALLBACK_THRESHOLD: f64 = 1.0;

/// How the bleaching loop terminated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BleachOutcome {
    /// One class separated from the rest with enough confidence
    Converged {
        /// Threshold at which the counts were taken
        threshold: f64,
        /// Confidence reached at that threshold
        confidence: f64,
    },
    /// Every count dropped to zero before convergence
    Fallback {
        /// Threshold at which the counts collapsed
        threshold: f64,
    },
}

/// Final counts and class scores of a bleaching run.
#[derive(Debug, Clone, PartialEq)]
pub struct Bleached {
    /// Per-class neuron counts at the final threshold
    pub counts: Vec<usize>,
    /// Sum of `counts`
    pub total: usize,
    /// Per-class scores
    pub scores: Vec<f64>,
    pub outcome: BleachOutcome,
}

/// Separation between the best and the second-best distinct count.
///
/// - `0` when the maximum is zero or shared by more than one class
/// - [`NO_RUNNER_UP`] when no distinct second value exists
/// - `1 - second / first` otherwise
///
/// # Examples
///
/// ```
/// use wisard::bleaching::{confidence, NO_RUNNER_UP};
///
/// assert_eq!(confidence(&[5, 5]), 0.0);
/// assert_eq!(confidence(&[4, 1]), 0.75);
/// assert_eq!(confidence(&[4]), NO_RUNNER_UP);
/// ```
pub fn confidence(counts: &[usize]) -> f64 {
    let first = match counts.iter().max() {
        Some(&first) => first,
        None => return NO_RUNNER_UP,
    };
    if first == 0 {
        return 0.0;
    }
    if counts.iter().filter(|&&c| c == first).count() > 1 {
        return 0.0;
    }

    match counts.iter().filter(|&&c| c != first).max() {
        Some(&second) => 1.0 - second as f64 / first as f64,
        None => NO_RUNNER_UP,
    }
}

/// Number of responses strictly above `threshold`.
#[inline]
pub fn count_above(responses: &[f64], threshold: f64) -> usize {
    responses.iter().filter(|&&r| r > threshold).count()
}

/// Number of responses at or above `threshold`.
#[inline]
pub fn count_at_least(responses: &[f64], threshold: f64) -> usize {
    responses.iter().filter(|&&r| r >= threshold).count()
}

/// Run the bleaching loop over per-class raw responses.
///
/// # Arguments
///
/// * `responses` - One raw response slice per class
/// * `step` - Initial threshold and increment (must be finite and > 0)
/// * `confidence_threshold` - Confidence required to stop
///
/// # Errors
///
/// - [`WisardError::InvalidConfiguration`] for a non-positive or non-finite step
/// - [`WisardError::AlgorithmFault`] if the confidence becomes undefined
pub fn bleach(responses: &[&[f64]], step: f64, confidence_threshold: f64) -> Result<Bleached> {
    if !(step.is_finite() && step > 0.0) {
        return Err(WisardError::InvalidConfiguration(format!(
            "bleaching step must be a positive number, got {}",
            step
        )));
    }

    let mut threshold = step;
    let (counts, outcome) = loop {
        let counts: Vec<usize> = responses
            .iter()
            .map(|r| count_above(r, threshold))
            .collect();
        let total: usize = counts.iter().sum();

        let conf = confidence(&counts);
        if conf < 0.0 {
            return Err(WisardError::AlgorithmFault(format!(
                "bleaching confidence undefined for counts {:?} at threshold {}",
                counts, threshold
            )));
        }
        trace!(threshold, confidence = conf, ?counts, "bleaching step");

        if conf >= confidence_threshold {
            break (
                counts,
                BleachOutcome::Converged {
                    threshold,
                    confidence: conf,
                },
            );
        }
        if total == 0 {
            let counts = responses
                .iter()
                .map(|r| count_at_least(r, FALLBACK_THRESHOLD))
                .collect();
            break (counts, BleachOutcome::Fallback { threshold });
        }

        // total > 0, so some response lies above the threshold
        let next_response = responses
            .iter()
            .flat_map(|r| r.iter().copied())
            .filter(|&r| r > threshold)
            .fold(f64::INFINITY, f64::min);
        // Rounding may land the multiple just below the response; any value in
        // [next_response, next larger response) gives the same counts.
        threshold = ((next_response / step).ceil() * step).max(next_response);
    };

    let total: usize = counts.iter().sum();
    let scores = if total > 0 {
        counts.iter().map(|&c| c as f64 / total as f64).collect()
    } else {
        responses
            .iter()
            .map(|r| r.iter().sum::<f64>() / r.len().max(1) as f64)
            .collect()
    };

    debug!(?outcome, ?counts, total, "bleaching finished");

    Ok(Bleached {
        counts,
        total,
        scores,
        outcome,
    })
}
