//! Ensemble - one discriminator per class plus the decision layer.
//!
//! The ensemble owns a closed label set fixed at construction. Training a
//! sample writes it into the discriminator of its label only; classification
//! queries every discriminator and turns the responses into a per-class
//! score vector, either directly or through [bleaching](crate::bleaching).
//!
//! # Sample Kinds
//!
//! - [`Sample::Tuple`] - pre-quantized per-neuron addresses (any ensemble)
//! - [`Sample::Features`] - real feature vector, thermometer-encoded with the
//!   ensemble's scale (only ensembles built with [`Ensemble::scaled`])
//!
//! # Examples
//!
//! ```
//! use wisard::{Ensemble, Sample, WisardConfig};
//!
//! let config = WisardConfig::default()
//!     .with_bits_per_neuron(4)
//!     .with_resolution(3)
//!     .with_seed(7);
//! let mut wisard = Ensemble::scaled(
//!     config,
//!     ["low", "high"],
//!     vec![0.0, 0.0, 0.0],
//!     vec![4.0, 4.0, 4.0],
//! )
//! .unwrap();
//!
//! wisard.train("low", Sample::Features(&[0.5, 0.2, 0.1])).unwrap();
//! wisard.train("high", Sample::Features(&[3.9, 3.5, 4.0])).unwrap();
//!
//! let scores = wisard.classify(Sample::Features(&[3.9, 3.5, 4.0])).unwrap();
//! assert_eq!(scores[1], 1.0);
//! assert_eq!(wisard.predict(Sample::Features(&[3.9, 3.5, 4.0])).unwrap(), "high");
//! ```

use crate::bleaching::{bleach, BleachOutcome};
use crate::cell::Address;
use crate::config::WisardConfig;
use crate::discriminator::Discriminator;
use crate::error::{Result, WisardError};
use crate::thermometer::ThermometerScale;
use rustc_hash::FxHashMap;
use tracing::debug;

/// One input sample, in either addressing mode.
#[derive(Debug, Clone, Copy)]
pub enum Sample<'a> {
    /// One address per neuron
    Tuple(&'a [Address]),
    /// Raw attribute values, encoded with the ensemble's thermometer scale
    Features(&'a [f64]),
}

/// Scores of one classification and how they were obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Per-class scores, in label order
    pub scores: Vec<f64>,
    /// Bleaching termination state, `None` when bleaching is disabled
    pub outcome: Option<BleachOutcome>,
}

/// A WiSARD classifier: a labeled set of structurally identical discriminators.
#[derive(Debug, Clone)]
pub struct Ensemble {
    config: WisardConfig,
    scale: Option<ThermometerScale>,
    labels: Vec<String>,
    index: FxHashMap<String, usize>,
    discriminators: Vec<Discriminator>,
}

impl Ensemble {
    /// Create a tuple-mode ensemble over a binary input of `input_size` bits.
    ///
    /// # Errors
    ///
    /// Returns [`WisardError::InvalidConfiguration`] for an invalid config,
    /// an empty or duplicated label set, or a zero input size.
    pub fn new<I, S>(config: WisardConfig, labels: I, input_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(config, labels, input_size, None)
    }

    /// Create an ensemble for real-valued samples of `offsets.len()` attributes.
    ///
    /// Each discriminator sees a virtual thermometer image of
    /// `config.resolution * offsets.len()` bits.
    pub fn scaled<I, S>(
        config: WisardConfig,
        labels: I,
        offsets: Vec<f64>,
        ranges: Vec<f64>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        let scale = ThermometerScale::new(offsets, ranges, config.resolution)?;
        let input_size = scale.num_pixels();
        Self::build(config, labels, input_size, Some(scale))
    }

    fn build<I, S>(
        config: WisardConfig,
        labels: I,
        input_size: usize,
        scale: Option<ThermometerScale>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;

        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(WisardError::InvalidConfiguration(
                "ensemble needs at least one label".into(),
            ));
        }

        let mut index = FxHashMap::default();
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(WisardError::InvalidConfiguration(format!(
                    "duplicate label '{}'",
                    label
                )));
            }
        }

        let discriminators = labels
            .iter()
            .map(|label| {
                Discriminator::with_label(
                    config.bits_per_neuron,
                    input_size,
                    label.as_str(),
                    config.map_type,
                    config.seed,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            classes = labels.len(),
            input_size,
            scaled = scale.is_some(),
            bleaching = config.bleaching,
            "ensemble constructed"
        );

        Ok(Self {
            config,
            scale,
            labels,
            index,
            discriminators,
        })
    }

    /// Train the discriminator of `label` on `sample`.
    ///
    /// On error nothing is modified.
    pub fn train(&mut self, label: &str, sample: Sample<'_>) -> Result<()> {
        let class = self.label_index(label)?;
        let discriminator = &mut self.discriminators[class];
        match sample {
            Sample::Tuple(tuple) => discriminator.train(tuple),
            Sample::Features(data) => {
                let scale = self.scale.as_ref().ok_or_else(no_scale)?;
                discriminator.train_scaled(data, scale)
            }
        }
    }

    /// Per-class scores for `sample`, in label order.
    ///
    /// Without bleaching each score is the fraction of the class's neurons
    /// that recognize the sample. With bleaching the scores are the final
    /// partial counts normalized to sum to 1 (see [`crate::bleaching`]).
    pub fn classify(&mut self, sample: Sample<'_>) -> Result<Vec<f64>> {
        Ok(self.classify_detailed(sample)?.scores)
    }

    /// Plain per-class scores, ignoring the bleaching setting.
    ///
    /// Only reads the model, so a trained ensemble can be shared as
    /// `&Ensemble` across threads for inference.
    pub fn classify_plain(&self, sample: Sample<'_>) -> Result<Vec<f64>> {
        self.discriminators
            .iter()
            .map(|d| match sample {
                Sample::Tuple(tuple) => d.classify(tuple),
                Sample::Features(data) => {
                    let scale = self.scale.as_ref().ok_or_else(no_scale)?;
                    d.classify_scaled(data, scale)
                }
            })
            .collect()
    }

    /// Like [`classify`](Self::classify), also reporting the bleaching outcome.
    ///
    /// Takes `&mut self` because bleaching fills each discriminator's
    /// response buffer.
    pub fn classify_detailed(&mut self, sample: Sample<'_>) -> Result<Classification> {
        if !self.config.bleaching {
            return Ok(Classification {
                scores: self.classify_plain(sample)?,
                outcome: None,
            });
        }

        for d in self.discriminators.iter_mut() {
            match sample {
                Sample::Tuple(tuple) => d.response(tuple)?,
                Sample::Features(data) => {
                    let scale = self.scale.as_ref().ok_or_else(no_scale)?;
                    d.response_scaled(data, scale)?
                }
            };
        }

        let responses: Vec<&[f64]> = self.discriminators.iter().map(Discriminator::responses).collect();
        let bleached = bleach(
            &responses,
            self.config.bleach_step,
            self.config.bleach_confidence,
        )?;

        Ok(Classification {
            scores: bleached.scores,
            outcome: Some(bleached.outcome),
        })
    }

    /// Label with the highest score.
    ///
    /// The first label wins ties; if every score is zero the first label is
    /// returned.
    pub fn predict(&mut self, sample: Sample<'_>) -> Result<&str> {
        let scores = self.classify(sample)?;
        let mut best = 0;
        for (class, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = class;
            }
        }
        Ok(self.labels[best].as_str())
    }

    /// Position of `label` in the score vector.
    pub fn label_index(&self, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| WisardError::UnknownLabel(label.to_string()))
    }

    /// Class labels in score order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Configuration the ensemble was built with.
    pub fn config(&self) -> &WisardConfig {
        &self.config
    }

    /// Thermometer scale of a scaled ensemble.
    pub fn scale(&self) -> Option<&ThermometerScale> {
        self.scale.as_ref()
    }

    /// Discriminator of `label`, if it belongs to the label set.
    pub fn discriminator(&self, label: &str) -> Option<&Discriminator> {
        self.index.get(label).map(|&i| &self.discriminators[i])
    }

    /// All discriminators in label order.
    pub fn discriminators(&self) -> &[Discriminator] {
        &self.discriminators
    }

    /// Neurons per discriminator (identical across classes).
    pub fn num_neurons(&self) -> usize {
        self.discriminators[0].num_neurons()
    }

    /// Approximate heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>()
            + self
                .discriminators
                .iter()
                .map(Discriminator::memory_usage)
                .sum::<usize>()
            + self.labels.iter().map(String::capacity).sum::<usize>()
    }
}

fn no_scale() -> WisardError {
    WisardError::UnsupportedSample(
        "feature samples need an ensemble built with Ensemble::scaled".into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapType;

    fn tuple_config() -> WisardConfig {
        WisardConfig::default()
            .with_bits_per_neuron(2)
            .with_map_type(MapType::Linear)
    }

    #[test]
    fn test_label_set_validation() {
        let empty: Vec<String> = Vec::new();
        assert!(Ensemble::new(tuple_config(), empty, 8).is_err());
        assert!(Ensemble::new(tuple_config(), ["a", "a"], 8).is_err());
        assert!(Ensemble::new(tuple_config(), ["a", "b"], 0).is_err());

        let e = Ensemble::new(tuple_config(), ["a", "b"], 8).unwrap();
        assert_eq!(e.label_index("b").unwrap(), 1);
        assert!(e.label_index("c").unwrap_err().is_input_error());
    }

    #[test]
    fn test_features_need_scale() {
        let mut e = Ensemble::new(tuple_config(), ["a", "b"], 8).unwrap();
        let err = e.train("a", Sample::Features(&[1.0])).unwrap_err();
        assert!(matches!(err, WisardError::UnsupportedSample(_)));
        assert_eq!(e.discriminator("a").unwrap().train_count(), 0);
    }

    #[test]
    fn test_predict_prefers_first_on_tie() {
        let mut e = Ensemble::new(tuple_config(), ["a", "b"], 8).unwrap();
        assert_eq!(e.predict(Sample::Tuple(&[0, 0, 0, 0])).unwrap(), "a");

        e.train("b", Sample::Tuple(&[1, 1, 1, 1])).unwrap();
        assert_eq!(e.predict(Sample::Tuple(&[1, 1, 1, 1])).unwrap(), "b");
    }
}
