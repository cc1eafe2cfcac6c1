//! Discriminator - the array of RAM neurons representing one class.
//!
//! A discriminator splits a binary input of `input_size` bits into
//! `n_neurons = ceil(input_size / bits_per_neuron)` groups through its
//! [`RetinaMapping`]. Each group forms the address of one [`SparseMemory`]
//! neuron, most significant bit first.
//!
//! # Addressing Modes
//!
//! - **Direct tuple**: the caller supplies one pre-computed address per neuron.
//! - **Scaled (thermometer)**: the caller supplies a real feature vector and a
//!   [`ThermometerScale`]; the address bit for neuron `k`, local bit `i` is the
//!   thermometer pixel `forward[(k*bits + i) mod (z*attr_count)]`, computed
//!   on the fly without materializing the binary image.
//!
//! # Operations
//!
//! - `train` / `train_scaled` - write every neuron's address
//! - `classify` / `classify_scaled` - fraction of neurons that recognize the input
//! - `response` / `response_scaled` - raw per-neuron counters (bleaching input)
//! - `mental_image` - project stored memory back onto the input space
//!
//! # Examples
//!
//! ```
//! use wisard::{Discriminator, MapType};
//!
//! let mut d = Discriminator::new(2, 8, MapType::Random, 42).unwrap();
//! assert_eq!(d.num_neurons(), 4);
//! assert_eq!(d.address_space(), 4);
//!
//! d.train(&[0, 1, 1, 0]).unwrap();
//! assert_eq!(d.classify(&[0, 1, 1, 0]).unwrap(), 1.0);
//! assert_eq!(d.classify(&[1, 0, 0, 1]).unwrap(), 0.0);
//! ```

use crate::cell::Address;
use crate::error::{Result, WisardError};
use crate::retina::{MapType, RetinaMapping};
use crate::sparse_memory::SparseMemory;
use crate::thermometer::ThermometerScale;
use crate::utils::div_ceil;
use itertools::Itertools;
use tracing::debug;

/// Largest supported neuron width.
pub const MAX_BITS_PER_NEURON: usize = 32;

/// Most frequently written address of a neuron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxKey {
    pub address: Address,
    pub count: f64,
}

impl Default for MaxKey {
    fn default() -> Self {
        Self {
            address: 0,
            count: -1.0,
        }
    }
}

/// Projection of a discriminator's memory onto the original input space.
#[derive(Debug, Clone, PartialEq)]
pub struct MentalImage {
    /// Accumulated counters, one per input position
    pub values: Vec<f64>,
    /// Largest entry of `values` (0 for an untrained discriminator)
    pub max: f64,
}

/// One class's memory: `n_neurons` sparse RAMs fed through a retina.
#[derive(Debug, Clone)]
pub struct Discriminator {
    label: String,
    bits_per_neuron: usize,
    address_space: u64,
    input_size: usize,
    map_type: MapType,
    neurons: Vec<SparseMemory>,
    mapping: RetinaMapping,
    max_keys: Vec<MaxKey>,
    responses: Vec<f64>,
    train_count: u64,
}

impl Discriminator {
    /// Create an unlabeled discriminator.
    ///
    /// # Arguments
    ///
    /// * `bits_per_neuron` - Address width of each neuron (1-32)
    /// * `input_size` - Length of the binary input (must be > 0)
    /// * `map_type` - Retina mapping mode
    /// * `seed` - Retina seed; `-1` for a non-deterministic shuffle
    ///
    /// # Errors
    ///
    /// Returns [`WisardError::InvalidConfiguration`] if `bits_per_neuron` is
    /// outside `[1, 32]` or `input_size` is zero.
    pub fn new(bits_per_neuron: usize, input_size: usize, map_type: MapType, seed: i64) -> Result<Self> {
        Self::with_label(bits_per_neuron, input_size, "Anonym", map_type, seed)
    }

    /// Create a discriminator for class `label`.
    pub fn with_label(
        bits_per_neuron: usize,
        input_size: usize,
        label: impl Into<String>,
        map_type: MapType,
        seed: i64,
    ) -> Result<Self> {
        if !(1..=MAX_BITS_PER_NEURON).contains(&bits_per_neuron) {
            return Err(WisardError::InvalidConfiguration(format!(
                "bits per neuron must be in [1, {}], got {}",
                MAX_BITS_PER_NEURON, bits_per_neuron
            )));
        }
        if input_size == 0 {
            return Err(WisardError::InvalidConfiguration(
                "input size must be at least 1".into(),
            ));
        }

        let label = label.into();
        let num_neurons = div_ceil(input_size, bits_per_neuron);
        let mapping = RetinaMapping::build(input_size, map_type, seed);

        debug!(
            label = %label,
            bits_per_neuron,
            input_size,
            num_neurons,
            map_type = %map_type,
            "discriminator constructed"
        );

        Ok(Self {
            label,
            bits_per_neuron,
            address_space: 1u64 << bits_per_neuron,
            input_size,
            map_type,
            neurons: vec![SparseMemory::new(); num_neurons],
            mapping,
            max_keys: vec![MaxKey::default(); num_neurons],
            responses: vec![0.0; num_neurons],
            train_count: 0,
        })
    }

    /// Check that `tuple` holds one in-range address per neuron.
    pub fn check_tuple(&self, tuple: &[Address]) -> Result<()> {
        if tuple.len() != self.neurons.len() {
            return Err(WisardError::InvalidTupleLength {
                expected: self.neurons.len(),
                actual: tuple.len(),
            });
        }
        if let Some((neuron, &address)) = tuple
            .iter()
            .find_position(|&&address| address >= self.address_space)
        {
            return Err(WisardError::AddressOutOfRange {
                neuron,
                address,
                address_space: self.address_space,
            });
        }
        Ok(())
    }

    /// Compute every neuron's address for a scaled feature vector.
    ///
    /// Fails with an input error if `data` does not match the scale or the
    /// scale's image size differs from this discriminator's input size.
    pub fn scaled_addresses(&self, data: &[f64], scale: &ThermometerScale) -> Result<Vec<Address>> {
        if scale.num_pixels() != self.input_size {
            return Err(WisardError::InvalidInputSize {
                expected: self.input_size,
                actual: scale.num_pixels(),
            });
        }
        let levels = scale.levels(data)?;
        let num_pixels = scale.num_pixels();
        let forward = self.mapping.forward();
        let bits = self.bits_per_neuron;

        Ok((0..self.neurons.len())
            .map(|neuron| {
                let mut address: Address = 0;
                for i in 0..bits {
                    let pix = forward[(neuron * bits + i) % num_pixels];
                    if scale.bit(&levels, pix) {
                        address |= 1 << (bits - 1 - i);
                    }
                }
                address
            })
            .collect())
    }

    /// Train on a tuple of per-neuron addresses.
    pub fn train(&mut self, tuple: &[Address]) -> Result<()> {
        self.check_tuple(tuple)?;
        self.write_all(tuple);
        Ok(())
    }

    /// Train on a real feature vector through thermometer encoding.
    pub fn train_scaled(&mut self, data: &[f64], scale: &ThermometerScale) -> Result<()> {
        let tuple = self.scaled_addresses(data, scale)?;
        self.write_all(&tuple);
        Ok(())
    }

    fn write_all(&mut self, tuple: &[Address]) {
        self.train_count += 1;
        for ((ram, max_key), &address) in self
            .neurons
            .iter_mut()
            .zip(self.max_keys.iter_mut())
            .zip_eq(tuple)
        {
            let count = ram.write(address);
            if count > max_key.count {
                *max_key = MaxKey { address, count };
            }
        }
    }

    /// Fraction of neurons whose addressed cell has been written, in `[0, 1]`.
    pub fn classify(&self, tuple: &[Address]) -> Result<f64> {
        self.check_tuple(tuple)?;
        Ok(self.score(tuple))
    }

    /// Scalar similarity for a real feature vector.
    pub fn classify_scaled(&self, data: &[f64], scale: &ThermometerScale) -> Result<f64> {
        let tuple = self.scaled_addresses(data, scale)?;
        Ok(self.score(&tuple))
    }

    fn score(&self, tuple: &[Address]) -> f64 {
        let hits = self
            .neurons
            .iter()
            .zip_eq(tuple)
            .filter(|&(ram, &address)| ram.read(address) > 0.0)
            .count();
        hits as f64 / self.neurons.len() as f64
    }

    /// Store the raw counter of every addressed cell in the response buffer.
    pub fn response(&mut self, tuple: &[Address]) -> Result<&[f64]> {
        self.check_tuple(tuple)?;
        self.capture(tuple);
        Ok(&self.responses)
    }

    /// Raw per-neuron responses for a real feature vector.
    pub fn response_scaled(&mut self, data: &[f64], scale: &ThermometerScale) -> Result<&[f64]> {
        let tuple = self.scaled_addresses(data, scale)?;
        self.capture(&tuple);
        Ok(&self.responses)
    }

    fn capture(&mut self, tuple: &[Address]) {
        for ((slot, ram), &address) in self
            .responses
            .iter_mut()
            .zip(self.neurons.iter())
            .zip_eq(tuple)
        {
            *slot = ram.read(address);
        }
    }

    /// Reconstruct where in the input the learned patterns concentrate.
    ///
    /// Every stored cell adds its counter to the original input position of
    /// each set bit of its address.
    pub fn mental_image(&self) -> MentalImage {
        let bits = self.bits_per_neuron;
        let forward = self.mapping.forward();
        let mut values = vec![0.0; self.input_size];
        let mut max = 0.0;

        for (neuron, ram) in self.neurons.iter().enumerate() {
            let offset = neuron * bits;
            for cell in ram.iter() {
                for b in 0..bits {
                    if (cell.address() >> (bits - 1 - b)) & 1 == 1 {
                        let slot = &mut values[forward[(offset + b) % self.input_size]];
                        *slot += cell.value();
                        if *slot > max {
                            max = *slot;
                        }
                    }
                }
            }
        }

        MentalImage { values, max }
    }

    /// Class label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Address width of every neuron.
    pub fn bits_per_neuron(&self) -> usize {
        self.bits_per_neuron
    }

    /// Number of addressable locations per neuron (`2^bits_per_neuron`).
    pub fn address_space(&self) -> u64 {
        self.address_space
    }

    /// Length of the binary input.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Number of RAM neurons.
    pub fn num_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Retina mode used at construction.
    pub fn map_type(&self) -> MapType {
        self.map_type
    }

    /// The retina feeding the neurons.
    pub fn mapping(&self) -> &RetinaMapping {
        &self.mapping
    }

    /// Per-neuron sparse memories.
    pub fn neurons(&self) -> &[SparseMemory] {
        &self.neurons
    }

    /// Most frequent address and its count, per neuron.
    pub fn max_keys(&self) -> &[MaxKey] {
        &self.max_keys
    }

    /// Response buffer filled by the last `response*` call.
    pub fn responses(&self) -> &[f64] {
        &self.responses
    }

    /// Number of samples trained so far.
    pub fn train_count(&self) -> u64 {
        self.train_count
    }

    /// Approximate heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        let base_size = std::mem::size_of::<Self>();
        let neurons_size: usize = self.neurons.iter().map(SparseMemory::memory_usage).sum();
        let max_keys_size = self.max_keys.capacity() * std::mem::size_of::<MaxKey>();
        let responses_size = self.responses.capacity() * std::mem::size_of::<f64>();

        base_size + neurons_size + max_keys_size + responses_size + self.mapping.memory_usage()
    }
}
