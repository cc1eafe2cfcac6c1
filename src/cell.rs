//! Cell - one addressed counter inside a neuron's memory.

/// Neuron address. Always below `2^bits_per_neuron`, so at most 32 bits wide.
pub type Address = u64;

/// A single memory location: an address and its accumulated counter.
///
/// Cells are created by [`SparseMemory::write`](crate::SparseMemory::write)
/// on the first write to an address and only ever grow afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    address: Address,
    counter: f64,
}

impl Cell {
    /// Create a cell holding `counter` at `address`.
    pub fn new(address: Address, counter: f64) -> Self {
        Self { address, counter }
    }

    /// Add `by` to the counter and return the new value.
    #[inline]
    pub fn increment(&mut self, by: f64) -> f64 {
        self.counter += by;
        self.counter
    }

    /// Current counter value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.counter
    }

    /// Address this cell is stored under.
    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_increment() {
        let mut cell = Cell::new(5, 1.0);
        assert_eq!(cell.address(), 5);
        assert_eq!(cell.value(), 1.0);
        assert_eq!(cell.increment(1.0), 2.0);
        assert_eq!(cell.increment(0.5), 2.5);
        assert_eq!(cell.value(), 2.5);
    }
}
