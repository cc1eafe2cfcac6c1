//! SparseMemory - lazily allocated address→counter storage for one neuron.
//!
//! A neuron with `n` address bits has `2^n` possible locations (up to `2^32`),
//! but training only ever touches a tiny fraction of them. Memory is therefore
//! a hash map keyed by address and grows one [`Cell`] per distinct address
//! written. Unwritten locations read as zero.
//!
//! # Examples
//!
//! ```
//! use wisard::SparseMemory;
//!
//! let mut ram = SparseMemory::new();
//! assert_eq!(ram.write(12), 1.0);
//! assert_eq!(ram.write(12), 2.0);
//! assert_eq!(ram.read(12), 2.0);
//! assert_eq!(ram.read(13), 0.0);
//! assert_eq!(ram.len(), 1);
//! ```

use crate::cell::{Address, Cell};
use rustc_hash::FxHashMap;

/// Sparse RAM of one neuron.
#[derive(Debug, Clone, Default)]
pub struct SparseMemory {
    cells: FxHashMap<Address, Cell>,
}

impl SparseMemory {
    /// Create an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter at `address`, creating the cell with counter 1
    /// if it does not exist yet. Returns the counter after the update.
    #[inline]
    pub fn write(&mut self, address: Address) -> f64 {
        match self.cells.get_mut(&address) {
            Some(cell) => cell.increment(1.0),
            None => {
                self.cells.insert(address, Cell::new(address, 1.0));
                1.0
            }
        }
    }

    /// Counter of the cell stored at `address`, or 0 if absent.
    ///
    /// Never allocates.
    #[inline]
    pub fn read(&self, address: Address) -> f64 {
        self.cells.get(&address).map_or(0.0, Cell::value)
    }

    /// The cell stored at `address`, if any.
    pub fn lookup(&self, address: Address) -> Option<&Cell> {
        self.cells.get(&address)
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over populated cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Approximate heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.cells.capacity() * (std::mem::size_of::<Address>() + std::mem::size_of::<Cell>())
    }
}
