//! Tests for Cell and SparseMemory.
//!
//! Tests cover:
//! - Lazy allocation on write
//! - Counting semantics of repeated writes
//! - Exact reads in memories holding many cells
//! - Memory growth proportional to written addresses

use proptest::prelude::*;
use wisard::{Cell, SparseMemory};

#[test]
fn test_first_write_returns_one() {
    let mut ram = SparseMemory::new();
    assert_eq!(ram.write(9), 1.0);
    assert_eq!(ram.read(9), 1.0);
}

#[test]
fn test_k_writes_read_k() {
    let mut ram = SparseMemory::new();
    for k in 1..=10 {
        assert_eq!(ram.write(77), k as f64);
    }
    assert_eq!(ram.read(77), 10.0);
    assert_eq!(ram.len(), 1);
}

#[test]
fn test_unwritten_reads_zero() {
    let mut ram = SparseMemory::new();
    ram.write(1);
    assert_eq!(ram.read(0), 0.0);
    assert_eq!(ram.read(2), 0.0);
    assert_eq!(ram.read(u32::MAX as u64), 0.0);
    assert_eq!(ram.len(), 1);
}

#[test]
fn test_read_matches_own_cell_among_many() {
    // Regression: a lookup must report the matched cell's counter, never
    // the counter of another stored cell.
    let mut ram = SparseMemory::new();
    let addresses = [5u64, 11, 0, 1 << 31, 3];
    for (i, &a) in addresses.iter().enumerate() {
        for _ in 0..=i {
            ram.write(a);
        }
    }

    for (i, &a) in addresses.iter().enumerate() {
        assert_eq!(ram.read(a), (i + 1) as f64, "address {}", a);
        assert_eq!(ram.lookup(a), Some(&Cell::new(a, (i + 1) as f64)));
    }
}

#[test]
fn test_memory_grows_with_written_cells_only() {
    let empty = SparseMemory::new();
    let mut ram = SparseMemory::new();
    // Addresses spread over a 32-bit space
    for i in 0..16u64 {
        ram.write(i << 27);
    }
    assert_eq!(ram.len(), 16);
    assert!(ram.memory_usage() > empty.memory_usage());
    assert!(ram.memory_usage() < 64 * 1024);
}

proptest! {
    #[test]
    fn prop_read_equals_write_count(writes in prop::collection::vec(0u64..64, 0..200)) {
        let mut ram = SparseMemory::new();
        for &a in &writes {
            ram.write(a);
        }
        for a in 0u64..64 {
            let expected = writes.iter().filter(|&&w| w == a).count() as f64;
            prop_assert_eq!(ram.read(a), expected);
        }
    }
}
