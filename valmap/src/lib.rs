//! Fixed-capacity, lock-free tables shared between a single control-plane
//! writer and any number of per-queue reader threads
//!
//! Readers always observe an atomic snapshot of an entry. An entry that has
//! never been populated reads as `None`; the reader decides the fallback.
//! The tables never allocate after creation and never resize.

use std::io;

use crossbeam::atomic::AtomicCell;

/// A table holding at most one value under a fixed singleton key.
///
/// Writes replace the whole entry. Reads return the last value stored, or
/// `None` before the first write.
pub struct SingleValMap<T> {
    val: AtomicCell<Option<T>>,
}

impl<T: Copy> SingleValMap<T> {
    pub fn new() -> Self {
        Self {
            val: AtomicCell::new(None),
        }
    }

    /// Store a value, replacing any previous one
    pub fn set(&self, val: T) {
        self.val.store(Some(val));
    }

    /// Remove the value, if any
    pub fn clear(&self) {
        self.val.store(None);
    }

    /// Read the current value as an atomic snapshot
    pub fn get(&self) -> Option<T> {
        self.val.load()
    }
}

impl<T: Copy> Default for SingleValMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An indexed table mapping small non-negative slot indices to values.
///
/// Capacity is fixed at creation. Looking up a slot outside the capacity
/// behaves like looking up an empty slot; writing outside the capacity is
/// an error for the writer.
pub struct SlotMap<T> {
    slots: Box<[AtomicCell<Option<T>>]>,
}

impl<T: Copy> SlotMap<T> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(AtomicCell::new(None));
        }
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Install a value at `slot`, replacing any previous one
    pub fn insert(&self, slot: usize, val: T) -> io::Result<()> {
        match self.slots.get(slot) {
            Some(cell) => {
                cell.store(Some(val));
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "slot outside table capacity",
            )),
        }
    }

    /// Remove the value at `slot`, if any
    pub fn remove(&self, slot: usize) -> io::Result<()> {
        match self.slots.get(slot) {
            Some(cell) => {
                cell.store(None);
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "slot outside table capacity",
            )),
        }
    }

    /// Read the value at `slot` as an atomic snapshot
    ///
    /// Empty and out-of-capacity slots both read as `None`
    pub fn lookup(&self, slot: usize) -> Option<T> {
        self.slots.get(slot)?.load()
    }
}
