//! Fixed-capacity block ring buffer.
//!
//! Single writer, single reader. Indices wrap manually so recalculation can
//! walk neighbours with [`BlockRing::next`] and [`BlockRing::prev`].

use crate::error::PlannerError;

/// Circular store of `CAP` slots with a free-slot counter.
///
/// `free_slots() == CAP` iff empty, `== 0` iff full. The slot at
/// [`write_index`](Self::write_index) is the pending slot: it may be filled
/// before [`advance_write`](Self::advance_write) commits it.
#[derive(Debug, Clone)]
pub struct BlockRing<T, const CAP: usize> {
    slots: [T; CAP],
    write: usize,
    read: usize,
    free: usize,
}

impl<T: Default, const CAP: usize> Default for BlockRing<T, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default, const CAP: usize> BlockRing<T, CAP> {
    const CAPACITY_OK: () = assert!(CAP >= 2, "block ring needs at least two slots");

    /// Create an empty ring.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_OK;
        Self {
            slots: core::array::from_fn(|_| T::default()),
            write: 0,
            read: 0,
            free: CAP,
        }
    }
}

impl<T, const CAP: usize> BlockRing<T, CAP> {
    /// Total number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Number of committed entries.
    #[inline]
    pub fn len(&self) -> usize {
        CAP - self.free
    }

    /// Number of free slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.free
    }

    /// Check if no entries are committed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free == CAP
    }

    /// Check if every slot is committed.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free == 0
    }

    /// Index of the pending (next to be written) slot.
    #[inline]
    pub fn write_index(&self) -> usize {
        self.write
    }

    /// Index of the oldest committed entry.
    #[inline]
    pub fn read_index(&self) -> usize {
        self.read
    }

    /// Index after `index`, wrapping.
    #[inline]
    pub fn next(&self, index: usize) -> usize {
        if index + 1 >= CAP {
            0
        } else {
            index + 1
        }
    }

    /// Index before `index`, wrapping.
    #[inline]
    pub fn prev(&self, index: usize) -> usize {
        if index == 0 {
            CAP - 1
        } else {
            index - 1
        }
    }

    /// Commit the pending slot.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::BufferFull` and leaves the ring untouched when no slot is free.
    pub fn advance_write(&mut self) -> Result<(), PlannerError> {
        if self.is_full() {
            return Err(PlannerError::BufferFull);
        }
        self.free -= 1;
        self.write = self.next(self.write);
        Ok(())
    }

    /// Release the oldest entry.
    ///
    /// Returns `false` (and does nothing) if the ring is empty.
    pub fn advance_read(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.free += 1;
        self.read = self.next(self.read);
        true
    }

    /// Reset to empty. Slot contents are left as-is.
    pub fn clear(&mut self) {
        self.write = 0;
        self.read = 0;
        self.free = CAP;
    }

    /// Slot at a raw index.
    #[inline]
    pub fn slot(&self, index: usize) -> &T {
        &self.slots[index]
    }

    /// Mutable slot at a raw index.
    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }

    /// The pending slot at the write index.
    #[inline]
    pub fn pending_mut(&mut self) -> &mut T {
        &mut self.slots[self.write]
    }

    /// Oldest committed entry.
    pub fn head(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.read])
        }
    }

    /// Entry after the oldest, if at least two are committed.
    pub fn second(&self) -> Option<&T> {
        if self.len() < 2 {
            None
        } else {
            Some(&self.slots[self.next(self.read)])
        }
    }

    /// Newest committed entry.
    pub fn newest(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.prev(self.write)])
        }
    }

    /// Iterate committed entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len()).map(move |offset| &self.slots[(self.read + offset) % CAP])
    }
}
