//! Growable scratch storage with fallible, fixed-increment growth.
//!
//! Every scratch collection used by the surface calculation starts at a fixed
//! capacity and grows by a fixed increment whenever a push would overflow it.
//! Neighbor and arc lists start at [`NEIGHBOR_CAPACITY`] and [`ARC_CAPACITY`];
//! cube buckets start at zero and grow by [`CUBE_INCREMENT`]. Growth goes through
//! [`Vec::try_reserve_exact`] so that running out of memory surfaces as an
//! [`AccessibilityError::Allocation`] instead of an abort. Buffers never
//! shrink; [`ScratchBuffer::clear`] keeps the capacity for the next atom.

use super::error::AccessibilityError;

/// Growth step of a cube bucket. Buckets start without an allocation, so
/// cubes that never receive an atom cost nothing.
pub const CUBE_INCREMENT: usize = 16;
/// Initial capacity of a per-atom neighbor list.
pub const NEIGHBOR_CAPACITY: usize = 64;
/// Initial capacity of a per-slice arc list.
pub const ARC_CAPACITY: usize = 64;
/// Number of slots added on every growth step.
pub const GROWTH_INCREMENT: usize = 64;

/// A `Vec` that grows by a fixed increment and reports allocation failure.
#[derive(Debug, Clone)]
pub struct ScratchBuffer<T> {
    items: Vec<T>,
    increment: usize,
}

impl<T> ScratchBuffer<T> {
    /// Allocate an empty buffer holding at least `capacity` items.
    pub fn with_capacity(capacity: usize) -> Result<Self, AccessibilityError> {
        Self::with_growth(capacity, GROWTH_INCREMENT)
    }

    /// Allocate an empty buffer with a custom growth step (at least 1).
    pub fn with_growth(capacity: usize, increment: usize) -> Result<Self, AccessibilityError> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity)?;
        Ok(Self {
            items,
            increment: increment.max(1),
        })
    }

    /// Append an item, growing the buffer by the fixed increment if it is full.
    pub fn push(&mut self, item: T) -> Result<(), AccessibilityError> {
        if self.items.len() == self.items.capacity() {
            self.items.try_reserve_exact(self.increment)?;
        }
        self.items.push(item);
        Ok(())
    }

    /// Drop all items but keep the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocated slots.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Stored items in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Mutable view of the stored items.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Iterate over the stored items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a ScratchBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
