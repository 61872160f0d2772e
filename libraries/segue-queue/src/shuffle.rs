//! Shuffle permutation
//!
//! A shuffle pass is a random permutation of `[0, n)` with a pointer to the
//! slot holding the current index. Advancing moves the pointer one slot and
//! wraps, so every index is visited once before any repeats.

use rand::seq::SliceRandom;
use rand::Rng;

/// Permutation of list indices plus the slot currently playing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShuffleOrder {
    order: Vec<usize>,
    pointer: usize,
}

impl ShuffleOrder {
    /// Fresh Fisher–Yates permutation of `[0, len)`
    ///
    /// The pointer is left on the slot holding `current`, or slot 0 when
    /// `current` is out of range.
    pub fn generate<R: Rng + ?Sized>(len: usize, current: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);

        let mut shuffle = Self { order, pointer: 0 };
        shuffle.recenter(current);
        shuffle
    }

    /// Point at the slot holding `index`; slot 0 if it is not present
    pub fn recenter(&mut self, index: usize) {
        self.pointer = self.position_of(index).unwrap_or(0);
    }

    /// Slot holding `index`
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.order.iter().position(|&i| i == index)
    }

    /// Index in the slot after the pointer, without moving
    pub fn peek_next(&self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        Some(self.order[(self.pointer + 1) % self.order.len()])
    }

    /// Move to the next slot (wrapping) and return its index
    pub fn advance(&mut self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        self.pointer = (self.pointer + 1) % self.order.len();
        Some(self.order[self.pointer])
    }

    /// Index in the slot under the pointer
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.pointer).copied()
    }

    /// Pointer position
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// The permutation
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no slots
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
