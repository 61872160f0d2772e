//! Back-navigation history
//!
//! LIFO stack of list indices visited in shuffle mode, used by "previous".

use std::collections::VecDeque;

/// Bounded stack of previously visited indices
///
/// When full, the oldest entry is discarded. Entries are indices that were
/// valid when pushed; they are not rewritten if the list later shrinks, so
/// callers clamp on pop.
#[derive(Debug, Clone)]
pub struct History {
    /// Visited indices (most recent = back)
    entries: VecDeque<usize>,

    /// Maximum number of entries kept
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size.min(64)),
            max_size,
        }
    }

    /// Push a visited index
    ///
    /// If history is full, the oldest entry is discarded
    pub fn push(&mut self, index: usize) {
        if self.max_size == 0 {
            return;
        }
        if self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(index);
    }

    /// Most recent entry, without removing it
    pub fn peek(&self) -> Option<usize> {
        self.entries.back().copied()
    }

    /// Pop the most recent entry
    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop_back()
    }

    /// All entries (oldest first)
    pub fn to_vec(&self) -> Vec<usize> {
        self.entries.iter().copied().collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Maximum history size
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Set maximum history size
    ///
    /// If new size is smaller than current, oldest entries are discarded
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        while self.entries.len() > max_size {
            self.entries.pop_front();
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_HISTORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_are_lifo() {
        let mut history = History::new(10);
        history.push(4);
        history.push(1);
        history.push(3);

        assert_eq!(history.peek(), Some(3));
        assert_eq!(history.pop(), Some(3));
        assert_eq!(history.pop(), Some(1));
        assert_eq!(history.pop(), Some(4));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut history = History::new(10);
        history.push(2);
        assert_eq!(history.peek(), Some(2));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn history_bounded() {
        let mut history = History::new(3);
        for index in 0..4 {
            history.push(index);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut history = History::new(0);
        history.push(1);
        assert!(history.is_empty());
    }

    #[test]
    fn shrinking_discards_oldest() {
        let mut history = History::new(5);
        for index in 0..5 {
            history.push(index);
        }

        history.set_max_size(2);
        assert_eq!(history.max_size(), 2);
        assert_eq!(history.to_vec(), vec![3, 4]);
    }

    #[test]
    fn clear_history() {
        let mut history = History::default();
        history.push(1);
        history.clear();
        assert!(history.is_empty());
    }
}
