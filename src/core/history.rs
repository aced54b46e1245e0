use crate::core::Grid;
use std::collections::VecDeque;

/// Bounded stack of grid snapshots. Once full, the oldest snapshot is dropped
/// to make room; [`History::pop`] always returns the newest one.
#[derive(Clone, Debug)]
pub struct History {
    capacity: usize,
    snapshots: VecDeque<Grid>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        History {
            capacity,
            snapshots: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, snapshot: Grid) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<Grid> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Cell;

    fn marker(n: usize) -> Grid {
        Grid::new(vec![vec![Cell::Floor; n]])
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut history = History::new(2);
        history.push(marker(1));
        history.push(marker(2));
        history.push(marker(3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(marker(3)));
        assert_eq!(history.pop(), Some(marker(2)));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = History::new(0);
        history.push(marker(1));
        assert!(history.is_empty());
    }
}
