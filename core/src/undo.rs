use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UndoEntry {
    pub coords: Coord2,
    pub prior: Cell,
    pub is_batch_start: bool,
}

/// Stack of prior cell values grouped into batches, one batch per player action.
///
/// A batch is pushed start marker first, so on the stack it sits below the
/// rest of its entries and undoing pops down to and including it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
    batches: usize,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coords: Coord2, prior: Cell, is_batch_start: bool) {
        if is_batch_start {
            self.batches += 1;
        }
        self.entries.push(UndoEntry {
            coords,
            prior,
            is_batch_start,
        });
    }

    /// Pops one batch, newest entry first, handing every entry to `apply_reverse`.
    ///
    /// Returns `false` when there was nothing to undo.
    pub fn undo_batch(&mut self, mut apply_reverse: impl FnMut(Coord2, Cell)) -> bool {
        if self.entries.is_empty() {
            return false;
        }

        while let Some(entry) = self.entries.pop() {
            apply_reverse(entry.coords, entry.prior);
            if entry.is_batch_start {
                self.batches -= 1;
                break;
            }
        }
        true
    }

    /// Undoes every batch, returns how many were undone.
    pub fn drain(&mut self, mut apply_reverse: impl FnMut(Coord2, Cell)) -> usize {
        let mut undone = 0;
        while self.undo_batch(&mut apply_reverse) {
            undone += 1;
        }
        undone
    }

    /// Entries on the log.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Player actions that can still be undone.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.batches = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn cell(count: u8) -> Cell {
        Cell::new(false, false, false, count)
    }

    #[test]
    fn empty_log_has_nothing_to_undo() {
        let mut log = UndoLog::new();
        let mut calls = 0;

        assert!(!log.undo_batch(|_, _| calls += 1));
        assert_eq!(calls, 0);
    }

    #[test]
    fn undo_pops_exactly_one_batch() {
        let mut log = UndoLog::new();
        log.push((0, 0), cell(1), true);
        log.push((5, 5), cell(2), true);
        log.push((5, 6), cell(3), false);
        log.push((6, 6), cell(4), false);
        assert_eq!(log.batches(), 2);
        assert_eq!(log.depth(), 4);

        let mut reverted = Vec::new();
        assert!(log.undo_batch(|coords, prior| reverted.push((coords, prior))));

        assert_eq!(
            reverted,
            vec![((6, 6), cell(4)), ((5, 6), cell(3)), ((5, 5), cell(2))]
        );
        assert_eq!(log.batches(), 1);
        assert_eq!(log.depth(), 1);
    }

    #[test]
    fn drain_empties_the_log() {
        let mut log = UndoLog::new();
        log.push((0, 0), cell(0), true);
        log.push((1, 0), cell(0), false);
        log.push((2, 0), cell(0), true);

        let mut reverted = 0;
        assert_eq!(log.drain(|_, _| reverted += 1), 2);
        assert_eq!(reverted, 3);
        assert!(log.is_empty());
        assert_eq!(log.batches(), 0);
        assert!(!log.undo_batch(|_, _| {}));
    }

    #[test]
    fn clear_drops_without_reverting() {
        let mut log = UndoLog::new();
        log.push((0, 0), cell(0), true);
        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.batches(), 0);
    }
}
