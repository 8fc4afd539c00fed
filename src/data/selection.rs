use super::model::Change;
use crate::error::DatasetError;

/// The list's "current row".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    current: Option<usize>,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The selected row, or `NothingSelected` for button handlers to absorb.
    pub fn require(&self) -> Result<usize, DatasetError> {
        self.current.ok_or(DatasetError::NothingSelected)
    }

    pub fn select(&mut self, index: usize, len: usize) -> Result<(), DatasetError> {
        if index >= len {
            return Err(DatasetError::IndexOutOfRange { index, len });
        }
        self.current = Some(index);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Keep the cursor valid after `change` left the dataset with `len` rows.
    pub fn relocate(&mut self, change: Change, len: usize) {
        let Some(cur) = self.current else {
            return;
        };
        self.current = match change {
            Change::Removed { index } if cur == index => {
                if len == 0 {
                    None
                } else {
                    Some(index.min(len - 1))
                }
            }
            Change::Removed { index } if cur > index => Some(cur - 1),
            Change::Moved { from, to } if cur == from => Some(to),
            // rows between the two positions slide one step toward `from`
            Change::Moved { from, to } if from < to && cur > from && cur <= to => Some(cur - 1),
            Change::Moved { from, to } if to < from && cur >= to && cur < from => Some(cur + 1),
            Change::Cleared => None,
            _ => Some(cur),
        }
        .filter(|&i| i < len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(index: usize) -> SelectionCursor {
        let mut c = SelectionCursor::new();
        c.select(index, usize::MAX).unwrap();
        c
    }

    #[test]
    fn empty_cursor_reports_nothing_selected() {
        let c = SelectionCursor::new();
        assert_eq!(c.current(), None);
        assert_eq!(c.require(), Err(DatasetError::NothingSelected));
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut c = SelectionCursor::new();
        assert_eq!(
            c.select(3, 3),
            Err(DatasetError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(c.current(), None);
    }

    #[test]
    fn delete_of_selected_row_keeps_position() {
        let mut c = at(1);
        c.relocate(Change::Removed { index: 1 }, 3);
        assert_eq!(c.current(), Some(1));
    }

    #[test]
    fn delete_of_last_selected_row_steps_back() {
        let mut c = at(2);
        c.relocate(Change::Removed { index: 2 }, 2);
        assert_eq!(c.current(), Some(1));

        let mut only = at(0);
        only.relocate(Change::Removed { index: 0 }, 0);
        assert_eq!(only.current(), None);
    }

    #[test]
    fn delete_before_cursor_decrements() {
        let mut c = at(3);
        c.relocate(Change::Removed { index: 1 }, 4);
        assert_eq!(c.current(), Some(2));

        let mut after = at(0);
        after.relocate(Change::Removed { index: 2 }, 3);
        assert_eq!(after.current(), Some(0));
    }

    #[test]
    fn moved_row_stays_selected() {
        let mut c = at(1);
        c.relocate(Change::Moved { from: 1, to: 3 }, 5);
        assert_eq!(c.current(), Some(3));
    }

    #[test]
    fn rows_between_move_ends_track_identity() {
        // [a b c d e], move a to 3 -> [b c d a e]; c went from 2 to 1
        let mut c = at(2);
        c.relocate(Change::Moved { from: 0, to: 3 }, 5);
        assert_eq!(c.current(), Some(1));

        // [a b c d e], move d to 0 -> [d a b c e]; a went from 0 to 1
        let mut c = at(0);
        c.relocate(Change::Moved { from: 3, to: 0 }, 5);
        assert_eq!(c.current(), Some(1));

        let mut outside = at(4);
        outside.relocate(Change::Moved { from: 0, to: 3 }, 5);
        assert_eq!(outside.current(), Some(4));
    }

    #[test]
    fn clear_and_updates() {
        let mut c = at(1);
        c.relocate(Change::EntryUpdated { index: 1 }, 2);
        c.relocate(Change::Added { index: 2 }, 3);
        assert_eq!(c.current(), Some(1));
        c.relocate(Change::Cleared, 0);
        assert_eq!(c.require(), Err(DatasetError::NothingSelected));
    }
}
