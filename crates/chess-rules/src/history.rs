//! Ordered record of executed moves.

use serde::{Deserialize, Serialize};

use crate::UndoRecord;

/// Stack of undo records, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory {
    records: Vec<UndoRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, record: UndoRecord) {
        self.records.push(record);
    }

    /// Removes and returns the most recent record.
    #[inline]
    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop()
    }

    #[inline]
    pub fn last(&self) -> Option<&UndoRecord> {
        self.records.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records from the first move played.
    pub fn iter(&self) -> std::slice::Iter<'_, UndoRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[UndoRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a MoveHistory {
    type Item = &'a UndoRecord;
    type IntoIter = std::slice::Iter<'a, UndoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_move, Position};
    use chess_core::Move;

    #[test]
    fn push_pop_is_lifo() {
        let position = Position::startpos();
        let (next, first) = make_move(&position, Move::from_uci("e2e4").unwrap());
        let (_, second) = make_move(&next, Move::from_uci("e7e5").unwrap());

        let mut history = MoveHistory::new();
        assert!(history.is_empty());
        history.push(first);
        history.push(second);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(&second));

        let order: Vec<String> = history.iter().map(|r| r.mov.to_uci()).collect();
        assert_eq!(order, ["e2e4", "e7e5"]);

        assert_eq!(history.pop(), Some(second));
        assert_eq!(history.pop(), Some(first));
        assert_eq!(history.pop(), None);
    }
}
