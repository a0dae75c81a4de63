use super::position::CharOffset;

/// One invertible change to the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert { position: CharOffset, text: String },
    Delete { position: CharOffset, text: String },
}

impl Edit {
    pub fn inverse(&self) -> Edit {
        match self {
            Edit::Insert { position, text } => Edit::Delete {
                position: *position,
                text: text.clone(),
            },
            Edit::Delete { position, text } => Edit::Insert {
                position: *position,
                text: text.clone(),
            },
        }
    }
}

/// Edits that are undone and redone together.
#[derive(Debug, Clone, Default)]
pub struct UndoGroup {
    /// Unique per recorded group; names the text state the group produces.
    pub revision: u64,
    pub edits: Vec<Edit>,
}

#[derive(Debug)]
pub enum UndoResult {
    /// Edits to apply to the text, in order.
    Apply(Vec<Edit>),
    Nothing,
}

/// Linear undo/redo log. Every recorded edit or group is one entry;
/// recording anything new drops the redo tail.
#[derive(Debug)]
pub struct UndoHistory {
    undo_stack: Vec<UndoGroup>,
    redo_stack: Vec<UndoGroup>,
    /// Revision of the state below the oldest entry still on the stack.
    base: u64,
    next_revision: u64,
    limit: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl UndoHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            base: 0,
            next_revision: 1,
            limit: limit.max(1),
        }
    }

    fn bump_revision(&mut self) -> u64 {
        let revision = self.next_revision;
        self.next_revision += 1;
        revision
    }

    /// Records an edit as its own history entry.
    pub fn record(&mut self, edit: Edit) {
        self.record_group(vec![edit]);
    }

    /// Records several edits as one atomic history entry.
    pub fn record_group(&mut self, edits: Vec<Edit>) {
        if edits.is_empty() {
            return;
        }
        self.redo_stack.clear();
        let revision = self.bump_revision();
        self.undo_stack.push(UndoGroup { revision, edits });
        if self.undo_stack.len() > self.limit {
            let excess = self.undo_stack.len() - self.limit;
            if let Some(last_dropped) = self.undo_stack.drain(..excess).last() {
                self.base = last_dropped.revision;
            }
        }
    }

    /// Identifies the current text state. Equal revisions mean equal text
    /// as long as the history was not cleared in between.
    pub fn revision(&self) -> u64 {
        self.undo_stack.last().map_or(self.base, |group| group.revision)
    }

    pub fn undo(&mut self) -> UndoResult {
        let group = match self.undo_stack.pop() {
            Some(group) => group,
            None => return UndoResult::Nothing,
        };

        let edits = group.edits.iter().rev().map(Edit::inverse).collect();
        self.redo_stack.push(group);
        UndoResult::Apply(edits)
    }

    pub fn redo(&mut self) -> UndoResult {
        let group = match self.redo_stack.pop() {
            Some(group) => group,
            None => return UndoResult::Nothing,
        };

        let edits = group.edits.clone();
        self.undo_stack.push(group);
        UndoResult::Apply(edits)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Forgets every entry. The revision afterwards matches no earlier one.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.base = self.bump_revision();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(pos: usize, text: &str) -> Edit {
        Edit::Insert {
            position: CharOffset(pos),
            text: text.into(),
        }
    }

    fn delete(pos: usize, text: &str) -> Edit {
        Edit::Delete {
            position: CharOffset(pos),
            text: text.into(),
        }
    }

    #[test]
    fn test_undo_returns_inverse() {
        let mut history = UndoHistory::default();
        history.record(insert(0, "hello"));

        match history.undo() {
            UndoResult::Apply(edits) => assert_eq!(edits, vec![delete(0, "hello")]),
            UndoResult::Nothing => panic!("Expected Apply"),
        }
        assert!(matches!(history.undo(), UndoResult::Nothing));
    }

    #[test]
    fn test_group_is_reverted_in_reverse_order() {
        let mut history = UndoHistory::default();
        history.record_group(vec![delete(0, "foo"), insert(0, "bar")]);

        match history.undo() {
            UndoResult::Apply(edits) => {
                assert_eq!(edits, vec![delete(0, "bar"), insert(0, "foo")]);
            }
            UndoResult::Nothing => panic!("Expected Apply"),
        }
    }

    #[test]
    fn test_each_edit_is_its_own_entry() {
        let mut history = UndoHistory::default();
        history.record(insert(0, "a"));
        history.record(insert(1, "b"));
        history.record(delete(1, "b"));

        match history.undo() {
            UndoResult::Apply(edits) => assert_eq!(edits, vec![insert(1, "b")]),
            UndoResult::Nothing => panic!("Expected Apply"),
        }
        match history.undo() {
            UndoResult::Apply(edits) => assert_eq!(edits, vec![delete(1, "b")]),
            UndoResult::Nothing => panic!("Expected Apply"),
        }
        assert!(history.can_undo());
    }

    #[test]
    fn test_revision_follows_undo_and_redo() {
        let mut history = UndoHistory::default();
        let empty = history.revision();
        history.record(insert(0, "a"));
        let after_a = history.revision();
        assert_ne!(after_a, empty);

        history.undo();
        assert_eq!(history.revision(), empty);
        history.redo();
        assert_eq!(history.revision(), after_a);

        history.undo();
        history.record(insert(0, "z"));
        assert_ne!(history.revision(), after_a);
        assert_ne!(history.revision(), empty);
    }

    #[test]
    fn test_clear_starts_a_fresh_revision() {
        let mut history = UndoHistory::default();
        let before = history.revision();
        history.record(insert(0, "a"));
        history.clear();
        assert!(!history.can_undo());
        assert_ne!(history.revision(), before);
    }

    #[test]
    fn test_redo_reapplies() {
        let mut history = UndoHistory::default();
        history.record(insert(0, "hello"));
        history.undo();

        assert!(history.can_redo());
        match history.redo() {
            UndoResult::Apply(edits) => assert_eq!(edits, vec![insert(0, "hello")]),
            UndoResult::Nothing => panic!("Expected Apply"),
        }
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_edit_truncates_redo() {
        let mut history = UndoHistory::default();
        history.record(insert(0, "first"));
        history.record(insert(5, "second"));
        history.undo();
        assert!(history.can_redo());

        history.record(insert(5, "x"));
        assert!(!history.can_redo());
        assert!(matches!(history.redo(), UndoResult::Nothing));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = UndoHistory::new(2);
        history.record(insert(0, "a"));
        history.record(insert(1, "b"));
        history.record(insert(2, "c"));

        let top = history.revision();

        assert!(matches!(history.undo(), UndoResult::Apply(_)));
        assert!(matches!(history.undo(), UndoResult::Apply(_)));
        assert!(matches!(history.undo(), UndoResult::Nothing));

        // Bottom of the trimmed stack is the state after "a", not the start.
        let floor = history.revision();
        assert_ne!(floor, top);
        assert_ne!(floor, UndoHistory::default().revision());
    }
}
