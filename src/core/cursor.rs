use super::position::CharOffset;

/// Caret plus an optional selection anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub position: CharOffset,
    pub goal_column: Option<usize>,
    pub anchor: Option<CharOffset>,
}

impl Cursor {
    pub fn new(position: CharOffset) -> Self {
        Self {
            position,
            goal_column: None,
            anchor: None,
        }
    }

    /// Moves the caret and drops any selection.
    pub fn set_position(&mut self, pos: CharOffset) {
        self.position = pos;
        self.goal_column = None;
        self.anchor = None;
    }

    /// Moves the caret, keeping (or starting) a selection from where it was.
    pub fn extend_to(&mut self, pos: CharOffset) {
        if self.anchor.is_none() {
            self.anchor = Some(self.position);
        }
        self.position = pos;
    }

    pub fn select(&mut self, start: CharOffset, end: CharOffset) {
        self.anchor = Some(start);
        self.position = end;
        self.goal_column = None;
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Ordered selection bounds; `None` when nothing is selected.
    pub fn selection(&self) -> Option<(CharOffset, CharOffset)> {
        let anchor = self.anchor?;
        if anchor < self.position {
            Some((anchor, self.position))
        } else if anchor > self.position {
            Some((self.position, anchor))
        } else {
            None
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    pub fn clamp(&mut self, len: usize) {
        self.position = self.position.min(len);
        if let Some(anchor) = self.anchor {
            self.anchor = Some(anchor.min(len));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_ordered() {
        let mut cursor = Cursor::new(CharOffset(10));
        cursor.extend_to(CharOffset(4));
        assert_eq!(cursor.selection(), Some((CharOffset(4), CharOffset(10))));

        cursor.extend_to(CharOffset(12));
        assert_eq!(cursor.selection(), Some((CharOffset(10), CharOffset(12))));
    }

    #[test]
    fn test_empty_selection_is_none() {
        let mut cursor = Cursor::new(CharOffset(3));
        cursor.extend_to(CharOffset(3));
        assert!(!cursor.has_selection());

        cursor.extend_to(CharOffset(5));
        cursor.set_position(CharOffset(1));
        assert_eq!(cursor.selection(), None);
    }

    #[test]
    fn test_clamp_pulls_back_into_document() {
        let mut cursor = Cursor::new(CharOffset(2));
        cursor.extend_to(CharOffset(20));
        cursor.clamp(8);
        assert_eq!(cursor.selection(), Some((CharOffset(2), CharOffset(8))));
    }
}
