use std::cmp::Ordering;

/// Offset into a document measured in Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct CharOffset(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

impl CharOffset {
    pub fn saturating_sub(self, rhs: usize) -> Self {
        CharOffset(self.0.saturating_sub(rhs))
    }

    pub fn saturating_add(self, rhs: usize) -> Self {
        CharOffset(self.0.saturating_add(rhs))
    }

    pub fn min(self, len: usize) -> Self {
        CharOffset(self.0.min(len))
    }
}

impl From<usize> for CharOffset {
    fn from(n: usize) -> Self {
        CharOffset(n)
    }
}

impl From<CharOffset> for usize {
    fn from(offset: CharOffset) -> Self {
        offset.0
    }
}
