//! Literal search and replace over document text.
//!
//! Matching is plain substring comparison: no patterns, no case folding and
//! no wraparound.

use ropey::Rope;

use super::position::CharOffset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const YELLOW: Rgb = Rgb(0xff, 0xff, 0x00);
}

/// Marker over the last search match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start: CharOffset,
    pub end: CharOffset,
    pub color: Rgb,
}

impl Highlight {
    pub fn contains(&self, offset: CharOffset) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Char span of the first occurrence of `needle`, searching from the start.
pub fn find_first(text: &Rope, needle: &str) -> Option<(CharOffset, CharOffset)> {
    if needle.is_empty() {
        return None;
    }

    let haystack = text.to_string();
    let byte_idx = haystack.find(needle)?;
    let start = text.byte_to_char(byte_idx);
    Some((CharOffset(start), CharOffset(start + needle.chars().count())))
}

/// Replaces every non-overlapping occurrence of `find`, scanning left to
/// right. Returns the new text and the number of replacements, or `None`
/// when nothing matched.
pub fn replace_all(haystack: &str, find: &str, replace: &str) -> Option<(String, usize)> {
    if find.is_empty() {
        return None;
    }

    let count = haystack.matches(find).count();
    if count == 0 {
        return None;
    }
    Some((haystack.replace(find, replace), count))
}
