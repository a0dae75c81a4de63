use ropey::Rope;

use super::position::{CharOffset, Position};

pub trait RopeExt {
    fn char_to_position(&self, offset: CharOffset) -> Position;
    fn position_to_char(&self, pos: Position) -> CharOffset;
    fn line_len_chars(&self, line_idx: usize) -> usize;
    fn line_start_char(&self, line_idx: usize) -> CharOffset;
    fn line_end_char(&self, line_idx: usize) -> CharOffset;
    /// Line text without its trailing line break.
    fn line_text(&self, line_idx: usize) -> String;
}

impl RopeExt for Rope {
    fn char_to_position(&self, offset: CharOffset) -> Position {
        if self.len_chars() == 0 {
            return Position::new(0, 0);
        }
        let idx = offset.0.min(self.len_chars());
        let line = self.char_to_line(idx);
        Position::new(line, idx - self.line_to_char(line))
    }

    fn position_to_char(&self, pos: Position) -> CharOffset {
        let line = pos.line.min(self.len_lines().saturating_sub(1));
        let column = pos.column.min(self.line_len_chars(line));
        CharOffset(self.line_to_char(line) + column)
    }

    fn line_len_chars(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            return 0;
        }
        let line = self.line(line_idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && line.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    fn line_start_char(&self, line_idx: usize) -> CharOffset {
        CharOffset(self.line_to_char(line_idx.min(self.len_lines().saturating_sub(1))))
    }

    fn line_end_char(&self, line_idx: usize) -> CharOffset {
        let line_idx = line_idx.min(self.len_lines().saturating_sub(1));
        CharOffset(self.line_to_char(line_idx) + self.line_len_chars(line_idx))
    }

    fn line_text(&self, line_idx: usize) -> String {
        if line_idx >= self.len_lines() {
            return String::new();
        }
        self.line(line_idx)
            .chars()
            .take(self.line_len_chars(line_idx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_position() {
        let rope = Rope::from_str("one\ntwo\n");
        assert_eq!(rope.char_to_position(CharOffset(0)), Position::new(0, 0));
        assert_eq!(rope.char_to_position(CharOffset(3)), Position::new(0, 3));
        assert_eq!(rope.char_to_position(CharOffset(4)), Position::new(1, 0));
        assert_eq!(rope.char_to_position(CharOffset(8)), Position::new(2, 0));
        assert_eq!(rope.char_to_position(CharOffset(99)), Position::new(2, 0));
    }

    #[test]
    fn test_position_to_char_clamps_column() {
        let rope = Rope::from_str("one\nthree\n");
        assert_eq!(rope.position_to_char(Position::new(1, 2)), CharOffset(6));
        assert_eq!(rope.position_to_char(Position::new(0, 40)), CharOffset(3));
        assert_eq!(rope.position_to_char(Position::new(9, 0)), CharOffset(10));
    }

    #[test]
    fn test_line_text_strips_crlf() {
        let rope = Rope::from_str("dos\r\nunix\n");
        assert_eq!(rope.line_len_chars(0), 3);
        assert_eq!(rope.line_text(0), "dos");
        assert_eq!(rope.line_text(1), "unix");
        assert_eq!(rope.line_end_char(1), CharOffset(9));
    }
}
