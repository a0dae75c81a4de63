use unicode_width::UnicodeWidthChar;

/// Display columns taken by the first `char_col` chars of `line`, with tabs
/// advancing to the next multiple of `tab_width`.
pub fn visual_column(line: &str, char_col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    line.chars()
        .take(char_col)
        .fold(0, |col, ch| col + char_width(ch, col, tab_width))
}

pub fn char_width(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width - (col % tab_width)
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Scroll state of the text area. `width`/`height` are in cells and cover
/// only the text rows between the menu bar and the status line.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub scroll_line: usize,
    pub scroll_column: usize,
    pub width: u16,
    pub height: u16,
}

impl View {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            scroll_line: 0,
            scroll_column: 0,
            width,
            height,
        }
    }

    pub fn reset(&mut self) {
        self.scroll_line = 0;
        self.scroll_column = 0;
    }

    pub fn text_rows(&self) -> usize {
        self.height as usize
    }

    pub fn scroll_by(&mut self, lines: isize) {
        if lines < 0 {
            self.scroll_line = self.scroll_line.saturating_sub(lines.unsigned_abs());
        } else {
            self.scroll_line = self.scroll_line.saturating_add(lines as usize);
        }
    }

    /// Scrolls the minimum amount that brings `line` / `column` on screen.
    pub fn ensure_visible(&mut self, line: usize, column: usize, total_lines: usize) {
        let rows = self.text_rows().max(1);
        let cols = (self.width as usize).max(1);

        let max_scroll = total_lines.saturating_sub(rows);
        self.scroll_line = self.scroll_line.min(max_scroll.max(line.saturating_sub(rows - 1)));

        if line < self.scroll_line {
            self.scroll_line = line;
        } else if line >= self.scroll_line + rows {
            self.scroll_line = line + 1 - rows;
        }

        if column < self.scroll_column {
            self.scroll_column = column;
        } else if column >= self.scroll_column + cols {
            self.scroll_column = column + 1 - cols;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_column_expands_tabs() {
        assert_eq!(visual_column("\tab", 1, 4), 4);
        assert_eq!(visual_column("a\tb", 2, 4), 4);
        assert_eq!(visual_column("abcd\tx", 5, 4), 8);
        assert_eq!(visual_column("日本", 2, 4), 4);
    }

    #[test]
    fn test_ensure_visible_scrolls_down_and_up() {
        let mut view = View::new(10, 5);
        view.ensure_visible(12, 0, 100);
        assert_eq!(view.scroll_line, 8);

        view.ensure_visible(3, 0, 100);
        assert_eq!(view.scroll_line, 3);

        view.ensure_visible(3, 25, 100);
        assert_eq!(view.scroll_column, 16);
        view.ensure_visible(3, 2, 100);
        assert_eq!(view.scroll_column, 2);
    }

    #[test]
    fn test_ensure_visible_pulls_back_after_shrink() {
        let mut view = View::new(10, 5);
        view.scroll_line = 40;
        view.ensure_visible(1, 0, 3);
        assert_eq!(view.scroll_line, 0);
    }
}
