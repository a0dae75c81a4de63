//! Screen composition shared by both frontends.
//!
//! `Screen::compose` turns the editor state into a grid of styled cells:
//! row 0 is the menu bar, the last row is the status line, and the rows in
//! between show the text. Open menus and dialogs are drawn over the grid.
//! Frontends only decide how each `CellStyle` looks.

use unicode_width::UnicodeWidthChar;

use crate::core::rope_ext::RopeExt;
use crate::core::{CharOffset, Rgb};
use crate::state::dialog::{Dialog, MessageLevel, ReplaceFocus, TextField};
use crate::state::file_chooser::{ChooserFocus, FileChooser};
use crate::state::menu::MenuEntry;
use crate::state::view::{char_width, visual_column};
use crate::state::EditorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Text,
    Selection,
    Highlight(Rgb),
    Filler,
    MenuBar,
    MenuTitleOpen,
    MenuItem,
    MenuItemSelected,
    MenuSeparator,
    Status,
    Dialog,
    DialogTitle,
    DialogField,
    DialogSelected,
    DialogHint,
    DialogError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// `'\0'` marks the trailing half of a double-width character.
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        style: CellStyle::Text,
    };
}

#[derive(Debug, Clone)]
pub struct Screen {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    /// Where the frontend should draw its caret.
    pub cursor: Option<(u16, u16)>,
}

const DIALOG_LIST_ROWS: usize = 10;

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
            cursor: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row as usize * self.width as usize + col as usize)
    }

    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.width as usize;
        let end = (start + self.width as usize).min(self.cells.len());
        self.cells.get(start..end).unwrap_or(&[])
    }

    /// Row contents as plain text, skipping wide-char continuation cells.
    pub fn row_text(&self, row: u16) -> String {
        self.row(row).iter().filter(|c| c.ch != '\0').map(|c| c.ch).collect()
    }

    fn set(&mut self, col: u16, row: u16, ch: char, style: CellStyle) {
        if col < self.width && row < self.height {
            let idx = row as usize * self.width as usize + col as usize;
            self.cells[idx] = Cell { ch, style };
        }
    }

    fn fill(&mut self, row: u16, from: u16, to: u16, style: CellStyle) {
        for col in from..to.min(self.width) {
            self.set(col, row, ' ', style);
        }
    }

    /// Writes `text` starting at `col`, clipped at `limit`. Returns the
    /// column after the last cell written.
    fn put_str(&mut self, col: u16, row: u16, limit: u16, text: &str, style: CellStyle) -> u16 {
        let limit = limit.min(self.width);
        let mut col = col;
        for ch in text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col + w > limit {
                break;
            }
            self.set(col, row, ch, style);
            if w == 2 {
                self.set(col + 1, row, '\0', style);
            }
            col += w;
        }
        col
    }

    pub fn compose(state: &EditorState, width: u16, height: u16) -> Screen {
        let mut screen = Screen::new(width, height);
        if width == 0 || height == 0 {
            return screen;
        }

        screen.draw_text(state);
        screen.draw_status(state);
        screen.draw_menu_bar(state);

        if state.menu.is_open() {
            screen.draw_open_menu(state);
        } else if let Some(dialog) = &state.dialog {
            screen.draw_dialog(dialog);
        }
        screen
    }

    fn draw_text(&mut self, state: &EditorState) {
        let text = state.document.text();
        let view = &state.view;
        let rows = self.height.saturating_sub(2);
        let selection = state.cursor.selection();
        let highlight = state.document.highlight().copied();
        let tab_width = state.tab_width;
        let first_col = view.scroll_column;

        for r in 0..rows {
            let screen_row = r + 1;
            let line_idx = view.scroll_line + r as usize;
            if line_idx >= text.len_lines() {
                self.set(0, screen_row, '~', CellStyle::Filler);
                continue;
            }

            let line_start = text.line_start_char(line_idx).0;
            let mut visual = 0usize;
            for (i, ch) in text.line_text(line_idx).chars().enumerate() {
                let w = char_width(ch, visual, tab_width);
                let offset = CharOffset(line_start + i);
                let style = match (selection, highlight) {
                    (Some((start, end)), _) if offset >= start && offset < end => CellStyle::Selection,
                    (_, Some(h)) if h.contains(offset) => CellStyle::Highlight(h.color),
                    _ => CellStyle::Text,
                };

                for k in 0..w {
                    let col = visual + k;
                    if col < first_col {
                        continue;
                    }
                    let screen_col = col - first_col;
                    if screen_col >= self.width as usize {
                        break;
                    }
                    let glyph = if ch == '\t' {
                        ' '
                    } else if k == 0 {
                        ch
                    } else {
                        '\0'
                    };
                    self.set(screen_col as u16, screen_row, glyph, style);
                }
                visual += w;
                if visual >= first_col + self.width as usize {
                    break;
                }
            }
        }

        let pos = text.char_to_position(state.cursor.position);
        let caret_col = visual_column(&text.line_text(pos.line), pos.column, tab_width);
        if pos.line >= view.scroll_line
            && pos.line < view.scroll_line + rows as usize
            && caret_col >= first_col
            && caret_col < first_col + self.width as usize
        {
            self.cursor = Some(((caret_col - first_col) as u16, (pos.line - view.scroll_line) as u16 + 1));
        }
    }

    fn draw_status(&mut self, state: &EditorState) {
        let row = self.height - 1;
        if row == 0 {
            return;
        }
        self.fill(row, 0, self.width, CellStyle::Status);

        let left = format!(" {}", state.status.borrow().text());
        self.put_str(0, row, self.width, &left, CellStyle::Status);

        let text = state.document.text();
        let pos = text.char_to_position(state.cursor.position);
        let right = format!("Ln {}, Col {} ", pos.line + 1, pos.column + 1);
        let right_width = right.chars().count() as u16;
        let left_width = left.chars().count() as u16;
        if left_width + right_width + 1 < self.width {
            self.put_str(self.width - right_width, row, self.width, &right, CellStyle::Status);
        }
    }

    fn menu_title_columns(state: &EditorState) -> Vec<u16> {
        let mut cols = Vec::new();
        let mut col = 1u16;
        for menu in state.menu.menus() {
            cols.push(col);
            col += menu.title.chars().count() as u16 + 2;
        }
        cols
    }

    fn draw_menu_bar(&mut self, state: &EditorState) {
        self.fill(0, 0, self.width, CellStyle::MenuBar);
        let cols = Self::menu_title_columns(state);
        for (idx, (menu, col)) in state.menu.menus().iter().zip(cols).enumerate() {
            let style = if state.menu.open_index() == Some(idx) {
                CellStyle::MenuTitleOpen
            } else {
                CellStyle::MenuBar
            };
            let label = format!(" {} ", menu.title);
            self.put_str(col.saturating_sub(1), 0, self.width, &label, style);
        }
    }

    fn draw_open_menu(&mut self, state: &EditorState) {
        let idx = match state.menu.open_index() {
            Some(idx) => idx,
            None => return,
        };
        let menu = match state.menu.open_menu() {
            Some(menu) => menu,
            None => return,
        };
        let left = Self::menu_title_columns(state)
            .get(idx)
            .copied()
            .unwrap_or(1)
            .saturating_sub(1);

        let rows: Vec<(String, String)> = menu
            .entries
            .iter()
            .map(|entry| match entry {
                MenuEntry::Item { label, command } => (
                    label.to_string(),
                    state
                        .keymap
                        .accelerator(*command)
                        .map(|k| k.to_string())
                        .unwrap_or_default(),
                ),
                MenuEntry::Separator => (String::new(), String::new()),
            })
            .collect();
        let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let accel_width = rows.iter().map(|(_, a)| a.chars().count()).max().unwrap_or(0);
        let inner = (label_width + accel_width + 4) as u16;
        let right = (left + inner).min(self.width);

        for (i, (entry, (label, accel))) in menu.entries.iter().zip(rows.iter()).enumerate() {
            let row = 1 + i as u16;
            if row >= self.height {
                break;
            }
            match entry {
                MenuEntry::Separator => {
                    self.fill(row, left, right, CellStyle::MenuItem);
                    for col in left + 1..right.saturating_sub(1) {
                        self.set(col, row, '─', CellStyle::MenuSeparator);
                    }
                }
                MenuEntry::Item { .. } => {
                    let style = if state.menu.selected() == i {
                        CellStyle::MenuItemSelected
                    } else {
                        CellStyle::MenuItem
                    };
                    self.fill(row, left, right, style);
                    self.put_str(left + 1, row, right, label, style);
                    let accel_col = right.saturating_sub(accel.chars().count() as u16 + 1);
                    self.put_str(accel_col, row, right, accel, style);
                }
            }
        }
    }

    fn draw_dialog(&mut self, dialog: &Dialog) {
        let mut body = DialogBody::default();
        match dialog {
            Dialog::Find(find) => {
                body.field("Find what: ", &find.term, true);
                body.blank();
                body.hint("Enter: Find   Esc: Cancel");
            }
            Dialog::Replace(replace) => {
                body.field("Find what:    ", &replace.find, replace.focus == ReplaceFocus::Find);
                body.field("Replace with: ", &replace.replace, replace.focus == ReplaceFocus::Replace);
                body.blank();
                body.hint("Tab: Next field   Enter: Replace All   Esc: Cancel");
            }
            Dialog::File(chooser) => body.file_chooser(chooser),
            Dialog::Font(font) => {
                body.field("Filter: ", &font.filter, true);
                body.blank();
                let families = font.visible();
                body.list(
                    families.iter().map(|f| f.to_string()).collect(),
                    font.selected(),
                    true,
                );
                body.blank();
                body.hint("Type to filter   Enter: Apply   Esc: Cancel");
            }
            Dialog::Message(message) => {
                let style = match message.level() {
                    MessageLevel::Info => CellStyle::Dialog,
                    MessageLevel::Error => CellStyle::DialogError,
                };
                body.line(message.text().to_string(), style);
                body.blank();
                body.hint("[ OK ]");
            }
        }
        self.draw_box(dialog.title(), &body);
    }

    fn draw_box(&mut self, title: &str, body: &DialogBody) {
        let content_width = body
            .lines
            .iter()
            .map(|(text, _)| text.chars().count())
            .chain(std::iter::once(title.chars().count() + 2))
            .max()
            .unwrap_or(0)
            .max(36);
        let box_width = ((content_width + 4) as u16).min(self.width);
        let box_height = ((body.lines.len() + 2) as u16).min(self.height);
        let left = (self.width - box_width) / 2;
        let top = (self.height - box_height) / 2;
        let right = left + box_width;

        self.fill(top, left, right, CellStyle::DialogTitle);
        let title = format!(" {} ", title);
        self.put_str(left + 1, top, right, &title, CellStyle::DialogTitle);

        for (i, (text, style)) in body.lines.iter().enumerate() {
            let row = top + 1 + i as u16;
            if row >= top + box_height {
                break;
            }
            self.fill(row, left, right, CellStyle::Dialog);
            self.put_str(left + 2, row, right.saturating_sub(2), text, *style);
            if let CellStyle::DialogSelected = style {
                let end = right.saturating_sub(2);
                for col in left + 2..end {
                    if let Some(cell) = self.cell(col, row).copied() {
                        self.set(col, row, cell.ch, CellStyle::DialogSelected);
                    }
                }
            }
        }
        let bottom = top + box_height - 1;
        if bottom > top {
            self.fill(bottom, left, right, CellStyle::Dialog);
        }

        self.cursor = body.cursor.and_then(|(line, col)| {
            let row = top + 1 + line as u16;
            let col = left + 2 + col as u16;
            (row < top + box_height && col < right).then_some((col, row))
        });
    }
}

/// Lines of a dialog before they are boxed, plus the caret inside them.
#[derive(Default)]
struct DialogBody {
    lines: Vec<(String, CellStyle)>,
    cursor: Option<(usize, usize)>,
}

impl DialogBody {
    fn line(&mut self, text: String, style: CellStyle) {
        self.lines.push((text, style));
    }

    fn blank(&mut self) {
        self.line(String::new(), CellStyle::Dialog);
    }

    fn hint(&mut self, text: &str) {
        self.line(text.to_string(), CellStyle::DialogHint);
    }

    fn field(&mut self, label: &str, field: &TextField, focused: bool) {
        let style = if focused {
            CellStyle::DialogField
        } else {
            CellStyle::Dialog
        };
        if focused {
            self.cursor = Some((self.lines.len(), label.chars().count() + field.cursor_column()));
        }
        self.line(format!("{}{}", label, field.text()), style);
    }

    /// Scrolling window of at most `DIALOG_LIST_ROWS` entries around the
    /// selection.
    fn list(&mut self, items: Vec<String>, selected: usize, focused: bool) {
        if items.is_empty() {
            self.line("(nothing to show)".to_string(), CellStyle::DialogHint);
            return;
        }
        let first = selected.saturating_sub(DIALOG_LIST_ROWS - 1);
        for (i, item) in items.iter().enumerate().skip(first).take(DIALOG_LIST_ROWS) {
            let style = if i == selected && focused {
                CellStyle::DialogSelected
            } else if i == selected {
                CellStyle::DialogField
            } else {
                CellStyle::Dialog
            };
            self.line(item.clone(), style);
        }
    }

    fn file_chooser(&mut self, chooser: &FileChooser) {
        self.line(format!("Folder: {}", chooser.dir().display()), CellStyle::Dialog);
        self.blank();
        if let Some(error) = chooser.error() {
            self.line(error.to_string(), CellStyle::DialogError);
        }
        let items = chooser
            .entries()
            .iter()
            .map(|e| if e.is_dir { format!("{}/", e.name) } else { e.name.clone() })
            .collect();
        self.list(items, chooser.selected(), chooser.focus() == ChooserFocus::List);
        self.blank();
        self.field("File name: ", &chooser.name, chooser.focus() == ChooserFocus::Name);
        self.line(
            format!("Type:      {}  < >", chooser.filter().label()),
            CellStyle::Dialog,
        );
        self.blank();
        self.hint("Tab: Name/List   Enter: Choose   Backspace: Up   Esc: Cancel");
    }
}
