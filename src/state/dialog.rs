//! Modal dialogs. While one is open it receives every key; the editor acts
//! only on the `DialogResult` it hands back.

use std::path::PathBuf;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::core::FileFilter;
use crate::keybinding::{Key, KeyEvent};

use super::file_chooser::FileChooser;

/// Single-line text input. The cursor is a byte index that always sits on
/// a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Display width of the text before the cursor.
    pub fn cursor_column(&self) -> usize {
        UnicodeWidthStr::width(&self.text[..self.cursor])
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_backward(&mut self) {
        if self.cursor > 0 {
            let start = self.prev_boundary();
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let end = self.next_boundary();
            self.text.replace_range(self.cursor..end, "");
        }
    }

    pub fn move_backward(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_forward(&mut self) {
        self.cursor = self.next_boundary();
    }

    /// Applies an editing key. Returns false for keys the field ignores.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(c) = key.printable_char() {
            self.insert_char(c);
            return true;
        }
        match key.key {
            Key::Backspace => self.delete_backward(),
            Key::Delete => self.delete_forward(),
            Key::Left => self.move_backward(),
            Key::Right => self.move_forward(),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.text.len(),
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Find(String),
    Replace { find: String, replace: String },
    Open(PathBuf),
    SaveAs { path: PathBuf, filter: FileFilter },
    Font(String),
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Pending,
    Cancelled,
    Submit(DialogResult),
}

#[derive(Debug, Clone, Default)]
pub struct FindDialog {
    pub term: TextField,
}

impl FindDialog {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match key.key {
            Key::Escape => DialogOutcome::Cancelled,
            Key::Enter if self.term.is_empty() => DialogOutcome::Cancelled,
            Key::Enter => DialogOutcome::Submit(DialogResult::Find(self.term.text().to_string())),
            _ => {
                self.term.handle_key(key);
                DialogOutcome::Pending
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceFocus {
    #[default]
    Find,
    Replace,
}

#[derive(Debug, Clone, Default)]
pub struct ReplaceDialog {
    pub find: TextField,
    pub replace: TextField,
    pub focus: ReplaceFocus,
}

impl ReplaceDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_field(&self) -> &TextField {
        match self.focus {
            ReplaceFocus::Find => &self.find,
            ReplaceFocus::Replace => &self.replace,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match key.key {
            Key::Escape => DialogOutcome::Cancelled,
            Key::Tab | Key::Up | Key::Down => {
                self.focus = match self.focus {
                    ReplaceFocus::Find => ReplaceFocus::Replace,
                    ReplaceFocus::Replace => ReplaceFocus::Find,
                };
                DialogOutcome::Pending
            }
            Key::Enter => DialogOutcome::Submit(DialogResult::Replace {
                find: self.find.text().to_string(),
                replace: self.replace.text().to_string(),
            }),
            _ => {
                match self.focus {
                    ReplaceFocus::Find => self.find.handle_key(key),
                    ReplaceFocus::Replace => self.replace.handle_key(key),
                };
                DialogOutcome::Pending
            }
        }
    }
}

/// Family picker with type-to-filter.
#[derive(Debug, Clone)]
pub struct FontDialog {
    families: Vec<String>,
    pub filter: TextField,
    selected: usize,
}

impl FontDialog {
    pub fn new(families: Vec<String>, current: &str) -> Self {
        let selected = families.iter().position(|f| f == current).unwrap_or(0);
        Self {
            families,
            filter: TextField::new(),
            selected,
        }
    }

    /// Families matching the filter, case-insensitively.
    pub fn visible(&self) -> Vec<&str> {
        let needle = self.filter.text().to_lowercase();
        self.families
            .iter()
            .filter(|f| f.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_family(&self) -> Option<&str> {
        self.visible().get(self.selected).copied()
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match key.key {
            Key::Escape => DialogOutcome::Cancelled,
            Key::Enter => match self.selected_family() {
                Some(family) => DialogOutcome::Submit(DialogResult::Font(family.to_string())),
                None => DialogOutcome::Pending,
            },
            Key::Up => {
                self.move_selection(-1);
                DialogOutcome::Pending
            }
            Key::Down => {
                self.move_selection(1);
                DialogOutcome::Pending
            }
            Key::PageUp => {
                self.move_selection(-10);
                DialogOutcome::Pending
            }
            Key::PageDown => {
                self.move_selection(10);
                DialogOutcome::Pending
            }
            _ => {
                let before = self.filter.text().to_string();
                self.filter.handle_key(key);
                if self.filter.text() != before {
                    self.selected = 0;
                }
                DialogOutcome::Pending
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct MessageDialog {
    title: String,
    text: String,
    level: MessageLevel,
}

impl MessageDialog {
    pub fn new(title: impl Into<String>, text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            level,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn level(&self) -> MessageLevel {
        self.level
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match key.key {
            Key::Enter | Key::Escape | Key::Char(' ') => DialogOutcome::Submit(DialogResult::Dismissed),
            _ => DialogOutcome::Pending,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Dialog {
    Find(FindDialog),
    Replace(ReplaceDialog),
    File(FileChooser),
    Font(FontDialog),
    Message(MessageDialog),
}

impl Dialog {
    pub fn title(&self) -> &str {
        match self {
            Dialog::Find(_) => "Find",
            Dialog::Replace(_) => "Replace",
            Dialog::File(chooser) => chooser.mode().title(),
            Dialog::Font(_) => "Font",
            Dialog::Message(message) => &message.title,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match self {
            Dialog::Find(dialog) => dialog.handle_key(key),
            Dialog::Replace(dialog) => dialog.handle_key(key),
            Dialog::File(chooser) => chooser.handle_key(key),
            Dialog::Font(dialog) => dialog.handle_key(key),
            Dialog::Message(dialog) => dialog.handle_key(key),
        }
    }
}
