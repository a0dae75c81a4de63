use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ropey::Rope;
use thiserror::Error;

use super::position::CharOffset;
use super::search::{self, Highlight, Rgb};
use super::undo::{Edit, UndoHistory, UndoResult};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Error opening file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error saving file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document has no file path")]
    Untitled,

    #[error("Highlight {start}..{end} is outside a document of {len} characters")]
    HighlightOutOfRange { start: usize, end: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Remove,
    /// The whole content was swapped (load, reset, replace-all).
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub offset: CharOffset,
    /// Characters inserted or removed.
    pub len: usize,
    /// Document length after the change.
    pub doc_len: usize,
}

pub trait ChangeListener {
    fn document_changed(&mut self, change: &Change);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct Document {
    text: Rope,
    path: Option<PathBuf>,
    history: UndoHistory,
    highlight: Option<Highlight>,
    /// History revision last written to disk.
    saved_revision: u64,
    listeners: Vec<(ListenerId, Rc<RefCell<dyn ChangeListener>>)>,
    next_listener: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("len_chars", &self.text.len_chars())
            .field("path", &self.path)
            .field("highlight", &self.highlight)
            .field("modified", &self.is_modified())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            path: None,
            history: UndoHistory::default(),
            highlight: None,
            saved_revision: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn from_string(content: impl AsRef<str>) -> Self {
        let mut doc = Self::new();
        doc.text = Rope::from_str(content.as_ref());
        doc
    }

    pub fn subscribe(&mut self, listener: Rc<RefCell<dyn ChangeListener>>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn notify(&mut self, kind: ChangeKind, offset: CharOffset, len: usize) {
        self.highlight = None;
        let change = Change {
            kind,
            offset,
            len,
            doc_len: self.text.len_chars(),
        };
        for (_, listener) in &self.listeners {
            listener.borrow_mut().document_changed(&change);
        }
    }

    pub fn text(&self) -> &Rope {
        &self.text
    }

    pub fn contents(&self) -> String {
        self.text.to_string()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_untitled(&self) -> bool {
        self.path.is_none()
    }

    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// True while the text differs from what was last loaded or saved,
    /// including after undoing back past that point.
    pub fn is_modified(&self) -> bool {
        self.history.revision() != self.saved_revision
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    pub fn slice(&self, start: CharOffset, end: CharOffset) -> String {
        let start = start.0.min(self.text.len_chars());
        let end = end.0.min(self.text.len_chars());
        if start < end {
            self.text.slice(start..end).to_string()
        } else {
            String::new()
        }
    }

    /// Empties the document and forgets its path and history.
    pub fn reset(&mut self) {
        let removed = self.text.len_chars();
        self.text = Rope::new();
        self.path = None;
        self.history.clear();
        self.saved_revision = self.history.revision();
        self.notify(ChangeKind::Replace, CharOffset(0), removed);
    }

    /// Replaces the content with the file at `path` and binds to it. On
    /// failure nothing about the document changes.
    pub fn load(&mut self, path: &Path) -> Result<(), DocumentError> {
        let read_err = |source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(read_err)?;
        let text = Rope::from_reader(BufReader::new(file)).map_err(read_err)?;

        self.text = text;
        self.path = Some(path.to_path_buf());
        self.history.clear();
        self.saved_revision = self.history.revision();
        let len = self.text.len_chars();
        self.notify(ChangeKind::Replace, CharOffset(0), len);
        Ok(())
    }

    /// Writes the content to the bound path.
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::Untitled)?;
        self.write_to(&path)?;
        self.saved_revision = self.history.revision();
        Ok(())
    }

    /// Writes the content to `path` and binds to it on success.
    pub fn save_as(&mut self, path: PathBuf) -> Result<(), DocumentError> {
        self.write_to(&path)?;
        self.path = Some(path);
        self.saved_revision = self.history.revision();
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<(), DocumentError> {
        let write_err = |source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
        self.text.write_to(&mut writer).map_err(write_err)?;
        writer.flush().map_err(write_err)
    }

    fn apply(&mut self, edit: &Edit) -> usize {
        match edit {
            Edit::Insert { position, text } => {
                let idx = position.0.min(self.text.len_chars());
                self.text.insert(idx, text);
                let len = text.chars().count();
                self.notify(ChangeKind::Insert, CharOffset(idx), len);
                idx + len
            }
            Edit::Delete { position, text } => {
                let start = position.0.min(self.text.len_chars());
                let end = (start + text.chars().count()).min(self.text.len_chars());
                self.text.remove(start..end);
                self.notify(ChangeKind::Remove, CharOffset(start), end - start);
                start
            }
        }
    }

    /// Inserts `text` as a single history entry. Returns the offset just
    /// past the inserted text.
    pub fn insert(&mut self, at: CharOffset, text: &str) -> CharOffset {
        let position = at.min(self.text.len_chars());
        if text.is_empty() {
            return position;
        }
        let edit = Edit::Insert {
            position,
            text: text.to_string(),
        };
        let end = self.apply(&edit);
        self.history.record(edit);
        CharOffset(end)
    }

    /// Removes `start..end` as a single history entry and returns the text.
    pub fn remove(&mut self, start: CharOffset, end: CharOffset) -> String {
        let removed = self.slice(start, end);
        if removed.is_empty() {
            return removed;
        }
        let edit = Edit::Delete {
            position: start,
            text: removed.clone(),
        };
        self.apply(&edit);
        self.history.record(edit);
        removed
    }

    /// Swaps `start..end` for `text` as one history entry. Returns the offset
    /// just past the inserted text.
    pub fn replace_range(&mut self, start: CharOffset, end: CharOffset, text: &str) -> CharOffset {
        let start = start.min(self.text.len_chars());
        let removed = self.slice(start, end);
        let mut edits = Vec::new();
        if !removed.is_empty() {
            edits.push(Edit::Delete {
                position: start,
                text: removed,
            });
        }
        if !text.is_empty() {
            edits.push(Edit::Insert {
                position: start,
                text: text.to_string(),
            });
        }
        if edits.is_empty() {
            return start;
        }

        for edit in &edits {
            self.apply(edit);
        }
        self.history.record_group(edits);
        start.saturating_add(text.chars().count())
    }

    /// Replaces every literal occurrence of `find` in one atomic history
    /// entry. Returns the number of replacements.
    pub fn replace_all(&mut self, find: &str, replace: &str) -> usize {
        let before = self.text.to_string();
        let (after, count) = match search::replace_all(&before, find, replace) {
            Some(result) => result,
            None => return 0,
        };

        self.text = Rope::from_str(&after);
        self.history.record_group(vec![
            Edit::Delete {
                position: CharOffset(0),
                text: before,
            },
            Edit::Insert {
                position: CharOffset(0),
                text: after,
            },
        ]);
        let len = self.text.len_chars();
        self.notify(ChangeKind::Replace, CharOffset(0), len);
        count
    }

    pub fn find(&self, needle: &str) -> Option<(CharOffset, CharOffset)> {
        search::find_first(&self.text, needle)
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn set_highlight(&mut self, start: CharOffset, end: CharOffset) -> Result<(), DocumentError> {
        let len = self.text.len_chars();
        if start > end || end.0 > len {
            return Err(DocumentError::HighlightOutOfRange {
                start: start.0,
                end: end.0,
                len,
            });
        }
        self.highlight = Some(Highlight {
            start,
            end,
            color: Rgb::YELLOW,
        });
        Ok(())
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Reverts the latest history entry. Returns where the caret belongs.
    pub fn undo(&mut self) -> Option<CharOffset> {
        match self.history.undo() {
            UndoResult::Apply(edits) => Some(self.apply_all(&edits)),
            UndoResult::Nothing => None,
        }
    }

    pub fn redo(&mut self) -> Option<CharOffset> {
        match self.history.redo() {
            UndoResult::Apply(edits) => Some(self.apply_all(&edits)),
            UndoResult::Nothing => None,
        }
    }

    fn apply_all(&mut self, edits: &[Edit]) -> CharOffset {
        let mut caret = 0;
        for edit in edits {
            caret = self.apply(edit);
        }
        CharOffset(caret)
    }
}
