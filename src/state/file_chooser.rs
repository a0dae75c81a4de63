use std::fs;
use std::path::{Path, PathBuf};

use crate::core::FileFilter;
use crate::keybinding::{Key, KeyEvent};

use super::dialog::{DialogOutcome, DialogResult, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserMode {
    Open,
    Save,
}

impl ChooserMode {
    pub fn title(self) -> &'static str {
        match self {
            ChooserMode::Open => "Open",
            ChooserMode::Save => "Save As",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserFocus {
    Name,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Directory-listing file picker shared by Open and Save As.
#[derive(Debug, Clone)]
pub struct FileChooser {
    mode: ChooserMode,
    dir: PathBuf,
    filter: FileFilter,
    entries: Vec<ChooserEntry>,
    selected: usize,
    pub name: TextField,
    focus: ChooserFocus,
    error: Option<String>,
}

impl FileChooser {
    pub fn new(mode: ChooserMode, dir: PathBuf, filter: FileFilter) -> Self {
        let focus = match mode {
            ChooserMode::Open => ChooserFocus::List,
            ChooserMode::Save => ChooserFocus::Name,
        };
        let dir = std::path::absolute(&dir).unwrap_or(dir);
        let mut chooser = Self {
            mode,
            dir,
            filter,
            entries: Vec::new(),
            selected: 0,
            name: TextField::new(),
            focus,
            error: None,
        };
        chooser.refresh();
        chooser
    }

    pub fn mode(&self) -> ChooserMode {
        self.mode
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn filter(&self) -> FileFilter {
        self.filter
    }

    pub fn entries(&self) -> &[ChooserEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn focus(&self) -> ChooserFocus {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-reads the directory: `..` first, then subdirectories, then files
    /// passing the active filter, each group sorted by name. Dotfiles are
    /// skipped.
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected = 0;
        self.error = None;

        if self.parent_dir().is_some() {
            self.entries.push(ChooserEntry {
                name: "..".to_string(),
                is_dir: true,
            });
        }

        let read = match fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(e) => {
                log::warn!("cannot list {}: {}", self.dir.display(), e);
                self.error = Some(format!("Cannot read folder: {}", e));
                return;
            }
        };

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in read.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                dirs.push(name);
            } else if self.filter.matches(&path) {
                files.push(name);
            }
        }
        dirs.sort_by_key(|n| n.to_lowercase());
        files.sort_by_key(|n| n.to_lowercase());

        self.entries.extend(dirs.into_iter().map(|name| ChooserEntry { name, is_dir: true }));
        self.entries.extend(files.into_iter().map(|name| ChooserEntry { name, is_dir: false }));
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.refresh();
    }

    /// A relative single-component dir has `""` as its parent, which is
    /// not a folder.
    fn parent_dir(&self) -> Option<&Path> {
        self.dir.parent().filter(|p| !p.as_os_str().is_empty())
    }

    fn go_parent(&mut self) {
        if let Some(parent) = self.parent_dir() {
            let parent = parent.to_path_buf();
            self.change_dir(parent);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
        if let Some(entry) = self.entries.get(self.selected) {
            if !entry.is_dir {
                let name = entry.name.clone();
                self.name.set_text(name);
            }
        }
    }

    fn set_filter(&mut self, filter: FileFilter) {
        self.filter = filter;
        self.refresh();
    }

    fn submit_path(&self, path: PathBuf) -> DialogOutcome {
        let result = match self.mode {
            ChooserMode::Open => DialogResult::Open(path),
            ChooserMode::Save => DialogResult::SaveAs {
                path,
                filter: self.filter,
            },
        };
        DialogOutcome::Submit(result)
    }

    fn activate_entry(&mut self) -> DialogOutcome {
        let entry = match self.entries.get(self.selected) {
            Some(entry) => entry.clone(),
            None => return DialogOutcome::Pending,
        };
        if entry.name == ".." {
            self.go_parent();
            DialogOutcome::Pending
        } else if entry.is_dir {
            let dir = self.dir.join(&entry.name);
            self.change_dir(dir);
            DialogOutcome::Pending
        } else {
            self.submit_path(self.dir.join(&entry.name))
        }
    }

    /// Typed names are relative to the current folder unless absolute. A
    /// name that is a folder navigates into it.
    fn activate_name(&mut self) -> DialogOutcome {
        if self.name.is_empty() {
            return match self.mode {
                ChooserMode::Open => self.activate_entry(),
                ChooserMode::Save => DialogOutcome::Pending,
            };
        }

        let path = self.dir.join(self.name.text());
        if path.is_dir() {
            self.name.clear();
            self.change_dir(path);
            return DialogOutcome::Pending;
        }
        self.submit_path(path)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        match key.key {
            Key::Escape => return DialogOutcome::Cancelled,
            Key::Tab => {
                self.focus = match self.focus {
                    ChooserFocus::Name => ChooserFocus::List,
                    ChooserFocus::List => ChooserFocus::Name,
                };
                return DialogOutcome::Pending;
            }
            Key::Up => {
                self.move_selection(-1);
                return DialogOutcome::Pending;
            }
            Key::Down => {
                self.move_selection(1);
                return DialogOutcome::Pending;
            }
            Key::PageUp => {
                self.move_selection(-10);
                return DialogOutcome::Pending;
            }
            Key::PageDown => {
                self.move_selection(10);
                return DialogOutcome::Pending;
            }
            _ => {}
        }

        match self.focus {
            ChooserFocus::List => match key.key {
                Key::Enter => self.activate_entry(),
                Key::Backspace => {
                    self.go_parent();
                    DialogOutcome::Pending
                }
                Key::Left => {
                    self.set_filter(self.filter.prev());
                    DialogOutcome::Pending
                }
                Key::Right => {
                    self.set_filter(self.filter.next());
                    DialogOutcome::Pending
                }
                _ => {
                    // Typing in the list starts a file name.
                    if key.printable_char().is_some() {
                        self.focus = ChooserFocus::Name;
                        self.name.handle_key(key);
                    }
                    DialogOutcome::Pending
                }
            },
            ChooserFocus::Name => match key.key {
                Key::Enter => self.activate_name(),
                _ => {
                    self.name.handle_key(key);
                    DialogOutcome::Pending
                }
            },
        }
    }
}
