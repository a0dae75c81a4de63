use std::cell::RefCell;
use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::commands::{self, editing, file_cmds, format_cmds, search_cmds, Command, CommandResult};
use crate::config::Config;
use crate::core::rope_ext::RopeExt;
use crate::core::{CharOffset, Clipboard, Cursor, Document, FileFilter, FontSetting};
use crate::keybinding::default::default_keymap;
use crate::keybinding::{KeyEvent, KeyMap, KeyResolution};

use super::dialog::{Dialog, DialogOutcome, DialogResult, MessageDialog, MessageLevel};
use super::menu::{MenuBar, MenuOutcome};
use super::status::StatusBar;
use super::view::{visual_column, View};

pub struct EditorState {
    pub document: Document,
    pub cursor: Cursor,
    pub view: View,
    pub menu: MenuBar,
    pub dialog: Option<Dialog>,
    pub clipboard: Clipboard,
    pub keymap: KeyMap,
    pub status: Rc<RefCell<StatusBar>>,
    pub font: FontSetting,
    pub font_families: Vec<String>,
    pub chooser_dir: PathBuf,
    pub file_filter: FileFilter,
    pub tab_width: usize,
    pub last_command: Option<Command>,
    pub should_quit: bool,
}

impl EditorState {
    pub fn new(config: &Config) -> Self {
        let mut document = Document::new();
        let status = Rc::new(RefCell::new(StatusBar::new(document.len_chars())));
        document.subscribe(status.clone());

        let chooser_dir = config
            .file
            .as_ref()
            .and_then(|f| f.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("/"));

        Self {
            document,
            cursor: Cursor::default(),
            view: View::new(80, 22),
            menu: MenuBar::new(),
            dialog: None,
            clipboard: Clipboard::new(config.system_clipboard),
            keymap: default_keymap(),
            status,
            font: config.font.clone(),
            font_families: Vec::new(),
            chooser_dir,
            file_filter: FileFilter::default(),
            tab_width: config.tab_width.max(1),
            last_command: None,
            should_quit: false,
        }
    }

    /// Window title: document name, with `*` while there are unsaved edits.
    pub fn title(&self) -> String {
        let marker = if self.document.is_modified() { "*" } else { "" };
        format!("{}{} - Plume", marker, self.document.name())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(mut dialog) = self.dialog.take() {
            let outcome = dialog.handle_key(key);
            if let Dialog::File(chooser) = &dialog {
                self.chooser_dir = chooser.dir().to_path_buf();
                self.file_filter = chooser.filter();
            }
            match outcome {
                DialogOutcome::Pending => self.dialog = Some(dialog),
                DialogOutcome::Cancelled => log::debug!("{} dialog cancelled", dialog.title()),
                DialogOutcome::Submit(result) => self.handle_dialog_result(result),
            }
            return;
        }

        if self.menu.is_open() {
            if let MenuOutcome::Activate(command) = self.menu.handle_key(key) {
                self.execute(command);
            }
            return;
        }

        match self.keymap.resolve(key) {
            KeyResolution::Command(command) => self.execute(command),
            KeyResolution::SelfInsert(c) => {
                let result = editing::self_insert(self, c);
                self.report(result);
                self.reveal_cursor();
            }
            KeyResolution::Unbound => log::trace!("{} is undefined", key),
        }
    }

    pub fn execute(&mut self, command: Command) {
        log::debug!("command: {}", command.name());
        let result = commands::execute(self, command);
        self.report(result);
        self.last_command = Some(command);
        self.reveal_cursor();
    }

    /// Opens `path` outside the file chooser, e.g. from the command line.
    pub fn open_file(&mut self, path: &Path) {
        let result = file_cmds::open_path(self, path);
        self.report(result);
        self.reveal_cursor();
    }

    fn handle_dialog_result(&mut self, result: DialogResult) {
        let reveal = !matches!(result, DialogResult::Find(_) | DialogResult::Dismissed);
        let outcome = match result {
            DialogResult::Find(term) => search_cmds::find_text(self, &term),
            DialogResult::Replace { find, replace } => {
                search_cmds::replace_text(self, &find, &replace)
            }
            DialogResult::Open(path) => file_cmds::open_path(self, &path),
            DialogResult::SaveAs { path, filter } => file_cmds::save_as_path(self, path, filter),
            DialogResult::Font(family) => format_cmds::apply_font(self, &family),
            DialogResult::Dismissed => Ok(()),
        };
        self.report(outcome);
        if reveal {
            self.reveal_cursor();
        }
    }

    fn report(&mut self, result: CommandResult) {
        if let Err(e) = result {
            log::warn!("{}", e);
            if let Some(text) = e.notification() {
                self.show_error(text);
            }
        }
    }

    pub fn show_info(&mut self, title: &str, text: &str) {
        self.dialog = Some(Dialog::Message(MessageDialog::new(title, text, MessageLevel::Info)));
    }

    pub fn show_error(&mut self, text: &str) {
        self.dialog = Some(Dialog::Message(MessageDialog::new("Error", text, MessageLevel::Error)));
    }

    /// Scrolls so that `offset` is on screen.
    pub fn scroll_to(&mut self, offset: CharOffset) {
        let text = self.document.text();
        let pos = text.char_to_position(offset);
        let column = visual_column(&text.line_text(pos.line), pos.column, self.tab_width);
        self.view.ensure_visible(pos.line, column, text.len_lines());
    }

    fn reveal_cursor(&mut self) {
        let len = self.document.len_chars();
        self.cursor.clamp(len);
        self.scroll_to(self.cursor.position);
    }

    /// Sets the size of the whole screen in cells. The text area loses one
    /// row to the menu bar and one to the status line.
    pub fn set_dimensions(&mut self, width: u16, height: u16) {
        self.view.width = width;
        self.view.height = height.saturating_sub(2);
        self.reveal_cursor();
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> EditorState {
    let config = Config {
        system_clipboard: false,
        ..Config::default()
    };
    EditorState::new(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinding::key::{Key, Modifiers};
    use crate::state::menu::MenuId;

    fn type_keys(state: &mut EditorState, text: &str) {
        for c in text.chars() {
            state.handle_key(KeyEvent::char(c));
        }
    }

    fn press(state: &mut EditorState, key: Key) {
        state.handle_key(KeyEvent::plain(key));
    }

    #[test]
    fn test_starts_untitled_and_empty() {
        let state = test_state();
        assert!(state.document.is_empty());
        assert!(state.document.is_untitled());
        assert_eq!(state.status.borrow().text(), "Length: 0");
        assert_eq!(state.title(), "Untitled - Plume");
    }

    #[test]
    fn test_typing_updates_status_and_title() {
        let mut state = test_state();
        type_keys(&mut state, "hello");
        assert_eq!(state.document.contents(), "hello");
        assert_eq!(state.status.borrow().text(), "Length: 5");
        assert_eq!(state.title(), "*Untitled - Plume");
    }

    #[test]
    fn test_undo_reverts_only_the_last_keystroke() {
        let mut state = test_state();
        type_keys(&mut state, "ab");
        state.handle_key(KeyEvent::ctrl('z'));
        assert_eq!(state.document.contents(), "a");
        assert_eq!(state.cursor.position, CharOffset(1));
    }

    #[test]
    fn test_undo_redo_through_keys() {
        let mut state = test_state();
        type_keys(&mut state, "one");
        state.handle_key(KeyEvent::ctrl('a'));
        type_keys(&mut state, "two");
        assert_eq!(state.document.contents(), "two");

        state.handle_key(KeyEvent::ctrl('z'));
        assert_eq!(state.document.contents(), "tw");
        state.handle_key(KeyEvent::ctrl('z'));
        assert_eq!(state.document.contents(), "t");
        // Typing over the selection replaced it in one step.
        state.handle_key(KeyEvent::ctrl('z'));
        assert_eq!(state.document.contents(), "one");

        for _ in 0..3 {
            state.handle_key(KeyEvent::ctrl('y'));
        }
        assert_eq!(state.document.contents(), "two");
    }

    #[test]
    fn test_title_marker_clears_when_undone_to_saved_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.txt");
        std::fs::write(&path, "x").unwrap();

        let mut state = test_state();
        state.open_file(&path);
        press(&mut state, Key::End);
        type_keys(&mut state, "y");
        assert_eq!(state.title(), "*clean.txt - Plume");

        state.handle_key(KeyEvent::ctrl('z'));
        assert_eq!(state.title(), "clean.txt - Plume");
    }

    #[test]
    fn test_menu_activation() {
        let mut state = test_state();
        type_keys(&mut state, "text");
        press(&mut state, Key::F(10));
        assert!(state.menu.is_open());
        assert_eq!(state.menu.open_menu().map(|m| m.id), Some(MenuId::File));

        // File > New
        press(&mut state, Key::Enter);
        assert!(!state.menu.is_open());
        assert!(state.document.is_empty());
        assert_eq!(state.last_command, Some(Command::New));
    }

    #[test]
    fn test_menu_swallows_keys() {
        let mut state = test_state();
        state.handle_key(KeyEvent::alt('e'));
        type_keys(&mut state, "x");
        assert!(state.document.is_empty());
        press(&mut state, Key::Escape);
        type_keys(&mut state, "x");
        assert_eq!(state.document.contents(), "x");
    }

    #[test]
    fn test_find_flow() {
        let mut state = test_state();
        type_keys(&mut state, "find the thing");
        state.handle_key(KeyEvent::ctrl('f'));
        type_keys(&mut state, "the");
        assert_eq!(state.document.contents(), "find the thing");

        press(&mut state, Key::Enter);
        let highlight = state.document.highlight().copied().unwrap();
        assert_eq!((highlight.start, highlight.end), (CharOffset(5), CharOffset(8)));
        assert!(state.dialog.is_none());
    }

    #[test]
    fn test_find_missing_shows_notification() {
        let mut state = test_state();
        type_keys(&mut state, "abc");
        state.handle_key(KeyEvent::ctrl('f'));
        type_keys(&mut state, "zz");
        press(&mut state, Key::Enter);

        match &state.dialog {
            Some(Dialog::Message(message)) => {
                assert_eq!(message.text(), "Text not found");
                assert_eq!(message.level(), MessageLevel::Info);
            }
            other => panic!("expected notification, got {:?}", other),
        }
        press(&mut state, Key::Enter);
        assert!(state.dialog.is_none());
    }

    #[test]
    fn test_replace_flow_is_one_undo() {
        let mut state = test_state();
        state.document.insert(CharOffset(0), "foofoobar");
        state.handle_key(KeyEvent::ctrl('h'));
        type_keys(&mut state, "foo");
        press(&mut state, Key::Tab);
        type_keys(&mut state, "bar");
        press(&mut state, Key::Enter);
        assert_eq!(state.document.contents(), "barbarbar");

        state.handle_key(KeyEvent::ctrl('z'));
        assert_eq!(state.document.contents(), "foofoobar");
    }

    #[test]
    fn test_open_missing_file_through_chooser() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state();
        state.chooser_dir = dir.path().to_path_buf();
        type_keys(&mut state, "keep");

        state.handle_key(KeyEvent::ctrl('o'));
        press(&mut state, Key::Tab);
        type_keys(&mut state, "missing.txt");
        press(&mut state, Key::Enter);

        match &state.dialog {
            Some(Dialog::Message(message)) => {
                assert_eq!(message.text(), "Error opening file");
                assert_eq!(message.level(), MessageLevel::Error);
            }
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(state.document.contents(), "keep");
        assert!(state.document.is_untitled());
    }

    #[test]
    fn test_open_file_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("start.txt");
        std::fs::write(&path, "from disk").unwrap();

        let mut state = test_state();
        state.open_file(&path);
        assert!(state.dialog.is_none());
        assert_eq!(state.document.contents(), "from disk");
        assert_eq!(state.title(), "start.txt - Plume");

        state.open_file(&dir.path().join("absent.txt"));
        assert!(matches!(state.dialog, Some(Dialog::Message(_))));
        assert_eq!(state.document.contents(), "from disk");
    }

    #[test]
    fn test_save_untitled_through_chooser() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state();
        state.chooser_dir = dir.path().to_path_buf();
        type_keys(&mut state, "body");

        state.handle_key(KeyEvent::ctrl('s'));
        type_keys(&mut state, "notes");
        press(&mut state, Key::Enter);

        let saved = dir.path().join("notes.txt");
        assert!(state.dialog.is_none());
        assert_eq!(state.document.path(), Some(saved.as_path()));
        assert_eq!(std::fs::read_to_string(&saved).unwrap(), "body");
        assert_eq!(state.title(), "notes.txt - Plume");

        // Bound: Save writes straight to the same path.
        type_keys(&mut state, "!");
        state.handle_key(KeyEvent::ctrl('s'));
        assert!(state.dialog.is_none());
        assert_eq!(std::fs::read_to_string(&saved).unwrap(), "body!");
    }

    #[test]
    fn test_chooser_starts_in_an_absolute_folder() {
        let state = test_state();
        assert!(state.chooser_dir.is_absolute());

        let config = Config {
            file: Some(PathBuf::from("notes.txt")),
            system_clipboard: false,
            ..Config::default()
        };
        assert!(EditorState::new(&config).chooser_dir.is_absolute());
    }

    #[test]
    fn test_chooser_remembers_folder_and_filter() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("inner")).unwrap();
        let mut state = test_state();
        state.chooser_dir = dir.path().to_path_buf();

        state.handle_key(KeyEvent::ctrl('o'));
        press(&mut state, Key::Right);
        press(&mut state, Key::Down);
        press(&mut state, Key::Enter);
        press(&mut state, Key::Escape);

        assert!(state.dialog.is_none());
        assert_eq!(state.chooser_dir, dir.path().join("inner"));
        assert_eq!(state.file_filter, FileFilter::JavaSource);
    }

    #[test]
    fn test_exit_accelerator() {
        let mut state = test_state();
        type_keys(&mut state, "unsaved");
        state.handle_key(KeyEvent::ctrl('q'));
        assert!(state.should_quit);
    }

    #[test]
    fn test_shift_selection_then_cut_paste() {
        let mut state = test_state();
        type_keys(&mut state, "abc");
        state.handle_key(KeyEvent::new(Key::Left, Modifiers::SHIFT));
        state.handle_key(KeyEvent::new(Key::Left, Modifiers::SHIFT));
        state.handle_key(KeyEvent::ctrl('x'));
        assert_eq!(state.document.contents(), "a");

        state.handle_key(KeyEvent::new(Key::Home, Modifiers::NONE));
        state.handle_key(KeyEvent::ctrl('v'));
        assert_eq!(state.document.contents(), "bca");
    }

    #[test]
    fn test_view_follows_cursor() {
        let mut state = test_state();
        state.set_dimensions(20, 7);
        for _ in 0..10 {
            press(&mut state, Key::Enter);
        }
        assert_eq!(state.view.text_rows(), 5);
        assert_eq!(state.view.scroll_line, 6);
    }
}
