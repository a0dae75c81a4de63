use thiserror::Error;

use crate::core::DocumentError;
use crate::state::menu::MenuId;
use crate::state::EditorState;

use super::{edit_cmds, editing, file_cmds, format_cmds, motion, search_cmds};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Cancelled")]
    Cancelled,
}

impl CommandError {
    /// Text for the modal notification shown to the user, if any.
    pub fn notification(&self) -> Option<&'static str> {
        match self {
            CommandError::Document(DocumentError::Read { .. }) => Some("Error opening file"),
            CommandError::Document(DocumentError::Write { .. }) => Some("Error saving file"),
            CommandError::Document(_) | CommandError::Cancelled => None,
        }
    }
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    DocStart,
    DocEnd,
}

/// Everything a menu item or key binding can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
    Cut,
    Copy,
    Paste,
    Find,
    Replace,
    Undo,
    Redo,
    Font,
    SelectAll,
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
    Move { motion: Motion, extend: bool },
    OpenMenu(MenuId),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::New => "new",
            Command::Open => "open",
            Command::Save => "save",
            Command::SaveAs => "save-as",
            Command::Exit => "exit",
            Command::Cut => "cut",
            Command::Copy => "copy",
            Command::Paste => "paste",
            Command::Find => "find",
            Command::Replace => "replace",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Font => "font",
            Command::SelectAll => "select-all",
            Command::InsertNewline => "newline",
            Command::InsertTab => "tab",
            Command::DeleteBackward => "delete-backward-char",
            Command::DeleteForward => "delete-char",
            Command::Move { extend: false, .. } => "move",
            Command::Move { extend: true, .. } => "move-extend",
            Command::OpenMenu(_) => "open-menu",
        }
    }
}

pub fn execute(state: &mut EditorState, command: Command) -> CommandResult {
    match command {
        Command::New => file_cmds::new_document(state),
        Command::Open => file_cmds::open(state),
        Command::Save => file_cmds::save(state),
        Command::SaveAs => file_cmds::save_as(state),
        Command::Exit => file_cmds::exit(state),
        Command::Cut => edit_cmds::cut(state),
        Command::Copy => edit_cmds::copy(state),
        Command::Paste => edit_cmds::paste(state),
        Command::Find => search_cmds::find(state),
        Command::Replace => search_cmds::replace(state),
        Command::Undo => edit_cmds::undo(state),
        Command::Redo => edit_cmds::redo(state),
        Command::Font => format_cmds::font(state),
        Command::SelectAll => edit_cmds::select_all(state),
        Command::InsertNewline => editing::newline(state),
        Command::InsertTab => editing::tab(state),
        Command::DeleteBackward => editing::delete_backward_char(state),
        Command::DeleteForward => editing::delete_char(state),
        Command::Move { motion, extend } => motion::move_cursor(state, motion, extend),
        Command::OpenMenu(id) => {
            state.menu.open(id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_notification_text() {
        let read = CommandError::from(DocumentError::Read {
            path: PathBuf::from("x"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(read.notification(), Some("Error opening file"));

        let write = CommandError::from(DocumentError::Write {
            path: PathBuf::from("x"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(write.notification(), Some("Error saving file"));

        assert_eq!(CommandError::Cancelled.notification(), None);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::DeleteBackward.name(), "delete-backward-char");
        assert_eq!(
            Command::Move {
                motion: Motion::Left,
                extend: true
            }
            .name(),
            "move-extend"
        );
    }
}
