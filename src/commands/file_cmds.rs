use std::path::{Path, PathBuf};

use crate::core::{CharOffset, FileFilter};
use crate::state::dialog::Dialog;
use crate::state::file_chooser::{ChooserMode, FileChooser};
use crate::state::EditorState;

use super::command::CommandResult;

pub fn new_document(state: &mut EditorState) -> CommandResult {
    state.document.reset();
    state.cursor.set_position(CharOffset(0));
    state.view.reset();
    Ok(())
}

pub fn open(state: &mut EditorState) -> CommandResult {
    let chooser = FileChooser::new(ChooserMode::Open, state.chooser_dir.clone(), state.file_filter);
    state.dialog = Some(Dialog::File(chooser));
    Ok(())
}

/// Loads `path` into the document. On failure the document and its path
/// stay as they were.
pub fn open_path(state: &mut EditorState, path: &Path) -> CommandResult {
    state.document.load(path)?;
    state.cursor.set_position(CharOffset(0));
    state.view.reset();
    log::info!("opened {}", path.display());
    Ok(())
}

pub fn save(state: &mut EditorState) -> CommandResult {
    if state.document.is_untitled() {
        return save_as(state);
    }
    state.document.save()?;
    if let Some(path) = state.document.path() {
        log::info!("saved {}", path.display());
    }
    Ok(())
}

pub fn save_as(state: &mut EditorState) -> CommandResult {
    let chooser = FileChooser::new(ChooserMode::Save, state.chooser_dir.clone(), state.file_filter);
    state.dialog = Some(Dialog::File(chooser));
    Ok(())
}

/// Writes to the chosen path, adding the filter's extension when the name
/// lacks it, and binds the document to it.
pub fn save_as_path(state: &mut EditorState, path: PathBuf, filter: FileFilter) -> CommandResult {
    let path = filter.apply_extension(path);
    state.document.save_as(path)?;
    if let Some(path) = state.document.path() {
        log::info!("saved {}", path.display());
    }
    Ok(())
}

/// Quits without asking, dropping unsaved changes.
pub fn exit(state: &mut EditorState) -> CommandResult {
    state.should_quit = true;
    Ok(())
}
