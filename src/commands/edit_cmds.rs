use crate::core::CharOffset;
use crate::state::EditorState;

use super::command::CommandResult;

pub fn cut(state: &mut EditorState) -> CommandResult {
    let (start, end) = match state.cursor.selection() {
        Some(range) => range,
        None => return Ok(()),
    };
    let removed = state.document.remove(start, end);
    state.clipboard.copy(removed);
    state.cursor.set_position(start);
    Ok(())
}

pub fn copy(state: &mut EditorState) -> CommandResult {
    if let Some((start, end)) = state.cursor.selection() {
        let text = state.document.slice(start, end);
        state.clipboard.copy(text);
    }
    Ok(())
}

/// Inserts the clipboard at the caret, replacing any selection.
pub fn paste(state: &mut EditorState) -> CommandResult {
    let text = match state.clipboard.paste() {
        Some(text) => text,
        None => return Ok(()),
    };
    let (start, end) = state
        .cursor
        .selection()
        .unwrap_or((state.cursor.position, state.cursor.position));
    let caret = state.document.replace_range(start, end, &text);
    state.cursor.set_position(caret);
    Ok(())
}

pub fn undo(state: &mut EditorState) -> CommandResult {
    if let Some(caret) = state.document.undo() {
        state.cursor.set_position(caret);
    }
    Ok(())
}

pub fn redo(state: &mut EditorState) -> CommandResult {
    if let Some(caret) = state.document.redo() {
        state.cursor.set_position(caret);
    }
    Ok(())
}

pub fn select_all(state: &mut EditorState) -> CommandResult {
    let len = state.document.len_chars();
    state.cursor.select(CharOffset(0), CharOffset(len));
    Ok(())
}
