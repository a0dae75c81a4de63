use crate::state::dialog::{Dialog, FindDialog, ReplaceDialog};
use crate::state::EditorState;

use super::command::CommandResult;

pub fn find(state: &mut EditorState) -> CommandResult {
    state.dialog = Some(Dialog::Find(FindDialog::new()));
    Ok(())
}

/// Highlights the first occurrence of `term`, always searching from the
/// start of the document.
pub fn find_text(state: &mut EditorState, term: &str) -> CommandResult {
    if term.is_empty() {
        return Ok(());
    }

    match state.document.find(term) {
        Some((start, end)) => {
            if let Err(e) = state.document.set_highlight(start, end) {
                log::warn!("could not highlight match: {}", e);
            }
            state.scroll_to(start);
        }
        None => state.show_info("Find", "Text not found"),
    }
    Ok(())
}

pub fn replace(state: &mut EditorState) -> CommandResult {
    state.dialog = Some(Dialog::Replace(ReplaceDialog::new()));
    Ok(())
}

pub fn replace_text(state: &mut EditorState, find: &str, replace: &str) -> CommandResult {
    let count = state.document.replace_all(find, replace);
    if count > 0 {
        log::debug!("replaced {} occurrence(s) of {:?}", count, find);
        let len = state.document.len_chars();
        state.cursor.clamp(len);
        state.cursor.clear_selection();
    }
    Ok(())
}
