use crate::core::CharOffset;
use crate::state::EditorState;

use super::command::CommandResult;

fn insert_typed(state: &mut EditorState, text: &str) {
    let caret = match state.cursor.selection() {
        Some((start, end)) => state.document.replace_range(start, end, text),
        None => state.document.insert(state.cursor.position, text),
    };
    state.cursor.set_position(caret);
}

fn delete_selection(state: &mut EditorState) -> bool {
    match state.cursor.selection() {
        Some((start, end)) => {
            state.document.remove(start, end);
            state.cursor.set_position(start);
            true
        }
        None => false,
    }
}

/// Width in chars of the line break ending just before `pos`, so CRLF goes
/// away in one keystroke.
fn break_len_before(state: &EditorState, pos: CharOffset) -> usize {
    let text = state.document.text();
    if pos.0 >= 2 && text.char(pos.0 - 1) == '\n' && text.char(pos.0 - 2) == '\r' {
        2
    } else {
        1
    }
}

fn break_len_at(state: &EditorState, pos: CharOffset) -> usize {
    let text = state.document.text();
    if pos.0 + 1 < text.len_chars() && text.char(pos.0) == '\r' && text.char(pos.0 + 1) == '\n' {
        2
    } else {
        1
    }
}

pub fn self_insert(state: &mut EditorState, c: char) -> CommandResult {
    let mut buf = [0u8; 4];
    insert_typed(state, c.encode_utf8(&mut buf));
    Ok(())
}

pub fn newline(state: &mut EditorState) -> CommandResult {
    insert_typed(state, "\n");
    Ok(())
}

pub fn tab(state: &mut EditorState) -> CommandResult {
    insert_typed(state, "\t");
    Ok(())
}

pub fn delete_backward_char(state: &mut EditorState) -> CommandResult {
    if delete_selection(state) {
        return Ok(());
    }
    let pos = state.cursor.position;
    if pos.0 == 0 {
        return Ok(());
    }
    let start = pos.saturating_sub(break_len_before(state, pos));
    state.document.remove(start, pos);
    state.cursor.set_position(start);
    Ok(())
}

pub fn delete_char(state: &mut EditorState) -> CommandResult {
    if delete_selection(state) {
        return Ok(());
    }
    let pos = state.cursor.position;
    if pos.0 >= state.document.len_chars() {
        return Ok(());
    }
    let end = pos.saturating_add(break_len_at(state, pos));
    state.document.remove(pos, end);
    state.cursor.set_position(pos);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::edit_cmds;
    use crate::state::editor::test_state;

    fn type_str(state: &mut EditorState, s: &str) {
        for c in s.chars() {
            self_insert(state, c).unwrap();
        }
    }

    #[test]
    fn test_typing_inserts_at_caret() {
        let mut state = test_state();
        type_str(&mut state, "hello");
        assert_eq!(state.document.contents(), "hello");
        assert_eq!(state.cursor.position, CharOffset(5));

        newline(&mut state).unwrap();
        tab(&mut state).unwrap();
        type_str(&mut state, "x");
        assert_eq!(state.document.contents(), "hello\n\tx");
    }

    #[test]
    fn test_each_keystroke_undoes_separately() {
        let mut state = test_state();
        type_str(&mut state, "hi yo");

        edit_cmds::undo(&mut state).unwrap();
        assert_eq!(state.document.contents(), "hi y");
        edit_cmds::undo(&mut state).unwrap();
        assert_eq!(state.document.contents(), "hi ");

        delete_backward_char(&mut state).unwrap();
        delete_backward_char(&mut state).unwrap();
        assert_eq!(state.document.contents(), "h");
        edit_cmds::undo(&mut state).unwrap();
        assert_eq!(state.document.contents(), "hi");
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut state = test_state();
        state.document.insert(CharOffset(0), "abcdef");
        state.cursor.select(CharOffset(1), CharOffset(4));
        self_insert(&mut state, 'X').unwrap();
        assert_eq!(state.document.contents(), "aXef");
        assert_eq!(state.cursor.position, CharOffset(2));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut state = test_state();
        state.document.insert(CharOffset(0), "abc");
        state.cursor.set_position(CharOffset(3));

        delete_backward_char(&mut state).unwrap();
        assert_eq!(state.document.contents(), "ab");

        state.cursor.set_position(CharOffset(0));
        delete_char(&mut state).unwrap();
        assert_eq!(state.document.contents(), "b");

        delete_backward_char(&mut state).unwrap();
        assert_eq!(state.document.contents(), "b");

        state.cursor.set_position(CharOffset(1));
        delete_char(&mut state).unwrap();
        assert_eq!(state.document.contents(), "b");
    }

    #[test]
    fn test_backspace_removes_crlf_together() {
        let mut state = test_state();
        state.document.insert(CharOffset(0), "a\r\nb");
        state.cursor.set_position(CharOffset(3));
        delete_backward_char(&mut state).unwrap();
        assert_eq!(state.document.contents(), "ab");
        assert_eq!(state.cursor.position, CharOffset(1));

        state.document.insert(CharOffset(1), "\r\n");
        state.cursor.set_position(CharOffset(1));
        delete_char(&mut state).unwrap();
        assert_eq!(state.document.contents(), "ab");
    }

    #[test]
    fn test_backspace_deletes_selection() {
        let mut state = test_state();
        state.document.insert(CharOffset(0), "keep drop");
        state.cursor.select(CharOffset(4), CharOffset(9));
        delete_backward_char(&mut state).unwrap();
        assert_eq!(state.document.contents(), "keep");
        assert_eq!(state.cursor.position, CharOffset(4));
    }
}
