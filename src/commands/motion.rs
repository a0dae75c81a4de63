use ropey::Rope;

use crate::core::rope_ext::RopeExt;
use crate::core::{CharOffset, Position};
use crate::state::EditorState;

use super::command::{CommandResult, Motion};

fn step_back(text: &Rope, pos: CharOffset) -> CharOffset {
    if pos.0 == 0 {
        return pos;
    }
    if pos.0 >= 2 && text.char(pos.0 - 1) == '\n' && text.char(pos.0 - 2) == '\r' {
        return CharOffset(pos.0 - 2);
    }
    CharOffset(pos.0 - 1)
}

fn step_forward(text: &Rope, pos: CharOffset) -> CharOffset {
    let len = text.len_chars();
    if pos.0 >= len {
        return CharOffset(len);
    }
    if pos.0 + 1 < len && text.char(pos.0) == '\r' && text.char(pos.0 + 1) == '\n' {
        return CharOffset(pos.0 + 2);
    }
    CharOffset(pos.0 + 1)
}

/// Moves `lines` lines down (negative: up), aiming for `goal` column.
fn vertical(text: &Rope, pos: CharOffset, lines: isize, goal: usize) -> CharOffset {
    let current = text.char_to_position(pos);
    let last_line = text.len_lines().saturating_sub(1);

    if lines < 0 && current.line == 0 {
        return CharOffset(0);
    }
    if lines > 0 && current.line >= last_line {
        return CharOffset(text.len_chars());
    }

    let target = if lines < 0 {
        current.line.saturating_sub(lines.unsigned_abs())
    } else {
        (current.line + lines as usize).min(last_line)
    };
    text.position_to_char(Position::new(target, goal))
}

pub fn move_cursor(state: &mut EditorState, motion: Motion, extend: bool) -> CommandResult {
    let text = state.document.text();
    let pos = state.cursor.position;
    let goal = state
        .cursor
        .goal_column
        .unwrap_or_else(|| text.char_to_position(pos).column);
    let page = state.view.text_rows().max(1) as isize;

    // Left/Right without Shift collapse a selection to its edge.
    if !extend {
        if let Some((start, end)) = state.cursor.selection() {
            match motion {
                Motion::Left => {
                    state.cursor.set_position(start);
                    return Ok(());
                }
                Motion::Right => {
                    state.cursor.set_position(end);
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    let (target, keep_goal) = match motion {
        Motion::Left => (step_back(text, pos), false),
        Motion::Right => (step_forward(text, pos), false),
        Motion::Up => (vertical(text, pos, -1, goal), true),
        Motion::Down => (vertical(text, pos, 1, goal), true),
        Motion::PageUp => (vertical(text, pos, -page, goal), true),
        Motion::PageDown => (vertical(text, pos, page, goal), true),
        Motion::LineStart => {
            let line = text.char_to_position(pos).line;
            (text.line_start_char(line), false)
        }
        Motion::LineEnd => {
            let line = text.char_to_position(pos).line;
            (text.line_end_char(line), false)
        }
        Motion::DocStart => (CharOffset(0), false),
        Motion::DocEnd => (CharOffset(text.len_chars()), false),
    };

    if extend {
        state.cursor.extend_to(target);
    } else {
        state.cursor.set_position(target);
    }
    state.cursor.goal_column = if keep_goal { Some(goal) } else { None };

    match motion {
        Motion::PageUp => state.view.scroll_by(-page),
        Motion::PageDown => state.view.scroll_by(page),
        _ => {}
    }
    Ok(())
}
