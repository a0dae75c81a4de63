use crate::core::font;
use crate::state::dialog::{Dialog, FontDialog};
use crate::state::EditorState;

use super::command::CommandResult;

pub fn font(state: &mut EditorState) -> CommandResult {
    if state.font_families.is_empty() {
        state.font_families = font::system_font_families();
    }
    let mut families = state.font_families.clone();
    if !families.iter().any(|f| *f == state.font.family) {
        families.insert(0, state.font.family.clone());
    }
    state.dialog = Some(Dialog::Font(FontDialog::new(families, &state.font.family)));
    Ok(())
}

pub fn apply_font(state: &mut EditorState, family: &str) -> CommandResult {
    state.font = state.font.with_family(family);
    log::debug!("font set to {} {}pt", state.font.family, state.font.size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::editor::test_state;

    #[test]
    fn test_apply_font_keeps_size() {
        let mut state = test_state();
        state.font.size = 20.0;
        apply_font(&mut state, "DejaVu Sans Mono").unwrap();
        assert_eq!(state.font.family, "DejaVu Sans Mono");
        assert_eq!(state.font.size, 20.0);
    }

    #[test]
    fn test_font_dialog_starts_on_current_family() {
        let mut state = test_state();
        state.font_families = vec!["Alpha".into(), "Beta".into(), "Gamma".into()];
        apply_font(&mut state, "Beta").unwrap();

        font(&mut state).unwrap();
        match &state.dialog {
            Some(Dialog::Font(dialog)) => assert_eq!(dialog.selected_family(), Some("Beta")),
            other => panic!("expected font dialog, got {:?}", other),
        }
    }
}
