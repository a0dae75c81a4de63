use crate::commands::{Command, Motion};
use crate::state::menu::MenuId;

use super::key::{Key, KeyEvent, Modifiers};
use super::keymap::KeyMap;

fn bind_motion(map: &mut KeyMap, key: Key, modifiers: Modifiers, motion: Motion) {
    map.bind(
        KeyEvent::new(key, modifiers),
        Command::Move {
            motion,
            extend: false,
        },
    );
    map.bind(
        KeyEvent::new(key, modifiers | Modifiers::SHIFT),
        Command::Move {
            motion,
            extend: true,
        },
    );
}

pub fn default_keymap() -> KeyMap {
    let mut map = KeyMap::new();

    // File
    map.bind(KeyEvent::ctrl('n'), Command::New);
    map.bind(KeyEvent::ctrl('o'), Command::Open);
    map.bind(KeyEvent::ctrl('s'), Command::Save);
    map.bind(KeyEvent::ctrl_shift('s'), Command::SaveAs);
    map.bind(KeyEvent::plain(Key::F(12)), Command::SaveAs);
    map.bind(KeyEvent::ctrl('q'), Command::Exit);

    // Edit
    map.bind(KeyEvent::ctrl('x'), Command::Cut);
    map.bind(KeyEvent::ctrl('c'), Command::Copy);
    map.bind(KeyEvent::ctrl('v'), Command::Paste);
    map.bind(KeyEvent::ctrl('f'), Command::Find);
    map.bind(KeyEvent::ctrl('h'), Command::Replace);
    map.bind(KeyEvent::ctrl('z'), Command::Undo);
    map.bind(KeyEvent::ctrl('y'), Command::Redo);
    map.bind(KeyEvent::ctrl('a'), Command::SelectAll);

    // Menus
    map.bind(KeyEvent::plain(Key::F(10)), Command::OpenMenu(MenuId::File));
    map.bind(KeyEvent::alt('f'), Command::OpenMenu(MenuId::File));
    map.bind(KeyEvent::alt('e'), Command::OpenMenu(MenuId::Edit));
    map.bind(KeyEvent::alt('o'), Command::OpenMenu(MenuId::Format));

    // Text entry
    map.bind(KeyEvent::plain(Key::Enter), Command::InsertNewline);
    map.bind(KeyEvent::plain(Key::Tab), Command::InsertTab);
    map.bind(KeyEvent::plain(Key::Backspace), Command::DeleteBackward);
    map.bind(KeyEvent::shift(Key::Backspace), Command::DeleteBackward);
    map.bind(KeyEvent::plain(Key::Delete), Command::DeleteForward);

    // Caret motion; each also gets a Shift variant that extends the selection.
    bind_motion(&mut map, Key::Left, Modifiers::NONE, Motion::Left);
    bind_motion(&mut map, Key::Right, Modifiers::NONE, Motion::Right);
    bind_motion(&mut map, Key::Up, Modifiers::NONE, Motion::Up);
    bind_motion(&mut map, Key::Down, Modifiers::NONE, Motion::Down);
    bind_motion(&mut map, Key::Home, Modifiers::NONE, Motion::LineStart);
    bind_motion(&mut map, Key::End, Modifiers::NONE, Motion::LineEnd);
    bind_motion(&mut map, Key::PageUp, Modifiers::NONE, Motion::PageUp);
    bind_motion(&mut map, Key::PageDown, Modifiers::NONE, Motion::PageDown);
    bind_motion(&mut map, Key::Home, Modifiers::CTRL, Motion::DocStart);
    bind_motion(&mut map, Key::End, Modifiers::CTRL, Motion::DocEnd);

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinding::keymap::KeyResolution;

    #[test]
    fn test_default_keymap_has_menu_accelerators() {
        let keymap = default_keymap();

        assert_eq!(keymap.get(&KeyEvent::ctrl('s')), Some(Command::Save));
        assert_eq!(keymap.get(&KeyEvent::ctrl('z')), Some(Command::Undo));
        assert_eq!(
            keymap.get(&KeyEvent::plain(Key::F(12))),
            Some(Command::SaveAs)
        );
        assert_eq!(
            keymap.accelerator(Command::SaveAs).map(|k| k.to_string()),
            Some("Ctrl+Shift+S".to_string())
        );
        assert_eq!(keymap.accelerator(Command::Font), None);
    }

    #[test]
    fn test_shift_motion_extends() {
        let keymap = default_keymap();
        assert_eq!(
            keymap.resolve(KeyEvent::shift(Key::Right)),
            KeyResolution::Command(Command::Move {
                motion: Motion::Right,
                extend: true
            })
        );
        assert_eq!(
            keymap.resolve(KeyEvent::new(Key::End, Modifiers::CTRL | Modifiers::SHIFT)),
            KeyResolution::Command(Command::Move {
                motion: Motion::DocEnd,
                extend: true
            })
        );
    }
}
