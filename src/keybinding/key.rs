use bitflags::bitflags;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Backspace,
    Tab,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b000;
        const CTRL  = 0b001;
        const ALT   = 0b010;
        const SHIFT = 0b100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn char(c: char) -> Self {
        Self::plain(Key::Char(c))
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(Key::Char(c.to_ascii_lowercase()), Modifiers::CTRL)
    }

    pub fn alt(c: char) -> Self {
        Self::new(Key::Char(c.to_ascii_lowercase()), Modifiers::ALT)
    }

    pub fn ctrl_shift(c: char) -> Self {
        Self::new(
            Key::Char(c.to_ascii_lowercase()),
            Modifiers::CTRL | Modifiers::SHIFT,
        )
    }

    pub fn shift(key: Key) -> Self {
        Self::new(key, Modifiers::SHIFT)
    }

    pub fn ctrl_key(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// Text-producing key: a visible character with at most Shift held.
    pub fn printable_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c)
                if !c.is_control() && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

/// Renders the key the way menus show accelerators, e.g. `Ctrl+Shift+S`.
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::CTRL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            write!(f, "Alt+")?;
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            write!(f, "Shift+")?;
        }

        match self.key {
            Key::Char(' ') => write!(f, "Space"),
            Key::Char(c) => write!(f, "{}", c.to_uppercase()),
            Key::F(n) => write!(f, "F{}", n),
            Key::Backspace => write!(f, "Backspace"),
            Key::Tab => write!(f, "Tab"),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Esc"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PgUp"),
            Key::PageDown => write!(f, "PgDn"),
            Key::Insert => write!(f, "Ins"),
            Key::Delete => write!(f, "Del"),
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut modifiers = Modifiers::NONE;
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            modifiers |= Modifiers::CTRL;
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            modifiers |= Modifiers::ALT;
        }
        if event.modifiers.contains(KeyModifiers::SHIFT) {
            modifiers |= Modifiers::SHIFT;
        }

        let key = match event.code {
            KeyCode::Char(c) => {
                // Terminals report Ctrl+Shift+S as Ctrl+'S'; fold it to the
                // lowercase key plus SHIFT so bindings stay case-free.
                if c.is_ascii_uppercase() && modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
                    modifiers |= Modifiers::SHIFT;
                    Key::Char(c.to_ascii_lowercase())
                } else {
                    Key::Char(c)
                }
            }
            KeyCode::F(n) => Key::F(n),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => {
                modifiers |= Modifiers::SHIFT;
                Key::Tab
            }
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            _ => Key::Char('\0'),
        };

        Self { key, modifiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_accelerator_display() {
        assert_eq!(KeyEvent::ctrl('s').to_string(), "Ctrl+S");
        assert_eq!(KeyEvent::ctrl_shift('s').to_string(), "Ctrl+Shift+S");
        assert_eq!(KeyEvent::alt('f').to_string(), "Alt+F");
        assert_eq!(KeyEvent::plain(Key::F(12)).to_string(), "F12");
    }

    #[test]
    fn test_printable_char() {
        assert_eq!(KeyEvent::char('a').printable_char(), Some('a'));
        assert_eq!(
            KeyEvent::new(Key::Char('A'), Modifiers::SHIFT).printable_char(),
            Some('A')
        );
        assert_eq!(KeyEvent::ctrl('a').printable_char(), None);
        assert_eq!(KeyEvent::plain(Key::Backspace).printable_char(), None);
    }

    #[test]
    fn test_crossterm_uppercase_with_ctrl_becomes_shift() {
        let event = crossterm::event::KeyEvent::new(KeyCode::Char('S'), KeyModifiers::CONTROL);
        assert_eq!(KeyEvent::from(event), KeyEvent::ctrl_shift('s'));

        let event = crossterm::event::KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(KeyEvent::from(event), KeyEvent::shift(Key::Tab));
    }
}
