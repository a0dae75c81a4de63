use std::collections::HashMap;

use crate::commands::Command;

use super::key::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResolution {
    Command(Command),
    SelfInsert(char),
    Unbound,
}

#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<KeyEvent, Command>,
    /// First key bound to each command; shown next to menu items.
    accelerators: HashMap<Command, KeyEvent>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: KeyEvent, command: Command) {
        self.bindings.insert(key, command);
        self.accelerators.entry(command).or_insert(key);
    }

    pub fn get(&self, key: &KeyEvent) -> Option<Command> {
        self.bindings.get(key).copied()
    }

    pub fn accelerator(&self, command: Command) -> Option<KeyEvent> {
        self.accelerators.get(&command).copied()
    }

    pub fn resolve(&self, key: KeyEvent) -> KeyResolution {
        if let Some(command) = self.get(&key) {
            return KeyResolution::Command(command);
        }
        match key.printable_char() {
            Some(c) => KeyResolution::SelfInsert(c),
            None => KeyResolution::Unbound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinding::key::{Key, Modifiers};

    #[test]
    fn test_bind_and_resolve() {
        let mut map = KeyMap::new();
        map.bind(KeyEvent::ctrl('s'), Command::Save);

        assert_eq!(map.resolve(KeyEvent::ctrl('s')), KeyResolution::Command(Command::Save));
        assert_eq!(map.resolve(KeyEvent::char('s')), KeyResolution::SelfInsert('s'));
        assert_eq!(map.resolve(KeyEvent::ctrl('k')), KeyResolution::Unbound);
    }

    #[test]
    fn test_first_binding_is_the_accelerator() {
        let mut map = KeyMap::new();
        map.bind(KeyEvent::ctrl_shift('s'), Command::SaveAs);
        map.bind(KeyEvent::new(Key::F(12), Modifiers::NONE), Command::SaveAs);

        assert_eq!(map.accelerator(Command::SaveAs), Some(KeyEvent::ctrl_shift('s')));
        assert_eq!(map.accelerator(Command::Font), None);
    }
}
