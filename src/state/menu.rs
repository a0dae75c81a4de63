use crate::commands::Command;
use crate::keybinding::{Key, KeyEvent, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuId {
    File,
    Edit,
    Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        label: &'static str,
        command: Command,
    },
    Separator,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub id: MenuId,
    pub title: &'static str,
    pub mnemonic: char,
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    fn is_item(&self, idx: usize) -> bool {
        matches!(self.entries.get(idx), Some(MenuEntry::Item { .. }))
    }

    fn first_item(&self) -> usize {
        (0..self.entries.len()).find(|&i| self.is_item(i)).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Pending,
    Closed,
    Activate(Command),
}

fn item(label: &'static str, command: Command) -> MenuEntry {
    MenuEntry::Item { label, command }
}

#[derive(Debug, Clone)]
pub struct MenuBar {
    menus: Vec<Menu>,
    open: Option<usize>,
    selected: usize,
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBar {
    pub fn new() -> Self {
        let menus = vec![
            Menu {
                id: MenuId::File,
                title: "File",
                mnemonic: 'f',
                entries: vec![
                    item("New", Command::New),
                    item("Open", Command::Open),
                    item("Save", Command::Save),
                    item("Save As", Command::SaveAs),
                    MenuEntry::Separator,
                    item("Exit", Command::Exit),
                ],
            },
            Menu {
                id: MenuId::Edit,
                title: "Edit",
                mnemonic: 'e',
                entries: vec![
                    item("Cut", Command::Cut),
                    item("Copy", Command::Copy),
                    item("Paste", Command::Paste),
                    MenuEntry::Separator,
                    item("Find", Command::Find),
                    item("Replace", Command::Replace),
                    MenuEntry::Separator,
                    item("Undo", Command::Undo),
                    item("Redo", Command::Redo),
                ],
            },
            Menu {
                id: MenuId::Format,
                title: "Format",
                mnemonic: 'o',
                entries: vec![item("Font", Command::Font)],
            },
        ];

        Self {
            menus,
            open: None,
            selected: 0,
        }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn open_menu(&self) -> Option<&Menu> {
        self.open.and_then(|idx| self.menus.get(idx))
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn open(&mut self, id: MenuId) {
        if let Some(idx) = self.menus.iter().position(|m| m.id == id) {
            self.open_at(idx);
        }
    }

    fn open_at(&mut self, idx: usize) {
        self.open = Some(idx);
        self.selected = self.menus[idx].first_item();
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    fn cycle_menu(&mut self, forward: bool) {
        if let Some(idx) = self.open {
            let len = self.menus.len();
            let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
            self.open_at(next);
        }
    }

    fn cycle_item(&mut self, forward: bool) {
        let menu = match self.open_menu() {
            Some(menu) => menu,
            None => return,
        };
        let len = menu.entries.len();
        let mut idx = self.selected;
        let mut found = None;
        for _ in 0..len {
            idx = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
            if menu.is_item(idx) {
                found = Some(idx);
                break;
            }
        }
        if let Some(idx) = found {
            self.selected = idx;
        }
    }

    fn selected_command(&self) -> Option<Command> {
        match self.open_menu()?.entries.get(self.selected)? {
            MenuEntry::Item { command, .. } => Some(*command),
            MenuEntry::Separator => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MenuOutcome {
        match (key.key, key.modifiers) {
            (Key::Escape, _) | (Key::F(10), _) => {
                self.close();
                MenuOutcome::Closed
            }
            (Key::Left, _) => {
                self.cycle_menu(false);
                MenuOutcome::Pending
            }
            (Key::Right, _) => {
                self.cycle_menu(true);
                MenuOutcome::Pending
            }
            (Key::Up, _) => {
                self.cycle_item(false);
                MenuOutcome::Pending
            }
            (Key::Down, _) => {
                self.cycle_item(true);
                MenuOutcome::Pending
            }
            (Key::Enter, _) => match self.selected_command() {
                Some(command) => {
                    self.close();
                    MenuOutcome::Activate(command)
                }
                None => MenuOutcome::Pending,
            },
            (Key::Char(c), m) if m.contains(Modifiers::ALT) => {
                let c = c.to_ascii_lowercase();
                if let Some(idx) = self.menus.iter().position(|menu| menu.mnemonic == c) {
                    self.open_at(idx);
                }
                MenuOutcome::Pending
            }
            _ => MenuOutcome::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_layout() {
        let bar = MenuBar::new();
        let titles: Vec<&str> = bar.menus().iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["File", "Edit", "Format"]);

        let edit_separators = bar.menus()[1]
            .entries
            .iter()
            .filter(|e| matches!(e, MenuEntry::Separator))
            .count();
        assert_eq!(edit_separators, 2);
    }

    #[test]
    fn test_navigation_skips_separators() {
        let mut bar = MenuBar::new();
        bar.open(MenuId::File);
        for _ in 0..4 {
            bar.handle_key(KeyEvent::plain(Key::Down));
        }
        assert_eq!(bar.handle_key(KeyEvent::plain(Key::Enter)), MenuOutcome::Activate(Command::Exit));
        assert!(!bar.is_open());
    }

    #[test]
    fn test_up_wraps_to_last_item() {
        let mut bar = MenuBar::new();
        bar.open(MenuId::Edit);
        bar.handle_key(KeyEvent::plain(Key::Up));
        assert_eq!(bar.handle_key(KeyEvent::plain(Key::Enter)), MenuOutcome::Activate(Command::Redo));
    }

    #[test]
    fn test_left_right_switch_menus() {
        let mut bar = MenuBar::new();
        bar.open(MenuId::File);
        bar.handle_key(KeyEvent::plain(Key::Left));
        assert_eq!(bar.open_menu().map(|m| m.id), Some(MenuId::Format));
        assert_eq!(bar.handle_key(KeyEvent::plain(Key::Enter)), MenuOutcome::Activate(Command::Font));
    }

    #[test]
    fn test_escape_closes() {
        let mut bar = MenuBar::new();
        bar.open(MenuId::Edit);
        assert_eq!(bar.handle_key(KeyEvent::plain(Key::Escape)), MenuOutcome::Closed);
        assert!(bar.open_menu().is_none());
    }
}
