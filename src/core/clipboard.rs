//! Clipboard backing Cut/Copy/Paste.
//!
//! Text always lands in an internal slot. When enabled, the system clipboard
//! (via `arboard`) is written too and preferred for paste; if it cannot be
//! opened the internal slot is used on its own.

use std::fmt;

pub struct Clipboard {
    internal: String,
    system: Option<arboard::Clipboard>,
    use_system: bool,
}

impl fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clipboard")
            .field("internal_len", &self.internal.len())
            .field("system", &self.system.is_some())
            .field("use_system", &self.use_system)
            .finish()
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clipboard {
    pub fn new(use_system: bool) -> Self {
        Self {
            internal: String::new(),
            system: None,
            use_system,
        }
    }

    pub fn internal_only() -> Self {
        Self::new(false)
    }

    fn system(&mut self) -> Option<&mut arboard::Clipboard> {
        if !self.use_system {
            return None;
        }
        if self.system.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.system = Some(clipboard),
                Err(e) => {
                    log::debug!("system clipboard unavailable, using internal only: {}", e);
                    self.use_system = false;
                    return None;
                }
            }
        }
        self.system.as_mut()
    }

    pub fn copy(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if let Some(system) = self.system() {
            if let Err(e) = system.set_text(text.clone()) {
                log::debug!("system clipboard copy failed: {}", e);
            }
        }
        self.internal = text;
    }

    pub fn paste(&mut self) -> Option<String> {
        if let Some(system) = self.system() {
            match system.get_text() {
                Ok(text) if !text.is_empty() => return Some(text),
                Ok(_) => {}
                Err(e) => log::debug!("system clipboard paste failed: {}", e),
            }
        }
        if self.internal.is_empty() {
            None
        } else {
            Some(self.internal.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_round_trip() {
        let mut clipboard = Clipboard::internal_only();
        assert_eq!(clipboard.paste(), None);

        clipboard.copy("snippet".into());
        assert_eq!(clipboard.paste().as_deref(), Some("snippet"));
        assert_eq!(clipboard.paste().as_deref(), Some("snippet"));
    }

    #[test]
    fn test_empty_copy_keeps_previous() {
        let mut clipboard = Clipboard::internal_only();
        clipboard.copy("first".into());
        clipboard.copy(String::new());
        assert_eq!(clipboard.paste().as_deref(), Some("first"));
    }
}
