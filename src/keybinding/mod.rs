pub mod default;
pub mod key;
pub mod keymap;

pub use key::{Key, KeyEvent, Modifiers};
pub use keymap::{KeyMap, KeyResolution};
