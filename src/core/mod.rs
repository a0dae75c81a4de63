pub mod clipboard;
pub mod cursor;
pub mod document;
pub mod file_filter;
pub mod font;
pub mod position;
pub mod rope_ext;
pub mod search;
pub mod undo;

pub use clipboard::Clipboard;
pub use cursor::Cursor;
pub use document::{Change, ChangeKind, ChangeListener, Document, DocumentError, ListenerId};
pub use file_filter::FileFilter;
pub use font::FontSetting;
pub use position::{CharOffset, Position};
pub use search::{Highlight, Rgb};
pub use undo::{Edit, UndoHistory};
