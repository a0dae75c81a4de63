pub mod dialog;
pub mod editor;
pub mod file_chooser;
pub mod menu;
pub mod status;
pub mod view;

pub use dialog::{Dialog, DialogOutcome, DialogResult};
pub use editor::EditorState;
pub use menu::{MenuBar, MenuId};
pub use status::StatusBar;
pub use view::View;
