pub mod commands;
pub mod config;
pub mod core;
pub mod frontend;
pub mod keybinding;
pub mod state;

pub use config::Config;
pub use state::editor::EditorState;
