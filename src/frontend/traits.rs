use thiserror::Error;

use crate::keybinding::KeyEvent;
use crate::state::EditorState;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("GUI error: {0}")]
    Gui(String),

    #[error("Rendering error: {0}")]
    Render(String),
}

pub trait Frontend {
    fn init(&mut self) -> Result<(), FrontendError>;

    fn shutdown(&mut self) -> Result<(), FrontendError>;

    /// Size of the cell grid in columns and rows.
    fn size(&self) -> (u16, u16);

    fn run(self, state: EditorState) -> Result<(), FrontendError>;

    fn render(&mut self, state: &EditorState) -> Result<(), FrontendError>;

    fn set_title(&mut self, _title: &str) {}
}

#[derive(Debug, Clone)]
pub enum FrontendEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Focus(bool),
}
