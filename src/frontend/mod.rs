pub mod gui;
pub mod layout;
pub mod terminal;
pub mod traits;

pub use gui::GuiFrontend;
pub use layout::Screen;
pub use terminal::TerminalFrontend;
pub use traits::{Frontend, FrontendError};
