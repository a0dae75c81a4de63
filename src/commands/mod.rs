pub mod command;
pub mod edit_cmds;
pub mod editing;
pub mod file_cmds;
pub mod format_cmds;
pub mod motion;
pub mod search_cmds;

pub use command::{execute, Command, CommandError, CommandResult, Motion};
