use std::path::PathBuf;

use clap::Parser;

use crate::core::font::{FontSetting, DEFAULT_FAMILY, DEFAULT_SIZE};

/// A small menu-driven text editor
#[derive(Parser, Debug)]
#[command(name = "plume")]
#[command(about = "A small menu-driven text editor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// File to open at start-up
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Open a desktop window instead of running in the terminal
    #[arg(long)]
    pub gui: bool,

    /// Font family for the window frontend
    #[arg(long, value_name = "FAMILY", default_value = DEFAULT_FAMILY)]
    pub font: String,

    /// Font size in points for the window frontend
    #[arg(long, value_name = "SIZE", default_value_t = DEFAULT_SIZE)]
    pub font_size: f32,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Columns per tab stop
    #[arg(long, default_value_t = 4)]
    pub tab_width: usize,

    /// Keep cut/copy/paste inside the editor
    #[arg(long)]
    pub no_system_clipboard: bool,

    /// Write diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontendKind {
    #[default]
    Terminal,
    Gui,
}

/// Runtime settings for one session. Nothing here is saved.
#[derive(Debug, Clone)]
pub struct Config {
    pub frontend: FrontendKind,
    pub file: Option<PathBuf>,
    pub font: FontSetting,
    pub window_size: (u32, u32),
    pub system_clipboard: bool,
    pub tab_width: usize,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frontend: FrontendKind::Terminal,
            file: None,
            font: FontSetting::default(),
            window_size: (800, 600),
            system_clipboard: true,
            tab_width: 4,
            log_file: None,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            frontend: if cli.gui {
                FrontendKind::Gui
            } else {
                FrontendKind::Terminal
            },
            file: cli.file,
            font: FontSetting::new(cli.font, cli.font_size.max(1.0)),
            window_size: (cli.width.max(1), cli.height.max(1)),
            system_clipboard: !cli.no_system_clipboard,
            tab_width: cli.tab_width.max(1),
            log_file: cli.log_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_command_line() {
        let config = Config::from(Cli::parse_from(["plume"]));
        assert_eq!(config.frontend, FrontendKind::Terminal);
        assert_eq!(config.window_size, (800, 600));
        assert_eq!(config.font.family, DEFAULT_FAMILY);
        assert!(config.system_clipboard);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "plume",
            "--gui",
            "--font",
            "Fira Code",
            "--font-size",
            "20",
            "--no-system-clipboard",
            "--tab-width",
            "0",
            "notes.txt",
        ]);
        let config = Config::from(cli);
        assert_eq!(config.frontend, FrontendKind::Gui);
        assert_eq!(config.font.family, "Fira Code");
        assert_eq!(config.font.size, 20.0);
        assert!(!config.system_clipboard);
        assert_eq!(config.tab_width, 1);
        assert_eq!(config.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
