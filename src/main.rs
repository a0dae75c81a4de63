use std::fs::File;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use plume::config::{Cli, Config, FrontendKind};
use plume::frontend::{terminal, Frontend, GuiFrontend, TerminalFrontend};
use plume::EditorState;

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let mut logger = env_logger::Builder::from_default_env();
    let from_env = std::env::var_os("RUST_LOG").is_some();

    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
        if !from_env {
            logger.filter_level(LevelFilter::Info);
            logger.filter_module("plume", LevelFilter::Debug);
        }
    } else if !from_env {
        // stderr shares the screen with the terminal frontend
        let level = match config.frontend {
            FrontendKind::Terminal => LevelFilter::Off,
            FrontendKind::Gui => LevelFilter::Warn,
        };
        logger.filter_level(level);
    }

    logger.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from(Cli::parse());
    init_logging(&config)?;

    let mut state = EditorState::new(&config);
    if let Some(path) = &config.file {
        state.open_file(path);
    }

    match config.frontend {
        FrontendKind::Terminal => {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |panic_info| {
                terminal::restore_terminal();
                original_hook(panic_info);
            }));

            let mut frontend = TerminalFrontend::new();
            frontend.init()?;
            frontend.run(state)?;
        }
        FrontendKind::Gui => {
            let mut frontend = GuiFrontend::new(config.window_size, config.font.clone());
            frontend.init()?;
            frontend.run(state)?;
        }
    }

    log::info!("bye");
    Ok(())
}
