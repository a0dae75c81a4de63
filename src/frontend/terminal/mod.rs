mod input;
mod render;

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event,
    execute,
    terminal::{self, ClearType},
};

use crate::state::EditorState;

use super::layout::Screen;
use super::traits::{Frontend, FrontendError, FrontendEvent};

pub struct TerminalFrontend {
    stdout: Stdout,
    width: u16,
    height: u16,
    title: String,
    active: bool,
}

impl TerminalFrontend {
    pub fn new() -> Self {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        Self {
            stdout: io::stdout(),
            width,
            height,
            title: String::new(),
            active: false,
        }
    }

    fn poll_event(&mut self, timeout: Duration) -> Option<FrontendEvent> {
        if event::poll(timeout).ok()? {
            let event = event::read().ok()?;
            input::convert_event(event)
        } else {
            None
        }
    }
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for TerminalFrontend {
    fn init(&mut self) -> Result<(), FrontendError> {
        terminal::enable_raw_mode()
            .map_err(|e| FrontendError::Terminal(format!("cannot enter raw mode: {}", e)))?;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        let (width, height) = terminal::size()?;
        self.width = width;
        self.height = height;
        self.active = true;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), FrontendError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn run(mut self, mut state: EditorState) -> Result<(), FrontendError> {
        state.set_dimensions(self.width, self.height);
        loop {
            let title = state.title();
            if title != self.title {
                self.set_title(&title);
                self.title = title;
            }
            self.render(&state)?;

            if state.should_quit {
                break;
            }

            if let Some(event) = self.poll_event(Duration::from_millis(100)) {
                match event {
                    FrontendEvent::Key(key) => {
                        state.handle_key(key);
                    }
                    FrontendEvent::Resize(width, height) => {
                        log::debug!("terminal resized to {}x{}", width, height);
                        state.set_dimensions(width, height);
                        self.width = width;
                        self.height = height;
                    }
                    FrontendEvent::Focus(_) => {}
                }
            }
        }
        self.shutdown()
    }

    fn render(&mut self, state: &EditorState) -> Result<(), FrontendError> {
        let screen = Screen::compose(state, self.width, self.height);
        render::render(&screen, &mut self.stdout)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        let _ = execute!(self.stdout, terminal::SetTitle(title));
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// Best-effort terminal reset for the panic hook.
pub fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}
