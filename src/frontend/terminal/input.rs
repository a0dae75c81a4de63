use crossterm::event::{Event, KeyEventKind};

use crate::frontend::traits::FrontendEvent;
use crate::keybinding::KeyEvent;

pub fn convert_event(event: Event) -> Option<FrontendEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Press || key_event.kind == KeyEventKind::Repeat {
                Some(FrontendEvent::Key(KeyEvent::from(key_event)))
            } else {
                None
            }
        }
        Event::Resize(width, height) => Some(FrontendEvent::Resize(width, height)),
        Event::FocusGained => Some(FrontendEvent::Focus(true)),
        Event::FocusLost => Some(FrontendEvent::Focus(false)),
        _ => None,
    }
}
