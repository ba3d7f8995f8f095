use std::path::Path;

use crossterm::event::KeyEvent;
use ratatui::Frame;

pub(crate) use self::{load_error::LoadErrorScreen, overview::OverviewScreen};

mod load_error;
mod overview;

#[derive(Debug)]
pub(crate) enum Screen {
    Overview(Box<OverviewScreen>),
    LoadError(LoadErrorScreen),
}

/// What a screen asks of the application after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenAction {
    None,
    Quit,
    OpenPath,
}

impl Screen {
    /// Path of the data file the screen shows.
    pub(crate) fn source(&self) -> &Path {
        match self {
            Self::Overview(screen) => screen.source(),
            Self::LoadError(screen) => screen.source(),
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match self {
            Self::Overview(screen) => screen.handle_key(key),
            Self::LoadError(_) => LoadErrorScreen::handle_key(key),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        match self {
            Self::Overview(screen) => screen.draw(frame),
            Self::LoadError(screen) => screen.draw(frame),
        }
    }
}
