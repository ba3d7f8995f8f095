use std::{
    error::Error as _,
    path::{Path, PathBuf},
};

use crossterm::event::{KeyCode, KeyEvent};
use nhanes_analysis::load::LoadError;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::{
    command::dashboard::screens::ScreenAction,
    ui::widgets::{notice_styled, style},
};

/// Replaces the whole dashboard when a data file cannot be loaded.
#[derive(Debug)]
pub(crate) struct LoadErrorScreen {
    path: PathBuf,
    message: String,
}

impl LoadErrorScreen {
    pub(crate) fn new(error: &LoadError) -> Self {
        let cause = error
            .source()
            .map_or_else(|| error.to_string(), ToString::to_string);
        let path = error.path().to_owned();
        let message = format!(
            "Could not load data from '{}'. Error: {cause}",
            path.display()
        );
        Self { path, message }
    }

    pub(crate) fn source(&self) -> &Path {
        &self.path
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn handle_key(key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => ScreenAction::Quit,
            KeyCode::Char('o') => ScreenAction::OpenPath,
            _ => ScreenAction::None,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        frame.render_widget(
            notice_styled("Load failed", self.message(), style::ERROR),
            main_area,
        );
        let help_text = Text::from("o: Open another file | q/Esc: Quit")
            .style(style::HELP)
            .centered();
        frame.render_widget(help_text, help_area);
    }
}
