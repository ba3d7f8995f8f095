use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph, Widget},
};

use crate::ui::widgets::{pane, style};

/// Single-line editor for the data file path.
#[derive(Debug)]
pub(crate) struct PathPrompt {
    input: String,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PromptAction {
    Editing,
    Cancel,
    Submit(PathBuf),
}

impl PathPrompt {
    pub(crate) fn new(current: &Path) -> Self {
        Self {
            input: current.display().to_string(),
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> PromptAction {
        match key.code {
            KeyCode::Esc => return PromptAction::Cancel,
            KeyCode::Enter => {
                let path = self.input.trim();
                if !path.is_empty() {
                    return PromptAction::Submit(PathBuf::from(path));
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
            }
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            _ => {}
        }
        PromptAction::Editing
    }

    pub(crate) fn widget(&self) -> PromptWidget<'_> {
        PromptWidget { input: &self.input }
    }
}

pub(crate) struct PromptWidget<'a> {
    input: &'a str,
}

impl Widget for PromptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let [_, popup, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, popup, _] = Layout::horizontal([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .areas(popup);

        let text = Text::from(vec![
            Line::from(vec![
                Span::raw(self.input),
                Span::styled("█", style::HIGHLIGHT),
            ]),
            Line::styled("Enter: Load | Ctrl-U: Clear | Esc: Cancel", style::HELP),
        ]);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(pane("Open CSV file"))
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_and_submit() {
        let mut prompt = PathPrompt::new(Path::new("a.csv"));
        for _ in 0..3 {
            assert_eq!(prompt.handle_key(key(KeyCode::Backspace)), PromptAction::Editing);
        }
        for c in "tsv ".chars() {
            prompt.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptAction::Submit(PathBuf::from("a.tsv"))
        );
    }

    #[test]
    fn test_empty_input_is_not_submitted() {
        let mut prompt = PathPrompt::new(Path::new("a.csv"));
        prompt.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(prompt.handle_key(key(KeyCode::Enter)), PromptAction::Editing);
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), PromptAction::Cancel);
    }
}
