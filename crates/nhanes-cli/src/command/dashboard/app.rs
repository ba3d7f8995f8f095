use std::path::PathBuf;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use nhanes_analysis::{
    cache::{DatasetCache, DatasetSource},
    filter::{FilterDefaults, FilterDefaultsConfig},
};
use ratatui::{DefaultTerminal, Frame};
use tracing::{info, warn};

use crate::{
    command::dashboard::{
        prompt::{PathPrompt, PromptAction},
        screens::{LoadErrorScreen, OverviewScreen, Screen, ScreenAction},
    },
    util,
};

#[derive(Debug)]
pub struct DashboardApp<S> {
    cache: DatasetCache<S>,
    config: FilterDefaultsConfig,
    screen: Screen,
    prompt: Option<PathPrompt>,
    should_exit: bool,
}

impl<S> DashboardApp<S>
where
    S: DatasetSource,
{
    pub fn new(
        cache: DatasetCache<S>,
        config: FilterDefaultsConfig,
        overview: OverviewScreen,
    ) -> Self {
        Self {
            cache,
            config,
            screen: Screen::Overview(Box::new(overview)),
            prompt: None,
            should_exit: false,
        }
    }

    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.should_exit {
            terminal.draw(|f| self.draw(f))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
        if let Some(prompt) = &self.prompt {
            frame.render_widget(prompt.widget(), frame.area());
        }
    }

    fn handle_events(&mut self) -> anyhow::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let Some(prompt) = &mut self.prompt {
            match prompt.handle_key(key_event) {
                PromptAction::Editing => {}
                PromptAction::Cancel => self.prompt = None,
                PromptAction::Submit(path) => {
                    self.prompt = None;
                    self.open(path);
                }
            }
            return;
        }
        match self.screen.handle_key(key_event) {
            ScreenAction::None => {}
            ScreenAction::Quit => self.should_exit = true,
            ScreenAction::OpenPath => self.prompt = Some(PathPrompt::new(self.screen.source())),
        }
    }

    /// Shows the dataset at `path`, or the load error in place of the dashboard.
    fn open(&mut self, path: PathBuf) {
        self.screen = match self.cache.get_or_load(&path) {
            Ok(rows) => {
                info!("{}", util::load_banner(rows.len(), &path));
                let defaults = FilterDefaults::compute(&rows, &self.config);
                let constraints = defaults.constraints();
                Screen::Overview(Box::new(OverviewScreen::new(
                    path,
                    rows,
                    defaults,
                    constraints,
                )))
            }
            Err(err) => {
                warn!(%err, "load failed");
                Screen::LoadError(LoadErrorScreen::new(&err))
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, path::Path, rc::Rc};

    use crossterm::event::{KeyCode, KeyModifiers};
    use nhanes_analysis::{
        derive::derive,
        load::LoadError,
        table::{RawTable, RowSet},
    };

    use super::*;

    fn rows() -> RowSet {
        derive(&RawTable::from_records(
            ["SEQN", "RIAGENDR", "BMXBMI"],
            [["1", "1", "22"], ["2", "2", "30"]],
        ))
    }

    fn source(loads: Rc<Cell<usize>>) -> impl Fn(&Path) -> Result<RowSet, LoadError> {
        move |path: &Path| -> Result<RowSet, LoadError> {
            loads.set(loads.get() + 1);
            if path == Path::new("missing.csv") {
                Err(LoadError::MissingIdentifier {
                    path: path.to_owned(),
                })
            } else {
                Ok(rows())
            }
        }
    }

    fn app(loads: &Rc<Cell<usize>>) -> DashboardApp<impl DatasetSource> {
        let config = FilterDefaultsConfig::default();
        let rows = rows();
        let defaults = FilterDefaults::compute(&rows, &config);
        let constraints = defaults.constraints();
        let overview =
            OverviewScreen::new(PathBuf::from("a.csv"), Rc::new(rows), defaults, constraints);
        DashboardApp::new(
            DatasetCache::with_source(source(Rc::clone(loads))),
            config,
            overview,
        )
    }

    fn press<S: DatasetSource>(app: &mut DashboardApp<S>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_open_goes_through_cache() {
        let loads = Rc::new(Cell::new(0));
        let mut app = app(&loads);

        app.open(PathBuf::from("b.csv"));
        app.open(PathBuf::from("b.csv"));
        assert_eq!(loads.get(), 1);
        assert!(matches!(app.screen, Screen::Overview(_)));
        assert_eq!(app.screen.source(), Path::new("b.csv"));
    }

    #[test]
    fn test_failed_open_replaces_dashboard() {
        let loads = Rc::new(Cell::new(0));
        let mut app = app(&loads);

        app.open(PathBuf::from("missing.csv"));
        assert!(matches!(app.screen, Screen::LoadError(_)));
        // failures are retried on the next attempt
        app.open(PathBuf::from("missing.csv"));
        assert_eq!(loads.get(), 2);

        app.open(PathBuf::from("a.csv"));
        assert!(matches!(app.screen, Screen::Overview(_)));
    }

    #[test]
    fn test_prompt_keys() {
        let loads = Rc::new(Cell::new(0));
        let mut app = app(&loads);

        press(&mut app, KeyCode::Char('o'));
        assert!(app.prompt.is_some());
        // 'q' edits the path while the prompt is open
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_exit);
        press(&mut app, KeyCode::Esc);
        assert!(app.prompt.is_none());
        assert_eq!(loads.get(), 0);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit);
    }
}
