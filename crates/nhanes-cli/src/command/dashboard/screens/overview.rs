use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use crossterm::event::{KeyCode, KeyEvent};
use nhanes_analysis::{
    dashboard::{
        DashboardView, GENDER_UNAVAILABLE, HEATMAP_UNAVAILABLE, NO_DISTRIBUTION_SELECTED,
        SCATTER_UNAVAILABLE, SLEEP_UNAVAILABLE,
    },
    filter::{FilterConstraints, FilterDefaults, GenderFilter, NumericRange, RangeControl},
    table::RowSet,
};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    text::{Line, Text},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Tabs, Widget},
};
use tracing::debug;

use crate::{
    command::dashboard::screens::ScreenAction,
    ui::widgets::{
        CorrelationHeatmap, DistributionPanel, GroupBarChart, KpiRow, ScatterChart, notice, pane,
        style,
    },
    util,
};

const SLEEP_STEP: i64 = 1;
const SUGAR_STEP: i64 = 5;

/// Filter controls in the order they are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Gender,
    SleepMin,
    SleepMax,
    SugarMin,
    SugarMax,
}

impl Control {
    const ALL: [Self; 5] = [
        Self::Gender,
        Self::SleepMin,
        Self::SleepMax,
        Self::SugarMin,
        Self::SugarMax,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Scatter,
    SleepGroups,
    Genders,
    Distributions,
    Heatmap,
}

impl Tab {
    const ALL: [Self; 5] = [
        Self::Scatter,
        Self::SleepGroups,
        Self::Genders,
        Self::Distributions,
        Self::Heatmap,
    ];

    fn title(self) -> &'static str {
        match self {
            Self::Scatter => "Sugar vs BMI",
            Self::SleepGroups => "BMI by Sleep Group",
            Self::Genders => "BMI by Gender",
            Self::Distributions => "Distributions",
            Self::Heatmap => "Correlation Heatmap",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The dashboard for one loaded dataset.
#[derive(Debug)]
pub(crate) struct OverviewScreen {
    source: PathBuf,
    rows: Rc<RowSet>,
    defaults: FilterDefaults,
    constraints: FilterConstraints,
    focus: Control,
    tab: Tab,
    /// Columns chosen for the distributions tab.
    selected_columns: Vec<String>,
    /// Cursor in the numeric column list of the distributions tab.
    column_cursor: usize,
    view: DashboardView,
}

impl OverviewScreen {
    pub(crate) fn new(
        source: PathBuf,
        rows: Rc<RowSet>,
        defaults: FilterDefaults,
        constraints: FilterConstraints,
    ) -> Self {
        let view = DashboardView::compute(
            source.display().to_string(),
            &rows,
            defaults.clone(),
            constraints.clone(),
            None,
        );
        Self {
            selected_columns: view.distribution_columns.clone(),
            source,
            rows,
            defaults,
            constraints,
            focus: Control::Gender,
            tab: Tab::Scatter,
            column_cursor: 0,
            view,
        }
    }

    pub(crate) fn source(&self) -> &Path {
        &self.source
    }

    fn recompute(&mut self) {
        self.view = DashboardView::compute(
            self.source.display().to_string(),
            &self.rows,
            self.defaults.clone(),
            self.constraints.clone(),
            Some(&self.selected_columns),
        );
        self.column_cursor = self
            .column_cursor
            .min(self.view.numeric_columns.len().saturating_sub(1));
        debug!(
            constraints = ?self.constraints,
            filtered = self.view.filtered_rows,
            "dashboard recomputed"
        );
    }

    fn reset(&mut self) {
        self.constraints = self.defaults.constraints();
        let view = DashboardView::compute(
            self.source.display().to_string(),
            &self.rows,
            self.defaults.clone(),
            self.constraints.clone(),
            None,
        );
        self.selected_columns.clone_from(&view.distribution_columns);
        self.view = view;
        self.column_cursor = 0;
    }

    /// Moves the focused control by `steps` notches.
    fn adjust(&mut self, steps: i64) {
        match self.focus {
            Control::Gender => {
                let options = &self.defaults.genders;
                if options.is_empty() {
                    return;
                }
                let current = self.constraints.gender.to_string();
                let index = options
                    .iter()
                    .position(|option| *option == current)
                    .unwrap_or(0);
                let len = options.len();
                let next = if steps < 0 {
                    (index + len - 1) % len
                } else {
                    (index + 1) % len
                };
                self.constraints.gender = GenderFilter::from_label(options[next]);
            }
            Control::SleepMin | Control::SleepMax => {
                let control = self.defaults.sleep;
                let range = self.constraints.sleep.get_or_insert(control.default);
                *range = step_range(
                    *range,
                    control,
                    self.focus == Control::SleepMin,
                    steps * SLEEP_STEP,
                );
            }
            Control::SugarMin | Control::SugarMax => {
                let control = self.defaults.sugar;
                let range = self.constraints.sugar.get_or_insert(control.default);
                *range = step_range(
                    *range,
                    control,
                    self.focus == Control::SugarMin,
                    steps * SUGAR_STEP,
                );
            }
        }
        self.recompute();
    }

    fn toggle_column(&mut self) {
        let Some(name) = self.view.numeric_columns.get(self.column_cursor) else {
            return;
        };
        if let Some(i) = self.selected_columns.iter().position(|c| c == name) {
            self.selected_columns.remove(i);
        } else {
            self.selected_columns.push(name.clone());
        }
        self.recompute();
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return ScreenAction::Quit,
            KeyCode::Char('o') => return ScreenAction::OpenPath,
            KeyCode::Char('r') => self.reset(),
            KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char('k') if self.tab == Tab::Distributions => {
                self.column_cursor = self.column_cursor.saturating_sub(1);
            }
            KeyCode::Char('j') if self.tab == Tab::Distributions => {
                if self.column_cursor + 1 < self.view.numeric_columns.len() {
                    self.column_cursor += 1;
                }
            }
            KeyCode::Char(' ') if self.tab == Tab::Distributions => self.toggle_column(),
            _ => {}
        }
        ScreenAction::None
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let [header_area, main_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [sidebar_area, content_area] =
            Layout::horizontal([Constraint::Length(30), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);

        let [kpi_area, tabs_area, chart_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(content_area);

        let banner = util::load_banner(self.view.total_rows, &self.source);
        frame.render_widget(Line::styled(banner, style::HIGHLIGHT), header_area);

        frame.render_widget(
            FilterPanel {
                defaults: &self.defaults,
                constraints: &self.constraints,
                focus: self.focus,
                filtered_rows: self.view.filtered_rows,
                total_rows: self.view.total_rows,
            },
            sidebar_area,
        );
        frame.render_widget(KpiRow::new(&self.view.kpis), kpi_area);

        let tabs = Tabs::new(Tab::ALL.map(Tab::title))
            .select(self.tab.index())
            .highlight_style(style::HIGHLIGHT);
        frame.render_widget(tabs, tabs_area);

        self.draw_tab(frame, chart_area);

        let mut help = String::from(
            "↑/↓: Filter | ←/→: Adjust | Tab: Chart | r: Reset | o: Open | q/Esc: Quit",
        );
        if self.tab == Tab::Distributions {
            help.insert_str(0, "j/k: Column | Space: Toggle | ");
        }
        let help_text = Text::from(help).style(style::HELP).centered();
        frame.render_widget(help_text, help_area);
    }

    fn draw_tab(&self, frame: &mut Frame, area: Rect) {
        let title = self.tab.title();
        let view = &self.view;
        match self.tab {
            Tab::Scatter => match &view.scatter {
                Some(plot) => frame.render_widget(ScatterChart::new(title, plot), area),
                None => frame.render_widget(notice(title, SCATTER_UNAVAILABLE), area),
            },
            Tab::SleepGroups => match &view.bmi_by_sleep_group {
                Some(groups) => frame.render_widget(GroupBarChart::new(title, groups), area),
                None => frame.render_widget(notice(title, SLEEP_UNAVAILABLE), area),
            },
            Tab::Genders => match &view.bmi_by_gender {
                Some(groups) => frame.render_widget(GroupBarChart::new(title, groups), area),
                None => frame.render_widget(notice(title, GENDER_UNAVAILABLE), area),
            },
            Tab::Distributions => {
                let [list_area, panels_area] =
                    Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)])
                        .spacing(Spacing::Overlap(1))
                        .areas(area);
                frame.render_widget(
                    ColumnSelector {
                        columns: &view.numeric_columns,
                        selected: &self.selected_columns,
                        cursor: self.column_cursor,
                    },
                    list_area,
                );
                if view.distributions.is_empty() {
                    frame.render_widget(notice(title, NO_DISTRIBUTION_SELECTED), panels_area);
                } else {
                    let panels = Layout::vertical(
                        view.distributions.iter().map(|_| Constraint::Fill(1)),
                    )
                    .spacing(Spacing::Overlap(1))
                    .split(panels_area);
                    for (summary, panel_area) in view.distributions.iter().zip(panels.iter()) {
                        frame.render_widget(DistributionPanel::new(summary), *panel_area);
                    }
                }
            }
            Tab::Heatmap => match &view.correlation {
                Some(matrix) => frame.render_widget(CorrelationHeatmap::new(title, matrix), area),
                None => frame.render_widget(notice(title, HEATMAP_UNAVAILABLE), area),
            },
        }
    }
}

/// Moves one end of `range` by `delta`, keeping it inside the control bounds and
/// never past the other end.
fn step_range(
    range: NumericRange,
    control: RangeControl,
    min_end: bool,
    delta: i64,
) -> NumericRange {
    let bounds = control.bounds;
    if min_end {
        let min = (range.min + delta).clamp(bounds.min, range.max.max(bounds.min));
        NumericRange::new(min, range.max)
    } else {
        let max = (range.max + delta).clamp(range.min.min(bounds.max), bounds.max);
        NumericRange::new(range.min, max)
    }
}

struct FilterPanel<'a> {
    defaults: &'a FilterDefaults,
    constraints: &'a FilterConstraints,
    focus: Control,
    filtered_rows: usize,
    total_rows: usize,
}

impl FilterPanel<'_> {
    fn value(&self, control: Control) -> String {
        let sleep = self.constraints.sleep.unwrap_or(self.defaults.sleep.default);
        let sugar = self.constraints.sugar.unwrap_or(self.defaults.sugar.default);
        match control {
            Control::Gender => format!("< {} >", self.constraints.gender),
            Control::SleepMin => sleep.min.to_string(),
            Control::SleepMax => sleep.max.to_string(),
            Control::SugarMin => sugar.min.to_string(),
            Control::SugarMax => sugar.max.to_string(),
        }
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = pane("Filters");
        let inner = block.inner(area);
        let [list_area, info_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).areas(inner);

        let labels = [
            "Gender",
            "Sleep min (h)",
            "Sleep max (h)",
            "Sugar min (g)",
            "Sugar max (g)",
        ];
        let items = Control::ALL
            .iter()
            .zip(labels)
            .map(|(control, label)| ListItem::new(format!("{label:<14}{}", self.value(*control))))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .highlight_style(style::HIGHLIGHT)
            .highlight_symbol(">> ");
        let mut list_state = ListState::default();
        list_state.select(Some(self.focus.index()));

        let sleep = self.defaults.sleep.bounds;
        let sugar = self.defaults.sugar.bounds;
        let info = Text::from(vec![
            Line::raw(format!(
                "Rows: {} of {}",
                util::thousands(self.filtered_rows),
                util::thousands(self.total_rows)
            )),
            Line::styled(format!("Sleep bounds: {sleep}"), style::NOTICE),
            Line::styled(format!("Sugar bounds: {sugar}"), style::NOTICE),
        ]);

        block.render(area, buf);
        StatefulWidget::render(list, list_area, buf, &mut list_state);
        Paragraph::new(info).render(info_area, buf);
    }
}

struct ColumnSelector<'a> {
    columns: &'a [String],
    selected: &'a [String],
    cursor: usize,
}

impl Widget for ColumnSelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = self
            .columns
            .iter()
            .map(|name| {
                let mark = if self.selected.contains(name) { "x" } else { " " };
                ListItem::new(format!("[{mark}] {name}"))
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(pane("Columns"))
            .highlight_style(style::HIGHLIGHT)
            .highlight_symbol(">> ");
        let mut list_state = ListState::default();
        list_state.select((!self.columns.is_empty()).then_some(self.cursor));

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use nhanes_analysis::{derive::derive, filter::FilterDefaultsConfig, table::RawTable};

    use super::*;

    fn screen() -> OverviewScreen {
        let rows = derive(&RawTable::from_records(
            ["SEQN", "DR1TSUGR", "DR2TSUGR", "SLD012", "SLD013", "RIAGENDR", "BMXBMI"],
            [
                ["1", "100", "", "8", "8", "1", "22"],
                ["2", "40", "", "5", "5", "2", "30"],
                ["3", "60", "80", "7", "6", "2", "26"],
            ],
        ));
        let defaults = FilterDefaults::compute(&rows, &FilterDefaultsConfig::default());
        let constraints = defaults.constraints();
        OverviewScreen::new(PathBuf::from("test.csv"), Rc::new(rows), defaults, constraints)
    }

    fn press(screen: &mut OverviewScreen, code: KeyCode) -> ScreenAction {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_gender_control_cycles_options() {
        let mut screen = screen();
        assert_eq!(screen.view.filtered_rows, 3);

        // All -> Female -> Male -> All
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.constraints.gender, GenderFilter::from_label("Female"));
        assert_eq!(screen.view.filtered_rows, 2);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.view.filtered_rows, 1);
        assert_eq!(screen.view.kpis.mean_bmi.to_string(), "22.00");
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.constraints.gender, GenderFilter::All);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.constraints.gender, GenderFilter::from_label("Male"));
    }

    #[test]
    fn test_sleep_range_stays_ordered_and_bounded() {
        let mut screen = screen();
        assert_eq!(screen.constraints.sleep, Some(NumericRange::new(5, 8)));

        press(&mut screen, KeyCode::Down);
        for _ in 0..5 {
            press(&mut screen, KeyCode::Right);
        }
        assert_eq!(screen.constraints.sleep, Some(NumericRange::new(8, 8)));
        assert_eq!(screen.view.filtered_rows, 1);

        press(&mut screen, KeyCode::Down);
        for _ in 0..10 {
            press(&mut screen, KeyCode::Right);
        }
        assert_eq!(screen.constraints.sleep, Some(NumericRange::new(8, 12)));

        press(&mut screen, KeyCode::Char('r'));
        assert_eq!(screen.constraints, screen.defaults.constraints());
        assert_eq!(screen.view.filtered_rows, 3);
    }

    #[test]
    fn test_step_range() {
        let control = RangeControl {
            bounds: NumericRange::new(0, 400),
            default: NumericRange::new(0, 300),
        };
        let range = NumericRange::new(10, 20);
        assert_eq!(step_range(range, control, true, -15), NumericRange::new(0, 20));
        assert_eq!(step_range(range, control, true, 15), NumericRange::new(20, 20));
        assert_eq!(step_range(range, control, false, -15), NumericRange::new(10, 10));
        assert_eq!(step_range(range, control, false, 500), NumericRange::new(10, 400));
    }

    #[test]
    fn test_distribution_column_toggle() {
        let mut screen = screen();
        assert_eq!(
            screen.view.distribution_columns,
            ["BMXBMI", "sugar_avg", "sleep_avg"]
        );

        // keys only pick columns on the distributions tab
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.view.distributions.len(), 3);

        while screen.tab != Tab::Distributions {
            press(&mut screen, KeyCode::Tab);
        }
        let first = screen.view.numeric_columns[0].clone();
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(
            screen.selected_columns.contains(&first),
            !["BMXBMI", "sugar_avg", "sleep_avg"].contains(&first.as_str())
        );

        press(&mut screen, KeyCode::Char('r'));
        assert_eq!(screen.view.distributions.len(), 3);
    }

    #[test]
    fn test_quit_and_open_keys() {
        let mut screen = screen();
        assert_eq!(press(&mut screen, KeyCode::Char('o')), ScreenAction::OpenPath);
        assert_eq!(press(&mut screen, KeyCode::Esc), ScreenAction::Quit);
        assert_eq!(press(&mut screen, KeyCode::BackTab), ScreenAction::None);
        assert_eq!(screen.tab, Tab::Heatmap);
    }
}
