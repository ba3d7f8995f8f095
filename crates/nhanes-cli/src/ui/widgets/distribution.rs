use nhanes_analysis::summary::DistributionSummary;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Bar, BarChart, Paragraph, Widget},
};

use crate::{ui::widgets::pane, util};

const BOX_PLOT_WIDTH: usize = 24;

/// Statistics, a box plot and a histogram of one column.
#[derive(Debug)]
pub struct DistributionPanel<'a> {
    summary: &'a DistributionSummary,
}

impl<'a> DistributionPanel<'a> {
    pub fn new(summary: &'a DistributionSummary) -> Self {
        Self { summary }
    }
}

impl Widget for DistributionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let s = self.summary;
        let block = pane(s.column.as_str());
        let [stats_area, chart_area] =
            Layout::horizontal([Constraint::Length(30), Constraint::Fill(1)])
                .areas(block.inner(area));

        let [min, q1, median, q3, max] = s.box_plot;
        let text = vec![
            Line::raw(format!("  Count:  {:>10}", util::thousands(s.count))),
            Line::raw(format!("  Missing:{:>10}", util::thousands(s.missing))),
            Line::raw(format!("  Mean:   {:10.2}", s.mean)),
            Line::raw(format!("  StdDev: {:10.2}", s.std_dev)),
            Line::raw(format!("  Min:    {min:10.2}")),
            Line::raw(format!("  Q1:     {q1:10.2}")),
            Line::raw(format!("  Median: {median:10.2}")),
            Line::raw(format!("  Q3:     {q3:10.2}")),
            Line::raw(format!("  Max:    {max:10.2}")),
            Line::raw(""),
            Line::raw(format!("  {}", box_plot_line(s.box_plot, BOX_PLOT_WIDTH))),
        ];

        let chart = BarChart::new(
            s.histogram
                .iter()
                .map(|bin| {
                    Bar::with_label(format!("{:8.2}-{:8.2}", bin.start, bin.end), bin.count)
                        .text_value(bin.count.to_string())
                })
                .collect::<Vec<_>>(),
        )
        .direction(Direction::Horizontal)
        .bar_gap(0);

        block.render(area, buf);
        Paragraph::new(text).render(stats_area, buf);
        chart.render(chart_area, buf);
    }
}

/// Draws `[min, q1, median, q3, max]` as a text box plot `width` characters wide:
/// whiskers `─` from the extremes `├`/`┤` to the box `[`/`]`, median `|`.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn box_plot_line(points: [f64; 5], width: usize) -> String {
    let [min, q1, median, q3, max] = points;
    if width < 2 {
        return String::new();
    }
    let last = width - 1;
    let span = max - min;
    let pos = |v: f64| {
        if span > 0.0 {
            (((v - min) / span) * last as f64).round() as usize
        } else {
            last / 2
        }
    };

    let mut cells = vec!['─'; width];
    let (lo, hi) = (pos(q1), pos(q3));
    for cell in &mut cells[lo..=hi] {
        *cell = '=';
    }
    cells[0] = '├';
    cells[last] = '┤';
    cells[lo] = '[';
    cells[hi] = ']';
    cells[pos(median)] = '|';
    cells.into_iter().collect()
}
