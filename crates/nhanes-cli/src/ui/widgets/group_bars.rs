use nhanes_analysis::summary::GroupMean;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Bar, BarChart, Widget},
};

use crate::ui::widgets::{color, pane};

/// Mean per group as vertical bars, labelled with the value to two decimals.
#[derive(Debug)]
pub struct GroupBarChart<'a> {
    title: &'a str,
    groups: &'a [GroupMean],
}

impl<'a> GroupBarChart<'a> {
    pub fn new(title: &'a str, groups: &'a [GroupMean]) -> Self {
        Self { title, groups }
    }
}

impl Widget for GroupBarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = pane(self.title);
        let inner_width = block.inner(area).width;
        let num_bars = u16::try_from(self.groups.len().max(1)).unwrap_or(u16::MAX);
        let bar_width = (inner_width / num_bars).saturating_sub(2).clamp(3, 20);

        let bars = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let text = group
                    .mean
                    .map_or_else(|| "N/A".to_owned(), |mean| format!("{mean:.2}"));
                let label = format!("{} (n={})", group.group, group.count);
                Bar::with_label(label, bar_value(group.mean))
                    .text_value(text)
                    .style(Style::new().fg(color::series(i)))
            })
            .collect::<Vec<_>>();

        BarChart::new(bars)
            .block(block)
            .bar_width(bar_width)
            .bar_gap(2)
            .render(area, buf);
    }
}

/// Bar height in hundredths, so that two decimals stay visible in relative heights.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_value(mean: Option<f64>) -> u64 {
    mean.map_or(0, |mean| (mean.max(0.0) * 100.0).round() as u64)
}
