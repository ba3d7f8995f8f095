use nhanes_analysis::summary::{Kpis, MeanValue};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::{pane, style};

/// The three headline means side by side.
#[derive(Debug)]
pub struct KpiRow<'a> {
    kpis: &'a Kpis,
}

impl<'a> KpiRow<'a> {
    pub fn new(kpis: &'a Kpis) -> Self {
        Self { kpis }
    }
}

impl Widget for KpiRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let areas: [Rect; 3] = Layout::horizontal([Constraint::Fill(1); 3])
            .spacing(Spacing::Overlap(1))
            .areas(area);
        let cards = [
            ("Average BMI", self.kpis.mean_bmi),
            ("Avg daily sugar (g)", self.kpis.mean_sugar),
            ("Avg sleep (h)", self.kpis.mean_sleep),
        ];
        for ((label, value), area) in cards.into_iter().zip(areas) {
            KpiCard { label, value }.render(area, buf);
        }
    }
}

struct KpiCard<'a> {
    label: &'a str,
    value: MeanValue,
}

impl Widget for KpiCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let value_style = match self.value {
            MeanValue::Value(_) => Style::new().add_modifier(Modifier::BOLD),
            MeanValue::NotAvailable => style::NOTICE,
        };
        let text = Text::from(Line::styled(self.value.to_string(), value_style)).centered();
        Paragraph::new(text)
            .block(pane(self.label))
            .render(area, buf);
    }
}
