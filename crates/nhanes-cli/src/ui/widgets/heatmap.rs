use nhanes_analysis::summary::CorrelationMatrix;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize as _},
    widgets::{Cell, Row, Table, Widget},
};

use crate::ui::widgets::pane;

const CELL_WIDTH: u16 = 10;

/// Correlation matrix as a table of colored cells, red for positive and blue for negative.
#[derive(Debug)]
pub struct CorrelationHeatmap<'a> {
    title: &'a str,
    matrix: &'a CorrelationMatrix,
}

impl<'a> CorrelationHeatmap<'a> {
    pub fn new(title: &'a str, matrix: &'a CorrelationMatrix) -> Self {
        Self { title, matrix }
    }
}

impl Widget for CorrelationHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let columns = &self.matrix.columns;
        let header = Row::new(
            std::iter::once(Cell::from(""))
                .chain(columns.iter().map(|name| Cell::from(*name).bold())),
        );
        let rows = columns.iter().zip(&self.matrix.values).map(|(name, values)| {
            let cells = values.iter().map(|r| {
                let text = r.map_or_else(|| "N/A".to_owned(), |r| format!("{r:.2}"));
                let bg = correlation_color(*r);
                Cell::from(text).style(Style::new().bg(bg).fg(text_color(bg)))
            });
            Row::new(std::iter::once(Cell::from(*name).bold()).chain(cells))
        });
        let widths = std::iter::repeat_n(Constraint::Length(CELL_WIDTH), columns.len() + 1);

        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(pane(self.title))
            .render(area, buf);
    }
}

const NEGATIVE: (u8, u8, u8) = (33, 102, 172);
const NEUTRAL: (u8, u8, u8) = (247, 247, 247);
const POSITIVE: (u8, u8, u8) = (178, 24, 43);

/// Diverging blue/white/red scale over `[-1, 1]`; undefined values are dark gray.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn correlation_color(r: Option<f64>) -> Color {
    let Some(r) = r else {
        return Color::DarkGray;
    };
    let r = r.clamp(-1.0, 1.0);
    let (from, to, t) = if r < 0.0 {
        (NEUTRAL, NEGATIVE, -r)
    } else {
        (NEUTRAL, POSITIVE, r)
    };
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

fn text_color(bg: Color) -> Color {
    match bg {
        Color::Rgb(r, g, b) if u16::from(r) + u16::from(g) + u16::from(b) > 3 * 128 => {
            Color::Black
        }
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_color_scale() {
        assert_eq!(correlation_color(Some(1.0)), Color::Rgb(178, 24, 43));
        assert_eq!(correlation_color(Some(-1.0)), Color::Rgb(33, 102, 172));
        assert_eq!(correlation_color(Some(0.0)), Color::Rgb(247, 247, 247));
        assert_eq!(correlation_color(Some(5.0)), correlation_color(Some(1.0)));
        assert_eq!(correlation_color(None), Color::DarkGray);
    }

    #[test]
    fn test_text_stays_readable() {
        assert_eq!(text_color(correlation_color(Some(0.0))), Color::Black);
        assert_eq!(text_color(correlation_color(Some(1.0))), Color::White);
        assert_eq!(text_color(Color::DarkGray), Color::White);
    }
}
