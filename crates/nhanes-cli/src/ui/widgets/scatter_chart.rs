use nhanes_analysis::summary::ScatterPlot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    symbols::Marker,
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Widget},
};

use crate::ui::widgets::{color, notice, pane};

/// Scatter of every series with its least-squares line.
#[derive(Debug)]
pub struct ScatterChart<'a> {
    title: &'a str,
    plot: &'a ScatterPlot,
}

impl<'a> ScatterChart<'a> {
    pub fn new(title: &'a str, plot: &'a ScatterPlot) -> Self {
        Self { title, plot }
    }
}

impl Widget for ScatterChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let Some((x_bounds, y_bounds)) = bounds(self.plot.points()) else {
            notice(self.title, "No rows with both values match the current filters.")
                .render(area, buf);
            return;
        };

        let trend_lines = self
            .plot
            .series
            .iter()
            .map(|series| {
                series.trend.map(|trend| {
                    let [lo, hi] = x_bounds;
                    [(lo, trend.predict(lo)), (hi, trend.predict(hi))]
                })
            })
            .collect::<Vec<_>>();

        let mut datasets = vec![];
        for (i, (series, trend)) in self.plot.series.iter().zip(&trend_lines).enumerate() {
            let style = Style::new().fg(color::series(i));
            let name = series.group.unwrap_or("All rows");
            datasets.push(
                Dataset::default()
                    .name(format!("{name} ({})", series.num_points))
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Scatter)
                    .style(style)
                    .data(&series.points),
            );
            if let Some(line) = trend {
                datasets.push(
                    Dataset::default()
                        .marker(Marker::Braille)
                        .graph_type(GraphType::Line)
                        .style(style)
                        .data(line),
                );
            }
        }

        let chart = Chart::new(datasets)
            .block(pane(self.title))
            .x_axis(axis(self.plot.x, x_bounds))
            .y_axis(axis(self.plot.y, y_bounds))
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)));
        chart.render(area, buf);
    }
}

fn axis(title: &str, bounds: [f64; 2]) -> Axis<'_> {
    Axis::default()
        .title(title)
        .bounds(bounds)
        .labels([
            format!("{:.1}", bounds[0]),
            format!("{:.1}", f64::midpoint(bounds[0], bounds[1])),
            format!("{:.1}", bounds[1]),
        ])
}

/// Axis bounds covering every point, widened when all points share a coordinate.
fn bounds(points: impl Iterator<Item = (f64, f64)>) -> Option<([f64; 2], [f64; 2])> {
    let (x, y) = points.fold(None, |acc: Option<([f64; 2], [f64; 2])>, (x, y)| {
        Some(match acc {
            None => ([x, x], [y, y]),
            Some((xb, yb)) => (
                [xb[0].min(x), xb[1].max(x)],
                [yb[0].min(y), yb[1].max(y)],
            ),
        })
    })?;
    Some((widen(x), widen(y)))
}

fn widen([lo, hi]: [f64; 2]) -> [f64; 2] {
    if hi > lo { [lo, hi] } else { [lo - 1.0, hi + 1.0] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(bounds(std::iter::empty()), None);
        assert_eq!(
            bounds([(1.0, 5.0), (3.0, 2.0)].into_iter()),
            Some(([1.0, 3.0], [2.0, 5.0]))
        );
        assert_eq!(
            bounds([(2.0, 7.0)].into_iter()),
            Some(([1.0, 3.0], [6.0, 8.0]))
        );
    }
}
