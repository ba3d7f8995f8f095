use ratatui::{
    style::Style,
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};

pub use self::{
    distribution::*, group_bars::*, heatmap::*, kpi::*, scatter_chart::*,
};

mod distribution;
mod group_bars;
mod heatmap;
mod kpi;
mod scatter_chart;

mod color {
    use ratatui::style::Color;

    pub const BLUE: Color = Color::Rgb(31, 119, 180);
    pub const ORANGE: Color = Color::Rgb(255, 127, 14);
    pub const GREEN: Color = Color::Rgb(44, 160, 44);
    pub const BROWN: Color = Color::Rgb(140, 86, 75);
    pub const PURPLE: Color = Color::Rgb(148, 103, 189);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);

    /// Series colors, cycled in order.
    pub const PALETTE: [Color; 5] = [BLUE, ORANGE, GREEN, BROWN, PURPLE];

    pub fn series(index: usize) -> Color {
        PALETTE[index % PALETTE.len()]
    }
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::ui::widgets::color;

    pub const HIGHLIGHT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    pub const HELP: Style = Style::new().fg(Color::DarkGray);
    pub const NOTICE: Style = Style::new().fg(color::GRAY);
    pub const ERROR: Style = Style::new().fg(Color::Red);
}

/// Bordered panel with merged borders, the frame of every dashboard pane.
pub fn pane<'a>(title: impl Into<Line<'a>>) -> Block<'a> {
    Block::bordered()
        .merge_borders(MergeStrategy::Exact)
        .title(title)
}

/// A pane holding only a message, shown in place of a chart that cannot be drawn.
pub fn notice<'a>(title: &'a str, message: &'a str) -> Paragraph<'a> {
    notice_styled(title, message, style::NOTICE)
}

pub fn notice_styled<'a>(title: &'a str, message: &'a str, style: Style) -> Paragraph<'a> {
    Paragraph::new(message)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(pane(title))
}
