use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};

use crate::core::theme::{Rgb, Role, Theme};
use crate::ui::graph::Series;

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn fg(theme: &Theme, role: Role) -> Style {
    Style::default().fg(to_color(theme.color(role)))
}

/// Rounded panel frame titled in the section's color
pub fn panel_block<'a>(title: String, theme: &Theme, accent: Role) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            fg(theme, accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(fg(theme, Role::Border))
}

/// Gauge colored by usage level
pub fn usage_gauge<'a>(theme: &Theme, percent: f64, label: String) -> Gauge<'a> {
    Gauge::default()
        .gauge_style(
            Style::default()
                .fg(to_color(theme.usage_color(percent)))
                .bg(to_color(theme.graph_empty)),
        )
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(Span::styled(label, fg(theme, Role::Label)))
}

/// Plain graph rows in one color
pub fn graph_paragraph<'a>(rows: Vec<String>, color: Rgb) -> Paragraph<'a> {
    let style = Style::default().fg(to_color(color));
    Paragraph::new(
        rows.into_iter()
            .map(|row| Line::styled(row, style))
            .collect::<Vec<_>>(),
    )
}

/// Dual graph rows, each cell colored by which series lit it.
pub fn dual_graph_paragraph<'a>(
    rows: Vec<Vec<(char, Series)>>,
    first: Rgb,
    second: Rgb,
    both: Rgb,
) -> Paragraph<'a> {
    let lines = rows
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, series)| {
                        let style = match series {
                            Series::First => Style::default().fg(to_color(first)),
                            Series::Second => Style::default().fg(to_color(second)),
                            Series::Both => Style::default().fg(to_color(both)),
                            Series::None => Style::default(),
                        };
                        Span::styled(ch.to_string(), style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();
    Paragraph::new(lines)
}

/// `label value` pair as one line
pub fn labeled<'a>(theme: &Theme, label: &str, value: String, value_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{} ", label), fg(theme, Role::Label)),
        Span::styled(value, value_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::THEMES;

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_fg_uses_role_color() {
        let theme = &THEMES[1];
        assert_eq!(fg(theme, Role::Cpu).fg, Some(to_color(theme.cpu)));
    }
}
