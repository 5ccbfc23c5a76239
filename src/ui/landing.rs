//! Landing screen
//!
//! Renders the welcome banner shown before the user starts a search.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{centered_rect, colors, help_bar, screen_block};

const BANNER: [&str; 5] = [
    r"  _____     _         ____  _                              ",
    r" |_   _| __(_)_ __   |  _ \| | __ _ _ __  _ __   ___ _ __  ",
    r"   | || '__| | '_ \  | |_) | |/ _` | '_ \| '_ \ / _ \ '__| ",
    r"   | || |  | | |_) | |  __/| | (_| | | | | | | |  __/ |    ",
    r"   |_||_|  |_| .__/  |_|   |_|\__,_|_| |_|_| |_|\___|_|    ",
];

/// Renders the landing screen
pub fn render(frame: &mut Frame, area: Rect) {
    let block = screen_block("Trip Planner");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(colors::HEADER))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Welcome to Trip Planner",
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Flights, hotels and a day-by-day plan for your next vacation",
        Style::default().fg(colors::SECONDARY),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[ Start ]",
        Style::default()
            .fg(colors::SELECTED)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(help_bar(&[("Enter", "Start")]));

    let height = lines.len() as u16;
    let content_area = centered_rect(inner.width, height, inner);
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, content_area);
}
