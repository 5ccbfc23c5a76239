//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, colors};

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let area = frame.area();

    let overlay_area = centered_rect(54, 26, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Search Form"),
        help_line("Tab/\u{2193}", "Next field"),
        help_line("Shift+Tab/\u{2191}", "Previous field"),
        help_line("\u{2190}/\u{2192}/Space", "Change vacation type"),
        help_line("s/b/c", "Pick Ski, Beach or City"),
        help_line("Enter", "Search trips"),
        Line::from(""),
        section("Trip Options"),
        help_line("\u{2191}/k, \u{2193}/j", "Move selection up/down"),
        help_line("Enter, 1-9", "Choose a trip"),
        help_line("n", "New search"),
        Line::from(""),
        section("Trip Details"),
        help_line("\u{2191}/k, \u{2193}/j", "Scroll"),
        help_line("g", "Back to top"),
        help_line("Esc/b", "Back to options"),
        Line::from(""),
        section("Other"),
        help_line("m", "Mute/unmute music"),
        help_line("?", "Toggle this help"),
        help_line("q", "Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Creates a help line with key and description
fn help_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", key), Style::default().fg(colors::SELECTED)),
        Span::raw(description.to_string()),
    ])
}
