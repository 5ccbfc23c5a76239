//! UI rendering module for the trip planner
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components. Each screen has its own file;
//! `render` picks the one matching the current view state.

pub mod help_overlay;
pub mod landing;
pub mod loading;
pub mod search_form;
pub mod trip_detail;
pub mod trip_list;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::state::Screen;

/// Color scheme shared by all screens
pub(crate) mod colors {
    use ratatui::style::Color;

    /// Borders and section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Highlighted item
    pub const SELECTED: Color = Color::Yellow;
    /// Prices
    pub const PRICE: Color = Color::Green;
    /// Errors and warnings
    pub const ERROR: Color = Color::LightRed;
    /// Key hints
    pub const KEY: Color = Color::Cyan;
}

/// Renders the whole UI for the current state
///
/// Takes the app mutably so the details screen can report how far its
/// body scrolls at the current terminal size.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match app.view.screen() {
        Screen::Landing => landing::render(frame, chunks[0]),
        Screen::Form => search_form::render(frame, chunks[0], &app.view),
        Screen::Loading => loading::render(frame, chunks[0], &app.view, app.tick),
        Screen::Results => trip_list::render_options(frame, chunks[0], &app.view),
        Screen::Empty => trip_list::render_empty(frame, chunks[0]),
        Screen::Details => {
            let limit = trip_detail::render(frame, chunks[0], &app.view);
            app.view.set_detail_limit(limit);
        }
    }

    render_status_line(frame, chunks[1], app);

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Renders the bottom status line: mute state and the latest failure
fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let mute_label = if app.view.is_muted() {
        "\u{1F507} muted (m)"
    } else {
        "\u{1F50A} music (m)"
    };

    let mut spans = vec![
        Span::styled(mute_label, Style::default().fg(colors::SECONDARY)),
        Span::raw("  "),
        Span::styled("? help  q quit", Style::default().fg(colors::SECONDARY)),
    ];

    if let Some(failure) = app.view.last_failure() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            failure.to_string(),
            Style::default().fg(colors::ERROR),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Creates the bordered frame every screen is drawn in
pub(crate) fn screen_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Builds a key hint line from (key, description) pairs
pub(crate) fn help_bar(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(key.to_string(), Style::default().fg(colors::KEY)));
        spans.push(Span::styled(
            format!(" {}  ", description),
            Style::default().fg(colors::SECONDARY),
        ));
    }
    Line::from(spans)
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Collects a rendered buffer into a single string (for tests)
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}
