//! Trip options list and the empty-results screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{centered_rect, colors, help_bar, screen_block};
use crate::data::{format_price, TripOption};
use crate::state::ViewState;

/// Renders the list of trip options with the cursor highlighted
pub fn render_options(frame: &mut Frame, area: Rect, view: &ViewState) {
    let block = screen_block("Trip Options");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = view
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| option_item(index, option, index == view.cursor()))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(view.cursor()));

    let list = List::new(items);
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let hints = help_bar(&[
        ("\u{2191}\u{2193}/jk", "Navigate"),
        ("Enter/1-9", "Choose"),
        ("n", "New Search"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[1]);
}

/// One option as a three-line list item
fn option_item(index: usize, option: &TripOption, is_cursor: bool) -> ListItem<'static> {
    let marker = if is_cursor { "\u{25B6} " } else { "  " };
    let title_style = if is_cursor {
        Style::default()
            .fg(colors::SELECTED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    };

    let title = Line::from(vec![
        Span::styled(marker, title_style),
        Span::styled(format!("{}. {}", index + 1, option.destination), title_style),
        Span::raw("  "),
        Span::styled(
            format!("Total: {}", format_price(option.total_price)),
            Style::default().fg(colors::PRICE),
        ),
    ]);

    let flight = Line::from(vec![
        Span::raw("     \u{2708} "),
        Span::styled(
            format!(
                "{} at {}",
                option.flight.airline,
                format_price(option.flight.price)
            ),
            Style::default().fg(colors::SECONDARY),
        ),
    ]);

    let hotel = Line::from(vec![
        Span::raw("     \u{1F3E8} "),
        Span::styled(
            format!(
                "{} at {} per night",
                option.hotel.name,
                format_price(option.hotel.price)
            ),
            Style::default().fg(colors::SECONDARY),
        ),
    ]);

    ListItem::new(vec![title, flight, hotel, Line::from("")])
}

/// Renders the screen shown when a search returned no options
pub fn render_empty(frame: &mut Frame, area: Rect) {
    let block = screen_block("No Trip Options Found");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            "No Trip Options Found",
            Style::default()
                .fg(colors::ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "No suitable trip options found within the given budget.",
            Style::default().fg(colors::SECONDARY),
        )),
        Line::from(""),
        help_bar(&[("Enter/n", "New Search")]),
    ];

    let content_area = centered_rect(inner.width, lines.len() as u16, inner);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area,
    );
}
