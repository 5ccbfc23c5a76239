//! Trip details screen
//!
//! Shows the chosen trip: cost summary, flight, hotel, the day-by-day plan
//! and the image links. The body scrolls vertically; the help bar stays put.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{colors, help_bar, screen_block};
use crate::data::{format_price, TripDetails};
use crate::state::ViewState;

/// Renders the details of the selected trip
///
/// # Returns
/// The largest scroll offset that still fills the body, measured after
/// wrapping at the current width
pub fn render(frame: &mut Frame, area: Rect, view: &ViewState) -> u16 {
    let block = screen_block("Trip Details");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let mut max_scroll = 0;
    if let Some(details) = view.selected() {
        let body = chunks[0];
        let paragraph = Paragraph::new(detail_lines(details)).wrap(Wrap { trim: false });

        // Wrapped height, not line count: long plan entries take several rows
        let content_height =
            u16::try_from(paragraph.line_count(body.width)).unwrap_or(u16::MAX);
        max_scroll = content_height.saturating_sub(body.height);
        let scroll = view.detail_scroll().min(max_scroll);

        frame.render_widget(paragraph.scroll((scroll, 0)), body);
    }

    let hints = help_bar(&[
        ("\u{2191}\u{2193}/jk", "Scroll"),
        ("Esc", "Back"),
        ("n", "New Search"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[1]);

    max_scroll
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(colors::HEADER)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", label), Style::default().fg(colors::SECONDARY)),
        Span::styled(value, Style::default().fg(colors::PRIMARY)),
    ])
}

/// Builds every line of the details body
fn detail_lines(details: &TripDetails) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            details.destination.clone(),
            Style::default()
                .fg(colors::SELECTED)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Total Cost: ", Style::default().fg(colors::SECONDARY)),
            Span::styled(
                format_price(details.total_price),
                Style::default()
                    .fg(colors::PRICE)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        section_title("\u{2708} Flight"),
        field(
            "Airline",
            format!(
                "{} at {}",
                details.flight.airline,
                format_price(details.flight.price)
            ),
        ),
    ];

    let flight = &details.flight;
    if let Some(route) = flight.route() {
        lines.push(field("Route", route));
    }
    if let (Some(departs), Some(arrives)) = (&flight.departure_time, &flight.arrival_time) {
        lines.push(field("Times", format!("{} - {}", departs, arrives)));
    }
    if let Some(duration) = flight.duration_label() {
        lines.push(field("Duration", duration));
    }
    if let Some(number) = &flight.flight_number {
        lines.push(field("Flight", number.clone()));
    }
    if let Some(class) = &flight.travel_class {
        lines.push(field("Class", class.clone()));
    }
    if let Some(airplane) = &flight.airplane {
        lines.push(field("Aircraft", airplane.clone()));
    }

    lines.push(Line::from(""));
    lines.push(section_title("\u{1F3E8} Hotel"));
    lines.push(field(
        "Stay",
        format!(
            "{} at {} per stay",
            details.hotel.name,
            format_price(details.hotel.price)
        ),
    ));
    if let Some(rating) = details.hotel.rating {
        lines.push(field("Rating", format!("{:.1} \u{2605}", rating)));
    }

    lines.push(Line::from(""));
    lines.push(section_title("Daily Plan"));
    let plan = details.daily_plan_items();
    if plan.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No plan available",
            Style::default().fg(colors::SECONDARY),
        )));
    }
    for item in plan {
        lines.push(Line::from(vec![
            Span::styled("  \u{2022} ", Style::default().fg(colors::KEY)),
            Span::styled(item.to_string(), Style::default().fg(colors::PRIMARY)),
        ]));
    }

    if !details.image_urls.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_title("Images"));
        for (index, url) in details.image_urls.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  [{}] ", index + 1), Style::default().fg(colors::KEY)),
                Span::styled(url.clone(), Style::default().fg(colors::SECONDARY)),
            ]));
        }
    }

    lines
}
