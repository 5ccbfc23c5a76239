//! Loading screen
//!
//! Shown while a request to the planning service is outstanding. The dots
//! animate with the app tick.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{centered_rect, colors, screen_block};
use crate::data::VacationType;
use crate::state::ViewState;

/// Number of dots in the animation
const DOT_COUNT: u64 = 5;

/// Scenery line for the kind of trip being searched
fn scenery(vacation_type: Option<VacationType>) -> &'static str {
    match vacation_type {
        Some(VacationType::Ski) => "\u{26F7}  \u{1F3D4}  \u{2744}", // ⛷ 🏔 ❄
        Some(VacationType::Beach) => "\u{1F3D6}  \u{1F30A}  \u{2600}", // 🏖 🌊 ☀
        Some(VacationType::City) => "\u{1F3D9}  \u{1F687}  \u{1F303}", // 🏙 🚇 🌃
        None => "\u{2708}",                                          // ✈
    }
}

/// Headline for the current request
pub fn loading_message(view: &ViewState) -> String {
    match view.choosing() {
        Some(option) => format!("Getting your vacation to {} ready", option.destination),
        None => "Loading your perfect trip".to_string(),
    }
}

/// Animated trailing dots, one more per tick
fn dots(tick: u64) -> String {
    let count = (tick % (DOT_COUNT + 1)) as usize;
    format!("{:<width$}", ".".repeat(count), width = DOT_COUNT as usize)
}

/// Renders the loading screen
pub fn render(frame: &mut Frame, area: Rect, view: &ViewState, tick: u64) {
    let block = screen_block("Planning");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            scenery(view.draft().vacation_type),
            Style::default().fg(colors::HEADER),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                loading_message(view),
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(dots(tick), Style::default().fg(colors::SELECTED)),
        ]),
    ];

    let content_area = centered_rect(inner.width, lines.len() as u16, inner);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Flight, Hotel, TripOption};
    use crate::state::{Effect, Event, FormEdit};
    use crate::ui::buffer_text;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn searching_view() -> ViewState {
        let mut view = ViewState::default();
        view.apply(Event::Start);
        for text in ["2030-03-01", "2030-03-08", "1200"] {
            for c in text.chars() {
                view.apply(Event::Form(FormEdit::Insert(c)));
            }
            view.apply(Event::Form(FormEdit::NextField));
        }
        view.apply(Event::Form(FormEdit::SetType(VacationType::Ski)));
        view.apply(Event::SubmitForm {
            today: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        });
        view
    }

    #[test]
    fn test_dots_cycle() {
        assert_eq!(dots(0), "     ");
        assert_eq!(dots(3), "...  ");
        assert_eq!(dots(5), ".....");
        assert_eq!(dots(6), "     ");
    }

    #[test]
    fn test_loading_message_for_search() {
        let view = searching_view();
        assert_eq!(loading_message(&view), "Loading your perfect trip");
    }

    #[test]
    fn test_loading_message_for_choice() {
        let mut view = searching_view();
        let effects = view.apply(Event::SearchResolved {
            request: crate::state::RequestId(1),
            options: vec![TripOption {
                destination: "Innsbruck (INN)".to_string(),
                total_price: 1100.0,
                flight: Flight::new("Austrian", 300.0),
                hotel: Hotel::new("Alpenhof", 800.0),
            }],
        });
        assert!(!effects.iter().any(|e| matches!(e, Effect::ReportFailure(_))));

        view.apply(Event::SelectOption(0));

        assert_eq!(
            loading_message(&view),
            "Getting your vacation to Innsbruck (INN) ready"
        );
    }

    #[test]
    fn test_loading_screen_renders_message() {
        let view = searching_view();
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &view, 2);
            })
            .unwrap();

        let content = buffer_text(terminal.backend().buffer());
        assert!(content.contains("Loading your perfect trip.."));
    }
}
