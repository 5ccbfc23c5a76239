//! Search form screen
//!
//! Renders the criteria form: two dates, a budget and the vacation type,
//! with the focused field highlighted and any validation error below.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{colors, help_bar, screen_block};
use crate::data::{FormField, VacationType};
use crate::state::ViewState;

/// Width of the label column
const LABEL_WIDTH: usize = 16;

/// Renders the search form
pub fn render(frame: &mut Frame, area: Rect, view: &ViewState) {
    let block = screen_block("Let's start finding your vacation!");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(8), // Fields
            Constraint::Length(2), // Validation message
            Constraint::Min(0),
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

    let mut lines = Vec::new();
    for field in FormField::all() {
        lines.push(field_line(view, *field));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    if let Some(err) = view.form_error() {
        let message = Line::from(vec![
            Span::styled("  \u{26A0} ", Style::default().fg(colors::ERROR)),
            Span::styled(err.to_string(), Style::default().fg(colors::ERROR)),
        ]);
        frame.render_widget(Paragraph::new(message), chunks[2]);
    }

    let hints = help_bar(&[
        ("Tab/\u{2193}", "Next field"),
        ("\u{2190}/\u{2192}", "Vacation type"),
        ("Enter", "Search Trips"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[4]);
}

/// Builds one "label: value" row of the form
fn field_line(view: &ViewState, field: FormField) -> Line<'static> {
    let focused = view.form_focus() == field;
    let marker = if focused { "\u{25B6} " } else { "  " };

    let label_style = if focused {
        Style::default()
            .fg(colors::SELECTED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::SECONDARY)
    };

    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(
            format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
            label_style,
        ),
    ];

    match view.draft().text(field) {
        Some(text) => {
            let (shown, value_style) = if text.is_empty() {
                (placeholder(field).to_string(), Style::default().fg(colors::SECONDARY))
            } else {
                (text.to_string(), Style::default().fg(colors::PRIMARY))
            };
            spans.push(Span::styled(format!("[ {} ]", shown), value_style));
            if focused {
                spans.push(Span::styled(
                    "\u{2588}",
                    Style::default().fg(colors::SELECTED),
                ));
            }
        }
        None => spans.extend(vacation_type_spans(view.draft().vacation_type)),
    }

    Line::from(spans)
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::StartDate | FormField::EndDate => "YYYY-MM-DD",
        FormField::Budget => "amount",
        FormField::VacationType => "",
    }
}

/// Renders the vacation type selector as radio buttons
fn vacation_type_spans(selected: Option<VacationType>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for vacation_type in VacationType::all() {
        let is_selected = selected == Some(*vacation_type);
        let indicator = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // Filled or empty circle
        let style = if is_selected {
            Style::default()
                .fg(colors::SELECTED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::SECONDARY)
        };
        spans.push(Span::raw("["));
        spans.push(Span::styled(indicator, style));
        spans.push(Span::styled(vacation_type.label(), style));
        spans.push(Span::raw("] "));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Event, FormEdit};
    use crate::ui::buffer_text;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(view: &ViewState) -> String {
        let backend = TestBackend::new(90, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, view);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn form_view() -> ViewState {
        let mut view = ViewState::default();
        view.apply(Event::Start);
        view
    }

    #[test]
    fn test_form_renders_all_fields_with_placeholders() {
        let content = draw(&form_view());

        assert!(content.contains("Start Date:"));
        assert!(content.contains("End Date:"));
        assert!(content.contains("Budget (USD):"));
        assert!(content.contains("Vacation Type:"));
        assert!(content.contains("YYYY-MM-DD"));
        assert!(content.contains("Ski"));
        assert!(content.contains("Beach"));
        assert!(content.contains("City"));
    }

    #[test]
    fn test_form_renders_typed_values() {
        let mut view = form_view();
        for c in "2025-06-01".chars() {
            view.apply(Event::Form(FormEdit::Insert(c)));
        }

        let content = draw(&view);

        assert!(content.contains("[ 2025-06-01 ]"));
    }

    #[test]
    fn test_form_renders_validation_error() {
        let mut view = form_view();
        view.apply(Event::SubmitForm {
            today: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        });

        let content = draw(&view);

        assert!(content.contains("Start Date is required"));
    }
}
