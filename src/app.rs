//! Application shell for the trip planner
//!
//! This module owns the view state, maps keyboard input onto view events,
//! and keeps the few flags that only matter to the terminal (quit, help,
//! animation tick).

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cli::StartupConfig;
use crate::data::{FormField, VacationType};
use crate::state::{Effect, Event, FormEdit, Screen, Scroll, Step, ViewState};

/// Main application struct managing state and terminal flags
pub struct App {
    /// Trip planner view state
    pub view: ViewState,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Animation counter, advanced once per event loop iteration
    pub tick: u64,
    /// Source of the current date, used to validate the start date
    pub today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self {
            view: ViewState::default(),
            should_quit: false,
            show_help: false,
            tick: 0,
            today: local_today,
        }
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// This applies CLI arguments like --start to set the initial state.
    /// Returns the app together with the effects to run before the first
    /// frame.
    pub fn with_startup_config(config: &StartupConfig) -> (Self, Vec<Effect>) {
        let mut app = Self::new();
        app.view = ViewState::new(config.muted, config.surface_errors);

        let mut effects = app.view.startup_effects();
        if config.skip_landing {
            effects.extend(app.dispatch(Event::Start));
        }
        if let Some(vacation_type) = config.initial_vacation_type {
            effects.extend(app.dispatch(Event::Form(FormEdit::SetType(vacation_type))));
        }

        (app, effects)
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    /// Feeds an event into the view state
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        self.view.apply(event)
    }

    /// Advances the animation counter
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Handles keyboard input and returns the effects it caused
    ///
    /// # Key Bindings
    /// - `Ctrl+C`: Quit from anywhere
    /// - `q`: Quit
    /// - `m`: Toggle background music
    /// - `?`: Toggle help overlay
    /// - `Enter`/`Space` (landing): Start
    /// - `Tab`/`Shift+Tab`, `Up`/`Down` (form): Move between fields
    /// - `Left`/`Right`/`Space` (form, vacation type): Change type
    /// - `Enter` (form): Search
    /// - `Up`/`k`, `Down`/`j`, `Enter`, `1`-`9` (results): Pick a trip
    /// - `n` (results, empty, details): New search
    /// - `Esc`/`b` (details): Back to the trip list
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Vec<Effect> {
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.should_quit = true;
            return Vec::new();
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return Vec::new();
        }

        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Vec::new();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return Vec::new();
            }
            KeyCode::Char('m') => return self.dispatch(Event::ToggleMute),
            _ => {}
        }

        match self.key_to_event(key_event) {
            Some(event) => self.dispatch(event),
            None => Vec::new(),
        }
    }

    /// Maps a key to the view event it means on the current screen
    fn key_to_event(&self, key_event: KeyEvent) -> Option<Event> {
        match self.view.screen() {
            Screen::Landing => match key_event.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => Some(Event::Start),
                _ => None,
            },
            Screen::Form => self.form_key_to_event(key_event),
            // Only global keys work while a request is outstanding
            Screen::Loading => None,
            Screen::Results => match key_event.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Event::MoveCursor(Step::Up)),
                KeyCode::Down | KeyCode::Char('j') => Some(Event::MoveCursor(Step::Down)),
                KeyCode::Enter => Some(Event::SelectOption(self.view.cursor())),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c.to_digit(10).unwrap_or(1) as usize - 1;
                    Some(Event::SelectOption(index))
                }
                KeyCode::Char('n') => Some(Event::NewSearch),
                _ => None,
            },
            Screen::Empty => match key_event.code {
                KeyCode::Enter | KeyCode::Char('n') => Some(Event::NewSearch),
                _ => None,
            },
            Screen::Details => match key_event.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    Some(Event::BackToOptions)
                }
                KeyCode::Char('n') => Some(Event::NewSearch),
                KeyCode::Down | KeyCode::Char('j') => Some(Event::Scroll(Scroll::Down)),
                KeyCode::Up | KeyCode::Char('k') => Some(Event::Scroll(Scroll::Up)),
                KeyCode::Char('g') => Some(Event::Scroll(Scroll::Top)),
                _ => None,
            },
        }
    }

    fn form_key_to_event(&self, key_event: KeyEvent) -> Option<Event> {
        let focus = self.view.form_focus();
        let edit = match key_event.code {
            KeyCode::Enter => {
                return Some(Event::SubmitForm {
                    today: (self.today)(),
                })
            }
            KeyCode::Tab | KeyCode::Down => FormEdit::NextField,
            KeyCode::BackTab | KeyCode::Up => FormEdit::PrevField,
            KeyCode::Backspace => FormEdit::Backspace,
            KeyCode::Left if focus == FormField::VacationType => {
                FormEdit::CycleType { forward: false }
            }
            KeyCode::Right | KeyCode::Char(' ') if focus == FormField::VacationType => {
                FormEdit::CycleType { forward: true }
            }
            KeyCode::Char(c) if focus == FormField::VacationType => {
                let vacation_type = VacationType::all()
                    .iter()
                    .find(|t| t.as_str().starts_with(c.to_ascii_lowercase()))?;
                FormEdit::SetType(*vacation_type)
            }
            KeyCode::Char(c) => FormEdit::Insert(c),
            _ => return None,
        };
        Some(Event::Form(edit))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
