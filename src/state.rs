//! View state for the trip planner
//!
//! All user input and network completions are turned into `Event`s and fed
//! through `ViewState::apply`. The transition never performs I/O: requests,
//! audio and error reports come back as `Effect`s for the caller to run.
//!
//! The visible screen is derived from the state flags once per transition
//! and stored, so rendering code only ever reads `ViewState::screen`.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audio::{AudioCue, Track};
use crate::data::{
    CriteriaDraft, CriteriaError, FormField, SearchCriteria, TripDetails, TripOption,
    VacationType,
};

/// Screen shown for a given state; exactly one applies at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Welcome screen before the user starts
    Landing,
    /// Search criteria input
    Form,
    /// A request is outstanding
    Loading,
    /// Trip options to choose from
    Results,
    /// The last search matched nothing
    Empty,
    /// Details of the chosen trip
    Details,
}

/// Flag tuple the screen is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub loading: bool,
    pub has_interacted: bool,
    pub show_form: bool,
    pub has_options: bool,
    pub has_selection: bool,
}

/// Picks the screen for a flag tuple. Earlier rules take precedence.
pub fn derive_screen(flags: Flags) -> Screen {
    if flags.loading {
        return Screen::Loading;
    }
    if !flags.has_interacted {
        return Screen::Landing;
    }
    if flags.show_form {
        return Screen::Form;
    }
    match (flags.has_options, flags.has_selection) {
        (true, false) => Screen::Results,
        (false, false) => Screen::Empty,
        (_, true) => Screen::Details,
    }
}

/// Identifies one outgoing request; later requests get larger ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// The two calls made to the planning service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /plan_trip`
    SearchTrips,
    /// `POST /choose_trip`
    ChooseTrip,
}

impl Operation {
    /// Human-readable name used in logs and notices
    pub fn label(&self) -> &'static str {
        match self {
            Operation::SearchTrips => "search trips",
            Operation::ChooseTrip => "choose trip",
        }
    }
}

/// A failed request; transport, status and decoding failures all end up here
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFailure {
    pub operation: Operation,
    pub message: String,
}

impl RequestFailure {
    pub fn new(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not {}: {}", self.operation.label(), self.message)
    }
}

/// Vertical movement in lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// Scrolling in the details screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    Up,
    Down,
    Top,
}

/// Edits applied to the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEdit {
    NextField,
    PrevField,
    /// Type a character into the focused text field
    Insert(char),
    /// Delete from the focused field
    Backspace,
    /// Step the vacation type selector
    CycleType { forward: bool },
    /// Pick a vacation type directly
    SetType(VacationType),
}

/// Everything that can happen to the view
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Leave the landing screen
    Start,
    /// Edit the search form
    Form(FormEdit),
    /// Submit the form; `today` bounds the earliest start date
    SubmitForm { today: NaiveDate },
    /// `/plan_trip` answered
    SearchResolved {
        request: RequestId,
        options: Vec<TripOption>,
    },
    /// `/plan_trip` failed
    SearchFailed {
        request: RequestId,
        failure: RequestFailure,
    },
    /// Move the highlighted option
    MoveCursor(Step),
    /// Choose the option at a zero-based position
    SelectOption(usize),
    /// `/choose_trip` answered
    ChooseResolved {
        request: RequestId,
        details: TripDetails,
    },
    /// `/choose_trip` failed
    ChooseFailed {
        request: RequestId,
        failure: RequestFailure,
    },
    /// Discard results and go back to the form
    NewSearch,
    /// Leave the details screen
    BackToOptions,
    /// Scroll the details screen
    Scroll(Scroll),
    /// Toggle background music
    ToggleMute,
}

/// Work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Call `/plan_trip`
    SearchTrips {
        request: RequestId,
        criteria: SearchCriteria,
    },
    /// Call `/choose_trip` with a 1-based choice
    ChooseTrip { request: RequestId, choice: u32 },
    /// Change background music
    Audio(AudioCue),
    /// A request failed; the caller decides whether anyone sees it
    ReportFailure(RequestFailure),
}

/// Complete state of the trip planner view
#[derive(Debug, Clone)]
pub struct ViewState {
    screen: Screen,
    draft: CriteriaDraft,
    form_focus: FormField,
    form_error: Option<CriteriaError>,
    options: Vec<TripOption>,
    selected: Option<TripDetails>,
    loading: bool,
    has_interacted: bool,
    show_form: bool,
    muted: bool,
    cursor: usize,
    detail_scroll: u16,
    detail_limit: Option<u16>,
    next_request: u64,
    pending_search: Option<RequestId>,
    pending_choice: Option<RequestId>,
    choosing: Option<usize>,
    surface_errors: bool,
    last_failure: Option<RequestFailure>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ViewState {
    /// Creates the initial landing state
    ///
    /// # Arguments
    /// * `muted` - Whether background music starts muted
    /// * `surface_errors` - Whether request failures are kept for display
    pub fn new(muted: bool, surface_errors: bool) -> Self {
        Self {
            screen: Screen::Landing,
            draft: CriteriaDraft::default(),
            form_focus: FormField::default(),
            form_error: None,
            options: Vec::new(),
            selected: None,
            loading: false,
            has_interacted: false,
            show_form: false,
            muted,
            cursor: 0,
            detail_scroll: 0,
            detail_limit: None,
            next_request: 1,
            pending_search: None,
            pending_choice: None,
            choosing: None,
            surface_errors,
            last_failure: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn flags(&self) -> Flags {
        Flags {
            loading: self.loading,
            has_interacted: self.has_interacted,
            show_form: self.show_form,
            has_options: !self.options.is_empty(),
            has_selection: self.selected.is_some(),
        }
    }

    pub fn draft(&self) -> &CriteriaDraft {
        &self.draft
    }

    pub fn form_focus(&self) -> FormField {
        self.form_focus
    }

    pub fn form_error(&self) -> Option<&CriteriaError> {
        self.form_error.as_ref()
    }

    pub fn options(&self) -> &[TripOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<&TripDetails> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Highlighted option in the results list
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    /// Largest useful scroll offset, once the details screen has been measured
    pub fn detail_limit(&self) -> Option<u16> {
        self.detail_limit
    }

    /// Records how far the details body can scroll at the current size
    ///
    /// Called by the renderer after laying out the details. The offset is
    /// pulled back inside the new limit so a resize never leaves it past
    /// the end.
    pub fn set_detail_limit(&mut self, limit: u16) {
        self.detail_limit = Some(limit);
        self.detail_scroll = self.detail_scroll.min(limit);
    }

    /// Option whose details are being fetched, if any
    pub fn choosing(&self) -> Option<&TripOption> {
        self.choosing.and_then(|index| self.options.get(index))
    }

    /// Most recent failure, only kept when errors are surfaced
    pub fn last_failure(&self) -> Option<&RequestFailure> {
        self.last_failure.as_ref()
    }

    /// Track the current screen wants to hear
    pub fn track(&self) -> Track {
        if self.screen == Screen::Loading {
            Track::Loading
        } else {
            Track::Landing
        }
    }

    /// Effects to run once before the first event
    pub fn startup_effects(&self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.muted {
            effects.push(Effect::Audio(AudioCue::Unmute));
        }
        effects.push(Effect::Audio(AudioCue::Play(self.track())));
        effects
    }

    /// Applies one event and returns the work it requests
    ///
    /// Events that do not apply to the current screen, and completions of
    /// requests that are no longer the latest of their kind, leave the state
    /// untouched and return no effects.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        let track_before = self.track();
        let mut effects = Vec::new();

        match event {
            Event::Start => {
                if self.screen == Screen::Landing {
                    self.has_interacted = true;
                    self.show_form = true;
                }
            }
            Event::Form(edit) => {
                if self.screen == Screen::Form {
                    self.edit_form(edit);
                }
            }
            Event::SubmitForm { today } => {
                if self.screen == Screen::Form {
                    match self.draft.complete(today) {
                        Ok(criteria) => {
                            let request = self.issue_request();
                            self.form_error = None;
                            self.last_failure = None;
                            self.pending_search = Some(request);
                            self.loading = true;
                            effects.push(Effect::SearchTrips { request, criteria });
                        }
                        Err(err) => self.form_error = Some(err),
                    }
                }
            }
            Event::SearchResolved { request, options } => {
                if self.take_pending(Operation::SearchTrips, request) {
                    self.options = options;
                    self.cursor = 0;
                    self.loading = false;
                    self.show_form = false;
                }
            }
            Event::SearchFailed { request, failure } => {
                if self.take_pending(Operation::SearchTrips, request) {
                    self.loading = false;
                    self.record_failure(failure, &mut effects);
                }
            }
            Event::MoveCursor(step) => {
                if self.screen == Screen::Results {
                    self.move_cursor(step);
                }
            }
            Event::SelectOption(index) => {
                if self.screen == Screen::Results && index < self.options.len() {
                    let request = self.issue_request();
                    self.last_failure = None;
                    self.pending_choice = Some(request);
                    self.choosing = Some(index);
                    self.cursor = index;
                    self.loading = true;
                    effects.push(Effect::ChooseTrip {
                        request,
                        choice: (index + 1) as u32,
                    });
                }
            }
            Event::ChooseResolved { request, details } => {
                if self.take_pending(Operation::ChooseTrip, request) {
                    self.choosing = None;
                    self.selected = Some(details);
                    self.detail_scroll = 0;
                    self.detail_limit = None;
                    self.loading = false;
                }
            }
            Event::ChooseFailed { request, failure } => {
                if self.take_pending(Operation::ChooseTrip, request) {
                    self.choosing = None;
                    self.loading = false;
                    self.record_failure(failure, &mut effects);
                }
            }
            Event::NewSearch => {
                if matches!(
                    self.screen,
                    Screen::Empty | Screen::Results | Screen::Details
                ) {
                    self.selected = None;
                    self.options.clear();
                    self.show_form = true;
                    self.cursor = 0;
                    self.detail_scroll = 0;
                    self.detail_limit = None;
                    self.form_error = None;
                    self.last_failure = None;
                }
            }
            Event::BackToOptions => {
                if self.screen == Screen::Details {
                    self.selected = None;
                    self.detail_scroll = 0;
                    self.detail_limit = None;
                }
            }
            Event::Scroll(scroll) => {
                if self.screen == Screen::Details {
                    self.detail_scroll = match scroll {
                        Scroll::Up => self.detail_scroll.saturating_sub(1),
                        Scroll::Down => {
                            let next = self.detail_scroll.saturating_add(1);
                            self.detail_limit.map_or(next, |limit| next.min(limit))
                        }
                        Scroll::Top => 0,
                    };
                }
            }
            Event::ToggleMute => {
                self.muted = !self.muted;
                if self.muted {
                    effects.push(Effect::Audio(AudioCue::Mute));
                } else {
                    effects.push(Effect::Audio(AudioCue::Unmute));
                    effects.push(Effect::Audio(AudioCue::Play(track_before)));
                }
            }
        }

        let screen_before = self.screen;
        self.screen = derive_screen(self.flags());
        if self.screen != screen_before {
            info!(from = ?screen_before, to = ?self.screen, "screen changed");
        }

        let track_after = self.track();
        if track_after != track_before {
            effects.push(Effect::Audio(AudioCue::Pause(track_before)));
            effects.push(Effect::Audio(AudioCue::Play(track_after)));
        }

        effects
    }

    fn issue_request(&mut self) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        id
    }

    /// Clears the pending marker if `request` is the latest of its kind
    fn take_pending(&mut self, operation: Operation, request: RequestId) -> bool {
        let pending = match operation {
            Operation::SearchTrips => &mut self.pending_search,
            Operation::ChooseTrip => &mut self.pending_choice,
        };
        if *pending == Some(request) {
            *pending = None;
            true
        } else {
            debug!(
                operation = operation.label(),
                request = request.0,
                "discarding response to a superseded request"
            );
            false
        }
    }

    fn record_failure(&mut self, failure: RequestFailure, effects: &mut Vec<Effect>) {
        if self.surface_errors {
            self.last_failure = Some(failure.clone());
        }
        effects.push(Effect::ReportFailure(failure));
    }

    fn edit_form(&mut self, edit: FormEdit) {
        self.form_error = None;
        match edit {
            FormEdit::NextField => self.form_focus = self.form_focus.next(),
            FormEdit::PrevField => self.form_focus = self.form_focus.prev(),
            FormEdit::Insert(c) => {
                self.draft.insert(self.form_focus, c);
            }
            FormEdit::Backspace => self.draft.backspace(self.form_focus),
            FormEdit::CycleType { forward } => self.draft.cycle_vacation_type(forward),
            FormEdit::SetType(vacation_type) => self.draft.vacation_type = Some(vacation_type),
        }
    }

    fn move_cursor(&mut self, step: Step) {
        let count = self.options.len();
        if count == 0 {
            return;
        }
        self.cursor = match step {
            Step::Up if self.cursor == 0 => count - 1,
            Step::Up => self.cursor - 1,
            Step::Down => (self.cursor + 1) % count,
        };
    }
}

/// Functional form of [`ViewState::apply`]
pub fn reduce(mut state: ViewState, event: Event) -> (ViewState, Vec<Effect>) {
    let effects = state.apply(event);
    (state, effects)
}
