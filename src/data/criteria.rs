//! Search criteria and the form draft they are built from
//!
//! The form edits a `CriteriaDraft` of raw text. Only a draft that passes
//! `CriteriaDraft::complete` becomes a `SearchCriteria` and is sent to the
//! planning service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of vacation the planner should look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacationType {
    /// Ski resorts and mountain towns
    Ski,
    /// Seaside destinations
    Beach,
    /// City breaks
    City,
}

impl VacationType {
    /// Returns a slice containing all vacation types in form order.
    pub fn all() -> &'static [VacationType] {
        &[VacationType::Ski, VacationType::Beach, VacationType::City]
    }

    /// Wire value expected by the planning service.
    pub fn as_str(&self) -> &'static str {
        match self {
            VacationType::Ski => "ski",
            VacationType::Beach => "beach",
            VacationType::City => "city",
        }
    }

    /// Returns a human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            VacationType::Ski => "Ski",
            VacationType::Beach => "Beach",
            VacationType::City => "City",
        }
    }

    /// Parses user input into a VacationType.
    ///
    /// Matching is case-insensitive and surrounding whitespace is ignored.
    /// Returns `None` if the input doesn't match any type.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<VacationType> {
        match s.trim().to_lowercase().as_str() {
            "ski" | "skiing" => Some(VacationType::Ski),
            "beach" => Some(VacationType::Beach),
            "city" => Some(VacationType::City),
            _ => None,
        }
    }

    /// Next type in form order, wrapping around.
    pub fn next(&self) -> VacationType {
        match self {
            VacationType::Ski => VacationType::Beach,
            VacationType::Beach => VacationType::City,
            VacationType::City => VacationType::Ski,
        }
    }

    /// Previous type in form order, wrapping around.
    pub fn prev(&self) -> VacationType {
        match self {
            VacationType::Ski => VacationType::City,
            VacationType::Beach => VacationType::Ski,
            VacationType::City => VacationType::Beach,
        }
    }
}

/// Validated search parameters, ready to be sent to `/plan_trip`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Kind of vacation
    pub vacation_type: VacationType,
    /// First day of the trip
    #[serde(with = "wire_date")]
    pub start_date: NaiveDate,
    /// Last day of the trip
    #[serde(with = "wire_date")]
    pub end_date: NaiveDate,
    /// Total budget in USD
    pub budget: f64,
}

impl SearchCriteria {
    /// Checks the invariants the form enforces on its inputs.
    ///
    /// # Arguments
    /// * `today` - The current local date; the trip may not start before it
    pub fn validate(&self, today: NaiveDate) -> Result<(), CriteriaError> {
        if self.start_date < today {
            return Err(CriteriaError::StartInPast {
                start: self.start_date,
                today,
            });
        }
        if self.end_date < self.start_date {
            return Err(CriteriaError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(CriteriaError::NonPositiveBudget);
        }
        Ok(())
    }
}

/// `YYYY-MM-DD` date encoding used by the planning service
mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Errors produced when turning a draft into search criteria
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    /// A required field was left empty
    #[error("{0} is required")]
    MissingField(FormField),

    /// A date field does not hold a `YYYY-MM-DD` date
    #[error("{field} must be a date like 2025-06-01 (got '{value}')")]
    InvalidDate { field: FormField, value: String },

    /// The budget is not a number
    #[error("Budget must be a number (got '{0}')")]
    InvalidBudget(String),

    /// The trip starts before today
    #[error("Start date {start} is before today ({today})")]
    StartInPast { start: NaiveDate, today: NaiveDate },

    /// The trip ends before it starts
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    /// The budget is zero, negative or not finite
    #[error("Budget must be greater than zero")]
    NonPositiveBudget,
}

/// Input fields of the search form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    StartDate,
    EndDate,
    Budget,
    VacationType,
}

impl FormField {
    /// Returns a slice containing all fields in focus order.
    pub fn all() -> &'static [FormField] {
        &[
            FormField::StartDate,
            FormField::EndDate,
            FormField::Budget,
            FormField::VacationType,
        ]
    }

    /// Field label as shown in the form.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::StartDate => "Start Date",
            FormField::EndDate => "End Date",
            FormField::Budget => "Budget (USD)",
            FormField::VacationType => "Vacation Type",
        }
    }

    /// Next field, wrapping to the first.
    pub fn next(&self) -> FormField {
        match self {
            FormField::StartDate => FormField::EndDate,
            FormField::EndDate => FormField::Budget,
            FormField::Budget => FormField::VacationType,
            FormField::VacationType => FormField::StartDate,
        }
    }

    /// Previous field, wrapping to the last.
    pub fn prev(&self) -> FormField {
        match self {
            FormField::StartDate => FormField::VacationType,
            FormField::EndDate => FormField::StartDate,
            FormField::Budget => FormField::EndDate,
            FormField::VacationType => FormField::Budget,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maximum length of a text field in the form
const MAX_FIELD_LEN: usize = 12;

/// Partially filled search form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaDraft {
    /// Start date as typed
    pub start_date: String,
    /// End date as typed
    pub end_date: String,
    /// Budget as typed
    pub budget: String,
    /// Selected vacation type, if any
    pub vacation_type: Option<VacationType>,
}

impl CriteriaDraft {
    /// Returns the text buffer behind a text field.
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::StartDate => Some(&self.start_date),
            FormField::EndDate => Some(&self.end_date),
            FormField::Budget => Some(&self.budget),
            FormField::VacationType => None,
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::StartDate => Some(&mut self.start_date),
            FormField::EndDate => Some(&mut self.end_date),
            FormField::Budget => Some(&mut self.budget),
            FormField::VacationType => None,
        }
    }

    /// Appends a character to a text field.
    ///
    /// Date fields accept digits and `-`, the budget accepts digits and `.`.
    /// Returns whether the character was accepted.
    pub fn insert(&mut self, field: FormField, c: char) -> bool {
        let accepted = match field {
            FormField::StartDate | FormField::EndDate => c.is_ascii_digit() || c == '-',
            FormField::Budget => c.is_ascii_digit() || c == '.',
            FormField::VacationType => false,
        };
        if !accepted {
            return false;
        }
        match self.text_mut(field) {
            Some(buffer) if buffer.len() < MAX_FIELD_LEN => {
                buffer.push(c);
                true
            }
            _ => false,
        }
    }

    /// Removes the last character of a text field, or clears the vacation type.
    pub fn backspace(&mut self, field: FormField) {
        match self.text_mut(field) {
            Some(buffer) => {
                buffer.pop();
            }
            None => self.vacation_type = None,
        }
    }

    /// Selects the next vacation type, starting from the first when unset.
    pub fn cycle_vacation_type(&mut self, forward: bool) {
        self.vacation_type = Some(match (self.vacation_type, forward) {
            (None, true) => VacationType::Ski,
            (None, false) => VacationType::City,
            (Some(current), true) => current.next(),
            (Some(current), false) => current.prev(),
        });
    }

    /// Parses and validates the draft.
    ///
    /// Fields are checked in form order, so the first offending field is the
    /// one reported.
    ///
    /// # Arguments
    /// * `today` - The current local date
    pub fn complete(&self, today: NaiveDate) -> Result<SearchCriteria, CriteriaError> {
        let start_date = parse_date(FormField::StartDate, &self.start_date)?;
        let end_date = parse_date(FormField::EndDate, &self.end_date)?;

        let budget_text = self.budget.trim();
        if budget_text.is_empty() {
            return Err(CriteriaError::MissingField(FormField::Budget));
        }
        let budget: f64 = budget_text
            .parse()
            .map_err(|_| CriteriaError::InvalidBudget(budget_text.to_string()))?;

        let vacation_type = self
            .vacation_type
            .ok_or(CriteriaError::MissingField(FormField::VacationType))?;

        let criteria = SearchCriteria {
            vacation_type,
            start_date,
            end_date,
            budget,
        };
        criteria.validate(today)?;
        Ok(criteria)
    }
}

fn parse_date(field: FormField, value: &str) -> Result<NaiveDate, CriteriaError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CriteriaError::MissingField(field));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CriteriaError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
