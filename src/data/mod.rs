//! Core data models for the trip planner
//!
//! This module contains the records exchanged with the planning service:
//! search criteria going out, and trip options and trip details coming back.

pub mod criteria;

pub use criteria::{CriteriaDraft, CriteriaError, FormField, SearchCriteria, VacationType};

use serde::{Deserialize, Serialize};

/// Flight leg of a trip as returned by the planning service
///
/// Only `airline` and `price` are guaranteed. The remaining fields are filled
/// in when the service forwards them from its flight search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Operating airline name
    pub airline: String,
    /// Round-trip price in USD
    pub price: f64,
    /// Departure airport name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    /// Arrival airport name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
    /// Local departure time as reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    /// Local arrival time as reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    /// Total flight duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Aircraft type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airplane: Option<String>,
    /// Cabin class (e.g. "Economy")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_class: Option<String>,
    /// Flight number of the first segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
}

impl Flight {
    /// Creates a flight with only the mandatory fields set
    pub fn new(airline: impl Into<String>, price: f64) -> Self {
        Self {
            airline: airline.into(),
            price,
            departure: None,
            arrival: None,
            departure_time: None,
            arrival_time: None,
            duration: None,
            airplane: None,
            travel_class: None,
            flight_number: None,
        }
    }

    /// Formats the route as "departure → arrival" when both ends are known
    pub fn route(&self) -> Option<String> {
        match (&self.departure, &self.arrival) {
            (Some(from), Some(to)) => Some(format!("{} \u{2192} {}", from, to)),
            _ => None,
        }
    }

    /// Formats the duration as "Xh Ym"
    pub fn duration_label(&self) -> Option<String> {
        self.duration
            .map(|minutes| format!("{}h {:02}m", minutes / 60, minutes % 60))
    }
}

/// Hotel stay of a trip as returned by the planning service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Hotel name
    pub name: String,
    /// Price in USD
    pub price: f64,
    /// Guest rating, if the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Hotel {
    /// Creates a hotel without a rating
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            rating: None,
        }
    }
}

/// One candidate trip returned by a search
///
/// Options carry no identifier: the service addresses them by their position
/// in the most recent result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripOption {
    /// Destination, usually "City (IATA)"
    pub destination: String,
    /// Flight plus hotel price in USD
    pub total_price: f64,
    /// Flight for this option
    pub flight: Flight,
    /// Hotel for this option
    pub hotel: Hotel,
}

/// Full record for a chosen trip, including the itinerary and pictures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    /// Destination, usually "City (IATA)"
    pub destination: String,
    /// Flight plus hotel price in USD
    pub total_price: f64,
    /// Flight for this trip
    pub flight: Flight,
    /// Hotel for this trip
    pub hotel: Hotel,
    /// Day-by-day plan, one entry per line
    #[serde(default)]
    pub daily_plan: String,
    /// Illustrations for the planned activities
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl TripDetails {
    /// Splits the daily plan into display lines, dropping blank ones
    pub fn daily_plan_items(&self) -> Vec<&str> {
        self.daily_plan
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// Formats a USD amount, dropping the cents when they are zero
pub fn format_price(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${:.0}", amount)
    } else {
        format!("${:.2}", amount)
    }
}
