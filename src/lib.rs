//! Trip Planner Library
//!
//! Terminal client for a trip planning service. The binary wires these
//! modules to a real terminal; integration tests drive them directly.

pub mod app;
pub mod audio;
pub mod cli;
pub mod data;
pub mod logging;
pub mod runtime;
pub mod service;
pub mod state;
pub mod ui;
