//! Access to the remote planning service
//!
//! `client` speaks HTTP to the service; `dispatch` runs those calls in the
//! background and turns their outcomes into view events.

mod client;
mod dispatch;

pub use client::{PlannerClient, ServiceError, DEFAULT_BASE_URL};
pub use dispatch::Dispatcher;
