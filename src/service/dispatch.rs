//! Background request execution
//!
//! Runs planning service calls on tokio tasks and reports completions back
//! to the main loop as view events over a channel.

use tokio::sync::mpsc;
use tracing::debug;

use super::client::PlannerClient;
use crate::data::SearchCriteria;
use crate::state::{Event, Operation, RequestFailure, RequestId};

/// Capacity of the completion channel
const CHANNEL_CAPACITY: usize = 32;

/// Spawns requests and collects their completions
pub struct Dispatcher {
    client: PlannerClient,
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
}

impl Dispatcher {
    /// Creates a dispatcher for the given client
    pub fn new(client: PlannerClient) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            client,
            sender,
            receiver,
        }
    }

    /// Starts a trip search in the background
    ///
    /// Completes with `Event::SearchResolved` or `Event::SearchFailed`.
    pub fn search(&self, request: RequestId, criteria: SearchCriteria) {
        let client = self.client.clone();
        let tx = self.sender.clone();

        tokio::spawn(async move {
            let event = match client.plan_trip(&criteria).await {
                Ok(options) => Event::SearchResolved { request, options },
                Err(err) => Event::SearchFailed {
                    request,
                    failure: RequestFailure::new(Operation::SearchTrips, err.to_string()),
                },
            };
            if tx.send(event).await.is_err() {
                debug!(request = request.0, "search finished after shutdown");
            }
        });
    }

    /// Starts fetching details for a 1-based choice in the background
    ///
    /// Completes with `Event::ChooseResolved` or `Event::ChooseFailed`.
    pub fn choose(&self, request: RequestId, choice: u32) {
        let client = self.client.clone();
        let tx = self.sender.clone();

        tokio::spawn(async move {
            let event = match client.choose_trip(choice).await {
                Ok(details) => Event::ChooseResolved { request, details },
                Err(err) => Event::ChooseFailed {
                    request,
                    failure: RequestFailure::new(Operation::ChooseTrip, err.to_string()),
                },
            };
            if tx.send(event).await.is_err() {
                debug!(request = request.0, "choice finished after shutdown");
            }
        });
    }

    /// Returns a completed request without blocking, if one is ready
    pub fn try_recv(&mut self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next completed request
    pub async fn recv(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}
