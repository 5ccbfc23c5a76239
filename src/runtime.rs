//! Effect execution
//!
//! Carries out the effects produced by view transitions: requests go to the
//! dispatcher, audio cues to the ambient player, failures to the log.

use tracing::error;

use crate::audio::AmbientAudio;
use crate::service::Dispatcher;
use crate::state::{Effect, Event};

/// Owns everything that performs I/O on behalf of the view
pub struct Runtime {
    dispatcher: Dispatcher,
    audio: AmbientAudio,
}

impl Runtime {
    pub fn new(dispatcher: Dispatcher, audio: AmbientAudio) -> Self {
        Self { dispatcher, audio }
    }

    pub fn audio(&self) -> &AmbientAudio {
        &self.audio
    }

    /// Runs a single effect. Never blocks on the network.
    pub fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::SearchTrips { request, criteria } => self.dispatcher.search(request, criteria),
            Effect::ChooseTrip { request, choice } => self.dispatcher.choose(request, choice),
            Effect::Audio(cue) => self.audio.handle(cue),
            Effect::ReportFailure(failure) => {
                error!(
                    operation = failure.operation.label(),
                    message = %failure.message,
                    "request failed"
                );
            }
        }
    }

    /// Runs effects in order
    pub fn execute_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Returns a completed request without blocking, if one is ready
    pub fn try_recv(&mut self) -> Option<Event> {
        self.dispatcher.try_recv()
    }

    /// Waits for the next completed request
    pub async fn recv(&mut self) -> Option<Event> {
        self.dispatcher.recv().await
    }
}
