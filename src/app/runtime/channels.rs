use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::logic::{Outcome, Request};
use crate::sources::ApiClient;

use super::workers::api::spawn_api_worker;

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Terminal events come from the reader thread; requests go to the API worker and
///   outcomes come back, so only the event loop ever touches `AppState`.
pub struct Channels {
    /// Terminal events sender (reader thread side).
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Terminal events receiver.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Tells the reader thread to stop.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Requests for the API worker.
    pub req_tx: mpsc::UnboundedSender<Request>,
    /// Results from the API worker.
    pub outcome_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl Channels {
    /// What: Create all channels and spawn the API worker.
    ///
    /// Inputs:
    /// - `api`: Client the worker uses for every request.
    ///
    /// Output:
    /// - Returns a `Channels` struct with all senders and receivers initialized
    pub fn new(api: ApiClient) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        spawn_api_worker(api, req_rx, outcome_tx);
        Self {
            event_tx,
            event_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
            req_tx,
            outcome_rx,
        }
    }
}
