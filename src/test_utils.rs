//! Test utilities for common test setup.
//!
//! This module provides a scripted in-memory [`Transport`] shared by the unit tests of the
//! client, the controllers and the runtime handlers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::sources::{ApiClient, ApiError, ApiRequest, Method, RawResponse, Transport};

/// Request captured by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Verb.
    pub method: Method,
    /// Full path including prefix and query.
    pub path: String,
    /// Body bytes, if any.
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Body decoded as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

/// What: Replays canned responses in order and records every request.
///
/// Details:
/// - When the script runs dry the transport answers with a transport error so a missing
///   expectation shows up as a failed action rather than a hang.
#[derive(Default)]
pub struct ScriptedTransport {
    /// Pending replies, front first.
    replies: Mutex<VecDeque<Result<RawResponse, ApiError>>>,
    /// Requests seen so far.
    seen: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    /// Fresh transport behind an `Arc`.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a JSON reply.
    pub fn push_json(&self, status: u16, body: &serde_json::Value) {
        self.push(Ok(RawResponse {
            status,
            body: serde_json::to_vec(body).expect("serialize scripted body"),
            filename: None,
        }));
    }

    /// Queue a plain-text reply.
    pub fn push_text(&self, status: u16, body: &str) {
        self.push(Ok(RawResponse {
            status,
            body: body.as_bytes().to_vec(),
            filename: None,
        }));
    }

    /// Queue a file download reply.
    pub fn push_file(&self, body: &[u8], filename: Option<&str>) {
        self.push(Ok(RawResponse {
            status: 200,
            body: body.to_vec(),
            filename: filename.map(ToOwned::to_owned),
        }));
    }

    /// Queue a transport failure.
    pub fn push_transport_error(&self, message: &str) {
        self.push(Err(ApiError::Transport(message.to_string())));
    }

    /// Queue a raw result.
    pub fn push(&self, reply: Result<RawResponse, ApiError>) {
        self.replies
            .lock()
            .expect("replies mutex poisoned")
            .push_back(reply);
    }

    /// Snapshot of recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.seen.lock().expect("seen mutex poisoned").clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.seen
            .lock()
            .expect("seen mutex poisoned")
            .push(RecordedRequest {
                method: request.method,
                path: request.path.clone(),
                body: request.body.as_ref().map(|b| b.to_vec()),
            });
        self.replies
            .lock()
            .expect("replies mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Transport(format!(
                    "no scripted response for {} {}",
                    request.method, request.path
                )))
            })
    }
}

/// What: Provide an API client over a fresh scripted transport.
///
/// Output:
/// - `(transport, client)` with no base path.
pub fn scripted_client() -> (Arc<ScriptedTransport>, ApiClient) {
    let transport = ScriptedTransport::new();
    let api = ApiClient::new(transport.clone(), "");
    (transport, api)
}
