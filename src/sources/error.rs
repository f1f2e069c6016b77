//! Uniform failure contract for every call made to the indexing service.

use thiserror::Error;

/// What: Failure of a single request to the indexing service.
///
/// Details:
/// - `Display` is always the operator-facing message, so every host can surface any variant
///   verbatim after its own prefix (e.g. `Failed to load settings: {err}`).
/// - No variant is retried automatically; callers convert it to a status line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect/DNS/TLS/timeout).
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text, or `Request failed: {status}` when the body was empty.
        message: String,
    },
    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// What: Build the error for a non-success response.
    ///
    /// Inputs:
    /// - `status`: HTTP status code.
    /// - `body`: Raw response body.
    ///
    /// Output:
    /// - `ApiError::Status` carrying the body text, or the generic message when the body is blank.
    #[must_use]
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let message = if text.trim().is_empty() {
            format!("Request failed: {status}")
        } else {
            text.into_owned()
        };
        Self::Status { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    /// What: Non-2xx bodies become the message; blank bodies fall back to the status text.
    ///
    /// Inputs:
    /// - A 500 with `db locked`, a 502 with an empty body, and a 404 with whitespace only.
    ///
    /// Output:
    /// - Display strings match the body or `Request failed: {status}`.
    fn status_error_uses_body_or_generic_message() {
        assert_eq!(ApiError::from_status(500, b"db locked").to_string(), "db locked");
        assert_eq!(
            ApiError::from_status(502, b"").to_string(),
            "Request failed: 502"
        );
        assert_eq!(
            ApiError::from_status(404, b"  \n").to_string(),
            "Request failed: 404"
        );
    }

    #[test]
    fn transport_and_decode_display() {
        assert_eq!(
            ApiError::Transport("connection refused".into()).to_string(),
            "connection refused"
        );
        assert_eq!(
            ApiError::Decode("expected value".into()).to_string(),
            "Invalid response: expected value"
        );
    }
}
