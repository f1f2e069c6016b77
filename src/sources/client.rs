//! HTTP client abstraction: a transport seam plus the path-prefixed API client.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::error::ApiError;

/// HTTP verb used by the service API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A single request handed to a [`Transport`].
///
/// The body is held in a zeroizing buffer because a settings update may carry the
/// NNTP password; `Debug` never prints it.
pub struct ApiRequest {
    /// Verb.
    pub method: Method,
    /// Path including the base-path prefix and query string.
    pub path: String,
    /// Serialized JSON body, if any.
    pub body: Option<Zeroizing<Vec<u8>>>,
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body_len", &self.body.as_ref().map(|b| b.len()))
            .finish()
    }
}

/// Response as seen by the client layer, before the success check.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Full response body.
    pub body: Vec<u8>,
    /// File name from `Content-Disposition`, when the server supplied one.
    pub filename: Option<String>,
}

impl RawResponse {
    /// `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// What: Moves one request to the service and back.
///
/// Details:
/// - Implementations report only transport failures as `Err`; any HTTP status is returned
///   as a [`RawResponse`] so the status contract lives in one place ([`ApiClient`]).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
pub struct HttpTransport {
    /// Shared connection pool.
    client: reqwest::Client,
    /// Scheme + authority, no trailing slash.
    base_url: String,
}

impl HttpTransport {
    /// What: Build the production transport.
    ///
    /// Inputs:
    /// - `base_url`: Service origin such as `http://nas.local:8080` (scheme optional).
    /// - `connect_timeout` / `timeout`: reqwest client timeouts.
    ///
    /// Output:
    /// - `Ok(HttpTransport)` or `Err(ApiError::Transport)` if the client cannot be built.
    ///
    /// # Errors
    /// - TLS backend initialisation failure inside reqwest.
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(format!("tricera-console/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Normalised origin this transport talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body.to_vec());
        }
        let resp = builder.send().await.map_err(|e| {
            warn!(method = %request.method, path = %request.path, error = %e, "request failed");
            ApiError::from(e)
        })?;
        let status = resp.status().as_u16();
        let filename = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(content_disposition_filename);
        let body = resp.bytes().await?.to_vec();
        debug!(
            method = %request.method,
            path = %request.path,
            status,
            bytes = body.len(),
            "response received"
        );
        Ok(RawResponse {
            status,
            body,
            filename,
        })
    }
}

/// What: Normalise a user-supplied origin.
///
/// Inputs:
/// - `raw`: e.g. `localhost:8080/`, `https://nas.local`.
///
/// Output:
/// - Origin with a scheme (defaults to `http://`) and without trailing slash.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// What: Normalise the API mount prefix.
///
/// Inputs:
/// - `raw`: e.g. `""`, `tricerapost`, `/tricerapost/`.
///
/// Output:
/// - `""` or a prefix with exactly one leading slash and no trailing slash.
#[must_use]
pub fn normalize_base_path(raw: &str) -> String {
    let inner = raw.trim().trim_matches('/');
    if inner.is_empty() {
        String::new()
    } else {
        format!("/{inner}")
    }
}

/// What: Pull the file name out of a `Content-Disposition` header value.
///
/// Inputs:
/// - `value`: e.g. `attachment; filename="Show.S01.nzb"`.
///
/// Output:
/// - `Some(name)` when a non-empty `filename` parameter is present.
#[must_use]
pub fn content_disposition_filename(value: &str) -> Option<String> {
    value.split(';').find_map(|part| {
        let (k, v) = part.trim().split_once('=')?;
        if !k.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = v.trim().trim_matches('"').trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// What: Client for the indexing service's JSON API.
///
/// Details:
/// - Joins the configured base path with endpoint paths.
/// - Single point where non-2xx responses become [`ApiError::Status`].
/// - Cheap to clone; workers take their own copy.
#[derive(Clone)]
pub struct ApiClient {
    /// Underlying transport.
    transport: Arc<dyn Transport>,
    /// Mount prefix, `""` or `/prefix`.
    base_path: String,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client over `transport`, mounting every endpoint under `base_path`.
    pub fn new(transport: Arc<dyn Transport>, base_path: &str) -> Self {
        Self {
            transport,
            base_path: normalize_base_path(base_path),
        }
    }

    /// Mount prefix in use.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Full request path for an endpoint path such as `/api/settings`.
    #[must_use]
    pub fn path(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_path)
    }

    /// What: Issue a request and apply the success contract.
    ///
    /// Inputs:
    /// - `method`, `endpoint`: Verb and endpoint path (query string allowed).
    /// - `body`: Optional value serialized as JSON.
    ///
    /// Output:
    /// - The raw 2xx response.
    ///
    /// # Errors
    /// - `ApiError::Transport` when the request never completed.
    /// - `ApiError::Status` for non-2xx responses (message = body text).
    /// - `ApiError::Decode` if `body` cannot be serialized.
    pub async fn request<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<RawResponse, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let body = match body {
            Some(b) => Some(Zeroizing::new(serde_json::to_vec(b)?)),
            None => None,
        };
        let request = ApiRequest {
            method,
            path: self.path(endpoint),
            body,
        };
        debug!(?request, "dispatching request");
        let resp = self.transport.send(request).await?;
        if resp.is_success() {
            Ok(resp)
        } else {
            let err = ApiError::from_status(resp.status, &resp.body);
            warn!(method = %method, endpoint, status = resp.status, error = %err, "request rejected");
            Err(err)
        }
    }

    /// `GET` an endpoint and decode its JSON body.
    ///
    /// # Errors
    /// - Any [`ApiError`] from [`Self::request`], or `Decode` for a malformed body.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let resp = self.request::<()>(Method::Get, endpoint, None).await?;
        Ok(serde_json::from_slice(&resp.body)?)
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    /// - Any [`ApiError`] from [`Self::request`], or `Decode` for a malformed body.
    pub async fn post_json<B, T>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let resp = self.request(Method::Post, endpoint, body).await?;
        Ok(serde_json::from_slice(&resp.body)?)
    }

    /// `POST` where only success/failure matters; the response body is ignored.
    ///
    /// # Errors
    /// - Any [`ApiError`] from [`Self::request`].
    pub async fn post_ignore<B>(&self, endpoint: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::Post, endpoint, body).await.map(|_| ())
    }
}
