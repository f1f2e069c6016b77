//! Network access to the indexing service, split into the client seam, its error type,
//! and the typed endpoints.

pub mod api;
pub mod client;
pub mod error;

pub use client::{
    ApiClient, ApiRequest, HttpTransport, Method, RawResponse, Transport, normalize_base_path,
    normalize_base_url,
};
pub use error::ApiError;
