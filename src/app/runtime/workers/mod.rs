/// API request worker.
pub mod api;
