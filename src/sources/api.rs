//! Typed endpoints of the indexing service.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::client::{ApiClient, HttpTransport, Method};
use super::error::ApiError;
use crate::config::ConsoleConfig;
use crate::state::types::{
    ClearDatabaseRequest, NzbFile, SaveAllReply, ScanStatus, SettingsRecord, SettingsUpdate,
};
use crate::util::percent_encode;

/// `GET`/`POST` settings.
pub const SETTINGS_PATH: &str = "/api/settings";
/// Scan counters.
pub const STATUS_PATH: &str = "/api/status";
/// Candidate releases.
pub const RELEASES_PATH: &str = "/api/releases";
/// Generated NZBs.
pub const NZBS_PATH: &str = "/api/nzbs";
/// NZB download by key.
pub const NZB_FILE_PATH: &str = "/api/nzb/file";
/// Bulk NZB export.
pub const SAVE_ALL_PATH: &str = "/api/nzb/save_all";
/// Full data reset.
pub const CLEAR_DB_PATH: &str = "/api/admin/clear_db";

impl ApiClient {
    /// What: Build a client over the production HTTP transport.
    ///
    /// Inputs:
    /// - `cfg`: Resolved console configuration (origin, prefix, timeouts).
    ///
    /// # Errors
    /// - [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn from_config(cfg: &ConsoleConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(
            &cfg.base_url,
            cfg.connect_timeout(),
            cfg.request_timeout(),
        )?;
        debug!(
            base_url = transport.base_url(),
            base_path = %cfg.base_path,
            "api client ready"
        );
        Ok(Self::new(Arc::new(transport), &cfg.base_path))
    }

    /// Fetch the current settings.
    ///
    /// # Errors
    /// - Any [`ApiError`].
    pub async fn settings(&self) -> Result<SettingsRecord, ApiError> {
        self.get_json(SETTINGS_PATH).await
    }

    /// Send a partial settings update; the response body is ignored.
    ///
    /// # Errors
    /// - Any [`ApiError`].
    pub async fn save_settings(&self, update: &SettingsUpdate) -> Result<(), ApiError> {
        self.post_ignore(SETTINGS_PATH, Some(update)).await
    }

    /// Fetch scan counters.
    ///
    /// # Errors
    /// - Any [`ApiError`].
    pub async fn scan_status(&self) -> Result<ScanStatus, ApiError> {
        self.get_json(STATUS_PATH).await
    }

    /// Fetch a whole collection in one shot (no server-side paging).
    ///
    /// # Errors
    /// - Any [`ApiError`].
    pub async fn collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.get_json(path).await
    }

    /// What: Write every pending NZB to the server's output directory.
    ///
    /// Output:
    /// - Number of NZBs saved (absent in the reply counts as zero).
    ///
    /// # Errors
    /// - Any [`ApiError`].
    pub async fn save_all_nzbs(&self) -> Result<u64, ApiError> {
        let reply: SaveAllReply = self.post_json::<(), _>(SAVE_ALL_PATH, None).await?;
        let saved = reply.saved.unwrap_or(0);
        info!(saved, "save_all completed");
        Ok(saved)
    }

    /// Reset all stored data on the server.
    ///
    /// # Errors
    /// - Any [`ApiError`].
    pub async fn clear_database(&self) -> Result<(), ApiError> {
        self.post_ignore(CLEAR_DB_PATH, Some(&ClearDatabaseRequest { confirm: true }))
            .await?;
        info!("database cleared");
        Ok(())
    }

    /// Endpoint path (without base prefix) for downloading the NZB behind `key`.
    #[must_use]
    pub fn nzb_file_endpoint(key: &str) -> String {
        format!("{NZB_FILE_PATH}?key={}", percent_encode(key))
    }

    /// Download the NZB behind `key`.
    ///
    /// # Errors
    /// - Any [`ApiError`].
    pub async fn download_nzb(&self, key: &str) -> Result<NzbFile, ApiError> {
        let resp = self
            .request::<()>(Method::Get, &Self::nzb_file_endpoint(key), None)
            .await?;
        Ok(NzbFile {
            filename: resp.filename,
            bytes: resp.body,
        })
    }
}
