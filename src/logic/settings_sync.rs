//! Settings synchronisation: load into a form, submit a partial update, reload.
//!
//! The controller never trusts its own view of what was saved. Every successful submit is
//! followed by a fresh load, and the password status label only ever comes from the server's
//! `NNTP_PASS_SET` flag.

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::sources::{ApiClient, ApiError};
use crate::state::types::{
    LoadTickets, SecretEditIntent, SettingsRecord, SettingsUpdate, StatusLine,
};

/// Label when the server reports a stored password.
pub const PASSWORD_STORED: &str = "Password stored";
/// Label when the server reports no stored password.
pub const NO_PASSWORD_STORED: &str = "No password stored";

/// Server-reported password presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordStatus {
    /// Settings not loaded yet.
    #[default]
    Unknown,
    /// `NNTP_PASS_SET` was true.
    Stored,
    /// `NNTP_PASS_SET` was false.
    NotStored,
}

impl PasswordStatus {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Stored => PASSWORD_STORED,
            Self::NotStored => NO_PASSWORD_STORED,
        }
    }
}

/// Editable, non-secret settings as the operator sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    /// NNTP host.
    pub host: String,
    /// NNTP port, free text.
    pub port: String,
    /// TLS toggle.
    pub ssl: bool,
    /// NNTP username.
    pub user: String,
    /// Lookback, free text.
    pub lookback: String,
    /// Group override.
    pub groups: String,
    /// Scheduler interval, free text.
    pub scheduler_interval: String,
    /// Save NZBs to disk.
    pub save_nzbs: bool,
    /// NZB output directory.
    pub nzb_dir: String,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: String::new(),
            ssl: false,
            user: String::new(),
            lookback: String::new(),
            groups: String::new(),
            scheduler_interval: String::new(),
            save_nzbs: true,
            nzb_dir: String::new(),
        }
    }
}

impl SettingsForm {
    /// What: Populate every field from a server record.
    ///
    /// Details:
    /// - Missing values render as empty text.
    /// - `save_nzbs` stays checked unless the server explicitly says `false`.
    #[must_use]
    pub fn from_record(rec: &SettingsRecord) -> Self {
        Self {
            host: rec.host.clone().unwrap_or_default(),
            port: rec.port.clone().unwrap_or_default(),
            ssl: rec.ssl,
            user: rec.user.clone().unwrap_or_default(),
            lookback: rec.lookback.clone().unwrap_or_default(),
            groups: rec.groups.clone().unwrap_or_default(),
            scheduler_interval: rec.scheduler_interval.clone().unwrap_or_default(),
            save_nzbs: rec.save_nzbs != Some(false),
            nzb_dir: rec.nzb_dir.clone().unwrap_or_default(),
        }
    }

    /// What: Build the update payload.
    ///
    /// Details:
    /// - Free-text fields are trimmed; numeric fields go out exactly as typed.
    #[must_use]
    pub fn to_update(&self, secret: SecretEditIntent) -> SettingsUpdate {
        SettingsUpdate {
            host: self.host.trim().to_string(),
            port: self.port.clone(),
            ssl: self.ssl,
            user: self.user.trim().to_string(),
            lookback: self.lookback.clone(),
            groups: self.groups.trim().to_string(),
            scheduler_interval: self.scheduler_interval.clone(),
            save_nzbs: self.save_nzbs,
            nzb_dir: self.nzb_dir.trim().to_string(),
            secret,
        }
    }
}

/// Fields a host can put a cursor on, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    /// NNTP host.
    Host,
    /// NNTP port.
    Port,
    /// TLS toggle.
    Ssl,
    /// NNTP username.
    User,
    /// New password input.
    Password,
    /// Clear stored password checkbox.
    ClearPassword,
    /// Lookback.
    Lookback,
    /// Group override.
    Groups,
    /// Scheduler interval.
    SchedulerInterval,
    /// Save NZBs toggle.
    SaveNzbs,
    /// NZB output directory.
    NzbDir,
}

impl SettingsField {
    /// Every field in display order.
    pub const ALL: [Self; 11] = [
        Self::Host,
        Self::Port,
        Self::Ssl,
        Self::User,
        Self::Password,
        Self::ClearPassword,
        Self::Lookback,
        Self::Groups,
        Self::SchedulerInterval,
        Self::SaveNzbs,
        Self::NzbDir,
    ];

    /// Field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Host => "NNTP host",
            Self::Port => "NNTP port",
            Self::Ssl => "Use SSL",
            Self::User => "NNTP username",
            Self::Password => "NNTP password",
            Self::ClearPassword => "Clear stored password",
            Self::Lookback => "NNTP lookback",
            Self::Groups => "Groups override",
            Self::SchedulerInterval => "Scheduler interval",
            Self::SaveNzbs => "Save NZBs to disk",
            Self::NzbDir => "NZB output directory",
        }
    }

    /// `true` for checkbox fields.
    #[must_use]
    pub const fn is_toggle(self) -> bool {
        matches!(self, Self::Ssl | Self::ClearPassword | Self::SaveNzbs)
    }
}

/// What: Owns the settings form, the transient secret input and the sync status.
///
/// Details:
/// - Split into `begin_*` / `apply_*` / `finish_*` steps so an event loop can own the state
///   while a worker performs the request; [`Self::load`] and [`Self::submit`] chain the steps
///   for hosts that simply await.
/// - The secret input lives in a zeroizing buffer and is wiped as soon as a submission starts.
#[derive(Debug, Default)]
pub struct SettingsController {
    /// Current form values.
    form: SettingsForm,
    /// New password being typed.
    secret_input: Zeroizing<String>,
    /// Clear-password checkbox.
    clear_secret: bool,
    /// Server-reported password presence.
    password_status: PasswordStatus,
    /// Latest inline status.
    status: Option<StatusLine>,
    /// Load correlation ids.
    loads: LoadTickets,
    /// A submission is in flight.
    submitting: bool,
}

impl SettingsController {
    /// Fresh controller with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form values.
    #[must_use]
    pub const fn form(&self) -> &SettingsForm {
        &self.form
    }

    /// Mutable form values for host adapters.
    pub const fn form_mut(&mut self) -> &mut SettingsForm {
        &mut self.form
    }

    /// Number of characters typed into the secret input (for masked rendering).
    #[must_use]
    pub fn secret_len(&self) -> usize {
        self.secret_input.chars().count()
    }

    /// `true` when nothing is typed into the secret input.
    #[must_use]
    pub fn secret_is_empty(&self) -> bool {
        self.secret_input.is_empty()
    }

    /// Replace the secret input (CLI prompt).
    pub fn set_secret_input(&mut self, value: &str) {
        self.secret_input = Zeroizing::new(value.to_string());
    }

    /// Append one character to the secret input.
    pub fn push_secret_char(&mut self, c: char) {
        self.secret_input.push(c);
    }

    /// Remove the last character from the secret input.
    pub fn pop_secret_char(&mut self) {
        self.secret_input.pop();
    }

    /// Clear-password checkbox state.
    #[must_use]
    pub const fn clear_secret(&self) -> bool {
        self.clear_secret
    }

    /// Set the clear-password checkbox.
    pub const fn set_clear_secret(&mut self, clear: bool) {
        self.clear_secret = clear;
    }

    /// Server-reported password presence.
    #[must_use]
    pub const fn password_status(&self) -> PasswordStatus {
        self.password_status
    }

    /// Latest inline status.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// `true` while a submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Secret intent for the current input and checkbox.
    #[must_use]
    pub fn secret_intent(&self) -> SecretEditIntent {
        SecretEditIntent::resolve(&self.secret_input, self.clear_secret)
    }

    /// Start a load and return its ticket.
    pub const fn begin_load(&mut self) -> u64 {
        self.loads.issue()
    }

    /// What: Apply the outcome of the load identified by `ticket`.
    ///
    /// Inputs:
    /// - `ticket`: Value returned by [`Self::begin_load`].
    /// - `result`: Server record or failure.
    ///
    /// Output:
    /// - `true` when applied; `false` when a newer load superseded it.
    ///
    /// Details:
    /// - Success repopulates every field and the password label, and resets the secret input
    ///   and clear flag. An earlier error status is dropped; a neutral one (`Settings saved.`)
    ///   is kept.
    /// - Failure only sets the status; form values stay as they were.
    pub fn apply_load(&mut self, ticket: u64, result: Result<SettingsRecord, ApiError>) -> bool {
        if !self.loads.is_latest(ticket) {
            debug!(ticket, "discarding stale settings load");
            return false;
        }
        match result {
            Ok(rec) => {
                self.form = SettingsForm::from_record(&rec);
                self.password_status = if rec.password_set {
                    PasswordStatus::Stored
                } else {
                    PasswordStatus::NotStored
                };
                self.secret_input = Zeroizing::new(String::new());
                self.clear_secret = false;
                if self.status.as_ref().is_some_and(StatusLine::is_error) {
                    self.status = None;
                }
                info!(password_set = rec.password_set, "settings loaded");
            }
            Err(e) => {
                warn!(error = %e, "failed to load settings");
                self.status = Some(StatusLine::error(format!("Failed to load settings: {e}")));
            }
        }
        true
    }

    /// What: Start a submission.
    ///
    /// Output:
    /// - `Some(payload)` to send, or `None` when another submission is still in flight.
    ///
    /// Details:
    /// - The payload takes the only copy of the new secret; the input buffer and the clear flag
    ///   are wiped here, whatever the outcome turns out to be.
    pub fn begin_submit(&mut self) -> Option<SettingsUpdate> {
        if self.submitting {
            debug!("settings submit ignored: already in flight");
            self.status = Some(StatusLine::neutral("Submission already in progress."));
            return None;
        }
        let update = self.form.to_update(self.secret_intent());
        self.secret_input = Zeroizing::new(String::new());
        self.clear_secret = false;
        self.submitting = true;
        self.status = Some(StatusLine::neutral("Saving..."));
        debug!(secret = ?update.secret, "settings submit started");
        Some(update)
    }

    /// What: Record the outcome of the in-flight submission.
    ///
    /// Output:
    /// - `true` when the caller must reload settings (success).
    ///
    /// Details:
    /// - Failure keeps the unsaved form values so the operator can retry.
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> bool {
        self.submitting = false;
        match result {
            Ok(()) => {
                info!("settings saved");
                self.status = Some(StatusLine::neutral("Settings saved."));
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to save settings");
                self.status = Some(StatusLine::error(format!("Save failed: {e}")));
                false
            }
        }
    }

    /// Fetch settings and apply them.
    pub async fn load(&mut self, api: &ApiClient) {
        let ticket = self.begin_load();
        let result = api.settings().await;
        self.apply_load(ticket, result);
    }

    /// What: Submit the form, then reload on success.
    ///
    /// Output:
    /// - `true` when the server accepted the update.
    pub async fn submit(&mut self, api: &ApiClient) -> bool {
        let Some(update) = self.begin_submit() else {
            return false;
        };
        let result = api.save_settings(&update).await;
        drop(update);
        let saved = self.finish_submit(result);
        if saved {
            self.load(api).await;
        }
        saved
    }
}
