//! Requests the event loop hands to workers, and the outcomes they send back.
//!
//! The `request_*` helpers take the correlation step on `AppState` first (ticket, in-flight
//! flag, confirmation) and only then enqueue the network work.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::logic::admin::{AdminAction, AdminOutcome};
use crate::sources::ApiError;
use crate::state::types::{
    GeneratedFile, Release, ScanStatus, SettingsRecord, SettingsUpdate, StatusLine,
};
use crate::state::{AppState, Modal};

/// Network work for a worker task.
#[derive(Debug)]
pub enum Request {
    /// `GET /api/settings`.
    LoadSettings {
        /// Load correlation id.
        ticket: u64,
    },
    /// `POST /api/settings`.
    SubmitSettings(SettingsUpdate),
    /// `GET /api/status`.
    LoadStatus {
        /// Load correlation id.
        ticket: u64,
    },
    /// `GET /api/releases`.
    LoadReleases {
        /// Load correlation id.
        ticket: u64,
    },
    /// `GET /api/nzbs`.
    LoadNzbs {
        /// Load correlation id.
        ticket: u64,
    },
    /// Confirmed administrative action.
    Admin(AdminAction),
    /// `GET /api/nzb/file` saved into `dir`.
    Download {
        /// Download key.
        key: String,
        /// Target directory.
        dir: PathBuf,
    },
}

/// Result of a [`Request`], applied by the event loop.
#[derive(Debug)]
pub enum Outcome {
    /// Settings load finished.
    Settings {
        /// Correlation id from the request.
        ticket: u64,
        /// Record or failure.
        result: Result<SettingsRecord, ApiError>,
    },
    /// Settings submission finished.
    SettingsSaved(Result<(), ApiError>),
    /// Scan counters load finished.
    Status {
        /// Correlation id from the request.
        ticket: u64,
        /// Counters or failure.
        result: Result<ScanStatus, ApiError>,
    },
    /// Release list load finished.
    Releases {
        /// Correlation id from the request.
        ticket: u64,
        /// List or failure.
        result: Result<Vec<Release>, ApiError>,
    },
    /// NZB list load finished.
    Nzbs {
        /// Correlation id from the request.
        ticket: u64,
        /// List or failure.
        result: Result<Vec<GeneratedFile>, ApiError>,
    },
    /// Administrative action finished.
    Admin {
        /// Which action.
        action: AdminAction,
        /// Outcome or failure.
        result: Result<AdminOutcome, ApiError>,
    },
    /// Download finished.
    Downloaded(StatusLine),
}

/// Reload settings.
pub fn request_settings_load(app: &mut AppState, tx: &mpsc::UnboundedSender<Request>) {
    let ticket = app.settings.begin_load();
    let _ = tx.send(Request::LoadSettings { ticket });
}

/// Failure recorded when the worker channel is gone.
fn worker_gone() -> ApiError {
    ApiError::Transport("request worker unavailable".into())
}

/// What: Submit the settings form (refused while a submission is in flight).
///
/// Details:
/// - A closed worker channel finishes the submission as failed so the guard is released.
pub fn request_settings_submit(app: &mut AppState, tx: &mpsc::UnboundedSender<Request>) {
    if let Some(update) = app.settings.begin_submit()
        && tx.send(Request::SubmitSettings(update)).is_err()
    {
        warn!("settings submit not queued: worker channel closed");
        app.settings.finish_submit(Err(worker_gone()));
    }
}

/// Refresh scan counters.
pub fn request_status(app: &mut AppState, tx: &mpsc::UnboundedSender<Request>) {
    let ticket = app.scan.begin_load();
    let _ = tx.send(Request::LoadStatus { ticket });
}

/// Reload releases.
pub fn request_releases(app: &mut AppState, tx: &mpsc::UnboundedSender<Request>) {
    let ticket = app.releases.begin_load();
    let _ = tx.send(Request::LoadReleases { ticket });
}

/// Reload NZBs.
pub fn request_nzbs(app: &mut AppState, tx: &mpsc::UnboundedSender<Request>) {
    let ticket = app.nzbs.begin_load();
    let _ = tx.send(Request::LoadNzbs { ticket });
}

/// Initial load of every view.
pub fn request_everything(app: &mut AppState, tx: &mpsc::UnboundedSender<Request>) {
    request_settings_load(app, tx);
    request_status(app, tx);
    request_releases(app, tx);
    request_nzbs(app, tx);
}

/// What: Ask for confirmation of `action` by opening the confirm dialog.
pub fn ask_admin(app: &mut AppState, action: AdminAction) {
    if app.admin.request(action) {
        app.modal = Modal::Confirm(action);
    }
}

/// What: Resolve the open confirm dialog and start the action when accepted.
///
/// Details:
/// - An accepted action replaces any download line so its own status is the one shown.
/// - A closed worker channel finishes the action as failed so another can run later.
pub fn answer_admin(app: &mut AppState, accepted: bool, tx: &mpsc::UnboundedSender<Request>) {
    app.modal = Modal::None;
    let Some(action) = app.admin.confirm(accepted) else {
        return;
    };
    app.download_status = None;
    if tx.send(Request::Admin(action)).is_err() {
        warn!(?action, "admin action not queued: worker channel closed");
        app.admin.finish(action, Err(worker_gone()));
    }
}

/// What: Download the selected NZB.
///
/// Details:
/// - Items without a key report a failure instead of sending a request.
pub fn request_download(app: &mut AppState, tx: &mpsc::UnboundedSender<Request>) {
    let Some(item) = app.selected_nzb() else {
        return;
    };
    let Some(key) = item.key.clone() else {
        app.download_status = Some(StatusLine::error(
            "Download failed: this NZB has no download key",
        ));
        return;
    };
    debug!(key = %key, "download requested");
    app.download_status = Some(StatusLine::neutral("Downloading..."));
    let _ = tx.send(Request::Download {
        key,
        dir: app.download_dir.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;

    #[test]
    /// What: Confirm flow only enqueues on acceptance.
    ///
    /// Inputs:
    /// - Clear-database asked then declined; save-all asked then accepted.
    ///
    /// Output:
    /// - One request (`Admin(SaveAllNzbs)`); modal closed after each answer.
    fn admin_requests_need_acceptance() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        ask_admin(&mut app, AdminAction::ClearDatabase);
        assert_eq!(app.modal, Modal::Confirm(AdminAction::ClearDatabase));
        answer_admin(&mut app, false, &tx);
        assert!(app.modal.is_none());
        assert!(rx.try_recv().is_err());

        ask_admin(&mut app, AdminAction::SaveAllNzbs);
        answer_admin(&mut app, true, &tx);
        assert!(matches!(
            rx.try_recv(),
            Ok(Request::Admin(AdminAction::SaveAllNzbs))
        ));
    }

    #[test]
    fn submit_guard_sends_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        request_settings_submit(&mut app, &tx);
        request_settings_submit(&mut app, &tx);
        assert!(matches!(rx.try_recv(), Ok(Request::SubmitSettings(_))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    /// What: A closed worker channel releases the submit and admin guards.
    ///
    /// Inputs:
    /// - Receiver dropped before a settings submit and an accepted save-all.
    ///
    /// Output:
    /// - Neither guard stays set; both report the failure and a retry is accepted.
    fn closed_channel_releases_in_flight_guards() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut app = AppState::new(&ConsoleConfig::default());
        request_settings_submit(&mut app, &tx);
        assert!(!app.settings.is_submitting());
        assert!(app.settings.status().expect("status").is_error());

        ask_admin(&mut app, AdminAction::SaveAllNzbs);
        answer_admin(&mut app, true, &tx);
        assert!(app.admin.in_flight().is_none());
        assert!(app.admin.status().expect("status").is_error());
        ask_admin(&mut app, AdminAction::ClearDatabase);
        assert_eq!(app.modal, Modal::Confirm(AdminAction::ClearDatabase));
    }

    #[test]
    fn accepted_admin_action_replaces_download_line() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        app.download_status = Some(StatusLine::neutral("Saved /tmp/old.nzb"));
        ask_admin(&mut app, AdminAction::SaveAllNzbs);
        answer_admin(&mut app, false, &tx);
        assert!(app.download_status.is_some());
        ask_admin(&mut app, AdminAction::SaveAllNzbs);
        answer_admin(&mut app, true, &tx);
        assert!(app.download_status.is_none());
    }

    #[test]
    fn everything_issues_four_loads() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        request_everything(&mut app, &tx);
        let mut n = 0;
        while rx.try_recv().is_ok() {
            n += 1;
        }
        assert_eq!(n, 4);
    }
}
