use tokio::sync::mpsc;
use tracing::debug;

use crate::logic::dispatch::{
    request_nzbs, request_releases, request_settings_load, request_status,
};
use crate::logic::{Outcome, Request};
use crate::state::{AppState, Modal};

/// What: Apply a worker outcome to the application state.
///
/// Inputs:
/// - `app`: Application state (single writer).
/// - `outcome`: Result from the API worker.
/// - `req_tx`: Used for follow-up reloads.
///
/// Details:
/// - Successful settings submits trigger an authoritative reload.
/// - Admin actions trigger the reloads their outcome asks for.
/// - A finished admin action replaces the download line so its result is shown.
/// - A failed download also opens an alert unless another dialog is already open.
pub fn handle_outcome(app: &mut AppState, outcome: Outcome, req_tx: &mpsc::UnboundedSender<Request>) {
    match outcome {
        Outcome::Settings { ticket, result } => {
            app.settings.apply_load(ticket, result);
        }
        Outcome::SettingsSaved(result) => {
            if app.settings.finish_submit(result) {
                request_settings_load(app, req_tx);
            }
        }
        Outcome::Status { ticket, result } => {
            app.scan.apply_load(ticket, result);
        }
        Outcome::Releases { ticket, result } => {
            if app.releases.apply_load(ticket, result) {
                app.clamp_selections();
            }
        }
        Outcome::Nzbs { ticket, result } => {
            if app.nzbs.apply_load(ticket, result) {
                app.clamp_selections();
            }
        }
        Outcome::Admin { action, result } => {
            let follow = app.admin.finish(action, result);
            app.download_status = None;
            debug!(?action, ?follow, "admin action finished");
            if follow.releases {
                request_releases(app, req_tx);
            }
            if follow.nzbs {
                request_nzbs(app, req_tx);
            }
            if follow.status {
                request_status(app, req_tx);
            }
        }
        Outcome::Downloaded(status) => {
            if status.is_error() && app.modal.is_none() {
                app.modal = Modal::Alert {
                    message: status.text.clone(),
                };
            }
            app.download_status = Some(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::logic::{AdminAction, AdminOutcome};
    use crate::sources::ApiError;
    use crate::state::types::{GeneratedFile, StatusLine};

    fn drain(rx: &mut mpsc::UnboundedReceiver<Request>) -> Vec<Request> {
        let mut out = Vec::new();
        while let Ok(r) = rx.try_recv() {
            out.push(r);
        }
        out
    }

    #[test]
    /// What: Save-all success reloads NZBs and status; clear-db also reloads releases.
    ///
    /// Inputs:
    /// - Admin outcomes for both actions.
    ///
    /// Output:
    /// - Two, then three follow-up requests with the latest tickets.
    fn admin_outcomes_schedule_reloads() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        handle_outcome(
            &mut app,
            Outcome::Admin {
                action: AdminAction::SaveAllNzbs,
                result: Ok(AdminOutcome::Saved(7)),
            },
            &tx,
        );
        assert_eq!(app.admin.status().expect("status").text, "Saved 7 NZBs.");
        let reqs = drain(&mut rx);
        assert_eq!(reqs.len(), 2);
        assert!(matches!(reqs[0], Request::LoadNzbs { .. }));
        assert!(matches!(reqs[1], Request::LoadStatus { .. }));

        handle_outcome(
            &mut app,
            Outcome::Admin {
                action: AdminAction::ClearDatabase,
                result: Ok(AdminOutcome::Cleared),
            },
            &tx,
        );
        assert_eq!(drain(&mut rx).len(), 3);
    }

    #[test]
    fn failed_submit_does_not_reload() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        let _ = app.settings.begin_submit();
        handle_outcome(
            &mut app,
            Outcome::SettingsSaved(Err(ApiError::Transport("offline".into()))),
            &tx,
        );
        assert!(drain(&mut rx).is_empty());
        assert_eq!(app.settings.status().expect("status").text, "Save failed: offline");

        let _ = app.settings.begin_submit();
        handle_outcome(&mut app, Outcome::SettingsSaved(Ok(())), &tx);
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [Request::LoadSettings { .. }]
        ));
    }

    #[test]
    fn failed_download_opens_alert() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        handle_outcome(
            &mut app,
            Outcome::Downloaded(StatusLine::neutral("Saved /tmp/a.nzb")),
            &tx,
        );
        assert!(app.modal.is_none());
        handle_outcome(
            &mut app,
            Outcome::Downloaded(StatusLine::error("Download failed: HTTP 404")),
            &tx,
        );
        assert_eq!(
            app.modal,
            Modal::Alert {
                message: "Download failed: HTTP 404".into()
            }
        );
    }

    #[test]
    /// What: A failed download never replaces an open confirmation.
    ///
    /// Inputs:
    /// - Clear-database confirm open, then a download failure arrives.
    ///
    /// Output:
    /// - Confirm stays open, the failure is kept as the download line, and accepting still
    ///   sends the action.
    fn failed_download_keeps_open_confirm() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        crate::logic::dispatch::ask_admin(&mut app, AdminAction::ClearDatabase);
        handle_outcome(
            &mut app,
            Outcome::Downloaded(StatusLine::error("Download failed: HTTP 404")),
            &tx,
        );
        assert_eq!(app.modal, Modal::Confirm(AdminAction::ClearDatabase));
        assert!(app.download_status.as_ref().is_some_and(StatusLine::is_error));
        crate::logic::dispatch::answer_admin(&mut app, true, &tx);
        assert!(matches!(
            rx.try_recv(),
            Ok(Request::Admin(AdminAction::ClearDatabase))
        ));
    }

    #[test]
    fn admin_result_replaces_download_line() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        app.download_status = Some(StatusLine::neutral("Saved /tmp/old.nzb"));
        handle_outcome(
            &mut app,
            Outcome::Admin {
                action: AdminAction::SaveAllNzbs,
                result: Ok(AdminOutcome::Saved(7)),
            },
            &tx,
        );
        assert!(app.download_status.is_none());
    }

    #[test]
    fn nzb_reload_clamps_selection() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        app.nzbs_selected = 10;
        let ticket = app.nzbs.begin_load();
        handle_outcome(
            &mut app,
            Outcome::Nzbs {
                ticket,
                result: Ok(vec![GeneratedFile::default(), GeneratedFile::default()]),
            },
            &tx,
        );
        assert_eq!(app.nzbs_selected, 1);
    }
}
