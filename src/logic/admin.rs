//! Confirmed administrative actions: bulk NZB export and database reset.

use tracing::{debug, info, warn};

use crate::sources::{ApiClient, ApiError};
use crate::state::types::StatusLine;

/// One-shot administrative operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// `POST /api/nzb/save_all`.
    SaveAllNzbs,
    /// `POST /api/admin/clear_db`.
    ClearDatabase,
}

impl AdminAction {
    /// Confirmation dialog title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SaveAllNzbs => "Save all NZBs",
            Self::ClearDatabase => "Clear database",
        }
    }

    /// Confirmation question.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::SaveAllNzbs => "Write every pending NZB to the output directory?",
            Self::ClearDatabase => {
                "Clear all stored data (releases, NZBs, scan state)? This cannot be undone."
            }
        }
    }

    const fn progress(self) -> &'static str {
        match self {
            Self::SaveAllNzbs => "Saving...",
            Self::ClearDatabase => "Clearing database...",
        }
    }

    const fn failure_prefix(self) -> &'static str {
        match self {
            Self::SaveAllNzbs => "Save failed",
            Self::ClearDatabase => "Clear failed",
        }
    }
}

/// Successful result of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    /// Number of NZBs written.
    Saved(u64),
    /// Database reset.
    Cleared,
}

/// What to reload after an action succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowUps {
    /// Reload the release collection.
    pub releases: bool,
    /// Reload the NZB collection.
    pub nzbs: bool,
    /// Refresh scan counters.
    pub status: bool,
}

/// What: Two-phase confirm-then-run state for administrative actions.
///
/// Details:
/// - [`Self::request`] only records a pending confirmation; nothing is sent until
///   [`Self::confirm`] accepts it.
/// - At most one action is in flight; further requests are refused until it finishes.
/// - No retry and no rollback: the server's reply is reported as-is.
#[derive(Debug, Default)]
pub struct AdminHandler {
    /// Awaiting operator confirmation.
    pending: Option<AdminAction>,
    /// Sent and not yet finished.
    in_flight: Option<AdminAction>,
    /// Latest status.
    status: Option<StatusLine>,
}

impl AdminHandler {
    /// Idle handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Action awaiting confirmation.
    #[must_use]
    pub const fn pending(&self) -> Option<AdminAction> {
        self.pending
    }

    /// Action currently running.
    #[must_use]
    pub const fn in_flight(&self) -> Option<AdminAction> {
        self.in_flight
    }

    /// Latest status.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// What: Ask for confirmation of `action`.
    ///
    /// Output:
    /// - `true` when a confirmation is now pending; `false` while another action runs.
    pub fn request(&mut self, action: AdminAction) -> bool {
        if let Some(running) = self.in_flight {
            debug!(?action, ?running, "admin request refused: action in flight");
            self.status = Some(StatusLine::neutral(format!(
                "{} already in progress.",
                running.title()
            )));
            return false;
        }
        self.pending = Some(action);
        true
    }

    /// What: Resolve the pending confirmation.
    ///
    /// Inputs:
    /// - `accepted`: Operator answered yes.
    ///
    /// Output:
    /// - The action to run now, or `None` when declined or nothing was pending.
    pub fn confirm(&mut self, accepted: bool) -> Option<AdminAction> {
        let action = self.pending.take()?;
        if !accepted || self.in_flight.is_some() {
            debug!(?action, "admin action declined");
            return None;
        }
        self.in_flight = Some(action);
        self.status = Some(StatusLine::neutral(action.progress()));
        info!(?action, "admin action confirmed");
        Some(action)
    }

    /// What: Record the result of the in-flight action.
    ///
    /// Output:
    /// - Collections to reload; all `false` on failure.
    pub fn finish(
        &mut self,
        action: AdminAction,
        result: Result<AdminOutcome, ApiError>,
    ) -> FollowUps {
        self.in_flight = None;
        match result {
            Ok(AdminOutcome::Saved(n)) => {
                self.status = Some(StatusLine::neutral(format!("Saved {n} NZBs.")));
                FollowUps {
                    releases: false,
                    nzbs: true,
                    status: true,
                }
            }
            Ok(AdminOutcome::Cleared) => {
                self.status = Some(StatusLine::neutral("Database cleared."));
                FollowUps {
                    releases: true,
                    nzbs: true,
                    status: true,
                }
            }
            Err(e) => {
                warn!(?action, error = %e, "admin action failed");
                self.status = Some(StatusLine::error(format!(
                    "{}: {e}",
                    action.failure_prefix()
                )));
                FollowUps::default()
            }
        }
    }

    /// Send `action` to the server.
    ///
    /// # Errors
    /// - Any [`ApiError`] from the endpoint.
    pub async fn execute(api: &ApiClient, action: AdminAction) -> Result<AdminOutcome, ApiError> {
        match action {
            AdminAction::SaveAllNzbs => api.save_all_nzbs().await.map(AdminOutcome::Saved),
            AdminAction::ClearDatabase => api.clear_database().await.map(|()| AdminOutcome::Cleared),
        }
    }

    /// What: Confirm, run and finish in one call.
    ///
    /// Output:
    /// - Follow-ups to perform; all `false` when declined or failed.
    pub async fn run_confirmed(&mut self, api: &ApiClient, accepted: bool) -> FollowUps {
        let Some(action) = self.confirm(accepted) else {
            return FollowUps::default();
        };
        let result = Self::execute(api, action).await;
        self.finish(action, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::api::{CLEAR_DB_PATH, SAVE_ALL_PATH};
    use crate::test_utils::scripted_client;
    use serde_json::json;

    #[tokio::test]
    /// What: Declining a confirmation never sends a request.
    ///
    /// Inputs:
    /// - Clear-database requested, then declined.
    ///
    /// Output:
    /// - No recorded requests, nothing pending, no status.
    async fn declined_action_sends_nothing() {
        let (transport, api) = scripted_client();
        let mut admin = AdminHandler::new();
        assert!(admin.request(AdminAction::ClearDatabase));
        assert_eq!(admin.pending(), Some(AdminAction::ClearDatabase));
        let follow = admin.run_confirmed(&api, false).await;
        assert_eq!(follow, FollowUps::default());
        assert!(transport.requests().is_empty());
        assert!(admin.pending().is_none());
        assert!(admin.status().is_none());
    }

    #[tokio::test]
    /// What: Accepted save-all reports the count and asks for an NZB reload.
    ///
    /// Inputs:
    /// - Save-all confirmed; server replies `{saved: 7}`.
    ///
    /// Output:
    /// - Status `Saved 7 NZBs.`; follow-ups reload NZBs and status only.
    async fn save_all_reports_count_and_reloads_nzbs() {
        let (transport, api) = scripted_client();
        transport.push_json(200, &json!({"ok": true, "saved": 7}));
        let mut admin = AdminHandler::new();
        admin.request(AdminAction::SaveAllNzbs);
        let follow = admin.run_confirmed(&api, true).await;
        assert_eq!(admin.status().expect("status").text, "Saved 7 NZBs.");
        assert!(follow.nzbs && follow.status && !follow.releases);
        assert_eq!(transport.requests()[0].path, SAVE_ALL_PATH);
    }

    #[tokio::test]
    async fn clear_database_reloads_everything() {
        let (transport, api) = scripted_client();
        transport.push_json(200, &json!({"ok": true}));
        let mut admin = AdminHandler::new();
        admin.request(AdminAction::ClearDatabase);
        let follow = admin.run_confirmed(&api, true).await;
        assert_eq!(admin.status().expect("status").text, "Database cleared.");
        assert!(follow.releases && follow.nzbs && follow.status);
        let sent = transport.requests();
        assert_eq!(sent[0].path, CLEAR_DB_PATH);
        assert_eq!(sent[0].json(), Some(json!({"confirm": true})));
    }

    #[tokio::test]
    async fn failure_reports_body_without_follow_ups() {
        let (transport, api) = scripted_client();
        transport.push_text(400, "Confirmation required");
        let mut admin = AdminHandler::new();
        admin.request(AdminAction::ClearDatabase);
        let follow = admin.run_confirmed(&api, true).await;
        assert_eq!(follow, FollowUps::default());
        let status = admin.status().expect("status");
        assert_eq!(status.text, "Clear failed: Confirmation required");
        assert!(status.is_error());
        assert!(admin.in_flight().is_none());
    }

    #[test]
    fn second_request_refused_while_in_flight() {
        let mut admin = AdminHandler::new();
        admin.request(AdminAction::SaveAllNzbs);
        assert_eq!(admin.confirm(true), Some(AdminAction::SaveAllNzbs));
        assert_eq!(admin.status().expect("status").text, "Saving...");
        assert!(!admin.request(AdminAction::ClearDatabase));
        assert!(admin.pending().is_none());
        admin.finish(AdminAction::SaveAllNzbs, Ok(AdminOutcome::Saved(0)));
        assert!(admin.request(AdminAction::ClearDatabase));
        assert_eq!(admin.confirm(true), Some(AdminAction::ClearDatabase));
        assert_eq!(
            admin.status().expect("status").text,
            "Clearing database..."
        );
    }
}
