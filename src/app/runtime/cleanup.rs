use std::sync::atomic::Ordering;

use crate::state::AppState;

use super::channels::Channels;

/// What: Clean up on exit.
///
/// Details:
/// - Signals the event reading thread to exit.
/// - Logs any work still in flight; it is abandoned, never awaited.
pub fn cleanup_on_exit(app: &AppState, channels: &Channels) {
    channels.event_thread_cancelled.store(true, Ordering::Relaxed);
    if app.settings.is_submitting() || app.admin.in_flight().is_some() {
        tracing::warn!(
            settings_submit = app.settings.is_submitting(),
            admin = ?app.admin.in_flight(),
            "exiting with a request in flight"
        );
    }
}
