//! Event handling layer for the console TUI.
//!
//! `handle_event` routes keys to the open modal first, then to global shortcuts, then to the
//! active tab. Network work is only ever requested through `logic::dispatch`.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic::Request;
use crate::state::{AppState, Modal, Tab};

mod form;
mod lists;

/// Dispatch a single terminal event and mutate the [`AppState`].
///
/// Returns `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(
    ev: &CEvent,
    app: &mut AppState,
    req_tx: &mpsc::UnboundedSender<Request>,
) -> bool {
    let CEvent::Key(ke) = ev else {
        return false;
    };
    if ke.kind != KeyEventKind::Press {
        return false;
    }

    match app.modal {
        Modal::Confirm(_) => {
            match ke.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                    crate::logic::dispatch::answer_admin(app, true, req_tx);
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    crate::logic::dispatch::answer_admin(app, false, req_tx);
                }
                _ => {}
            }
            return false;
        }
        Modal::Alert { .. } | Modal::Help => {
            if matches!(ke.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | '?')) {
                app.modal = Modal::None;
            }
            return false;
        }
        Modal::None => {}
    }

    if let Some(quit) = handle_global(ke, app, req_tx) {
        return quit;
    }

    match app.tab {
        Tab::Settings => form::handle_settings_key(ke, app, req_tx),
        Tab::Status => lists::handle_status_key(ke, app, req_tx),
        Tab::Releases => lists::handle_releases_key(ke, app, req_tx),
        Tab::Nzbs => lists::handle_nzbs_key(ke, app, req_tx),
    }
    false
}

/// What: Shortcuts that work on every tab.
///
/// Output:
/// - `Some(quit)` when the key was consumed, `None` to pass it to the tab.
///
/// Details:
/// - Plain letters are left to the settings form so they can be typed into fields.
fn handle_global(
    ke: &KeyEvent,
    app: &mut AppState,
    req_tx: &mpsc::UnboundedSender<Request>,
) -> Option<bool> {
    let ctrl = ke.modifiers.contains(KeyModifiers::CONTROL);
    match ke.code {
        KeyCode::Char('c' | 'q') if ctrl => Some(true),
        KeyCode::Char('q') if app.tab != Tab::Settings => Some(true),
        KeyCode::Tab => {
            app.tab = app.tab.next();
            Some(false)
        }
        KeyCode::BackTab => {
            app.tab = app.tab.prev();
            Some(false)
        }
        KeyCode::F(1) => {
            app.modal = Modal::Help;
            Some(false)
        }
        KeyCode::Char('?') if app.tab != Tab::Settings => {
            app.modal = Modal::Help;
            Some(false)
        }
        KeyCode::F(5) => {
            refresh_current(app, req_tx);
            Some(false)
        }
        KeyCode::Char('r') if ctrl => {
            refresh_current(app, req_tx);
            Some(false)
        }
        _ => None,
    }
}

/// Reload whatever the active tab shows.
pub(crate) fn refresh_current(app: &mut AppState, req_tx: &mpsc::UnboundedSender<Request>) {
    use crate::logic::dispatch::{
        request_nzbs, request_releases, request_settings_load, request_status,
    };
    match app.tab {
        Tab::Status => request_status(app, req_tx),
        Tab::Settings => request_settings_load(app, req_tx),
        Tab::Releases => request_releases(app, req_tx),
        Tab::Nzbs => request_nzbs(app, req_tx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::logic::AdminAction;

    fn key(code: KeyCode) -> CEvent {
        CEvent::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    /// What: `x` opens the clear-database confirmation and `n` closes it without a request.
    ///
    /// Inputs:
    /// - Status tab, keys `x`, `n`, then `a`, `y`.
    ///
    /// Output:
    /// - No request after `n`; `Admin(SaveAllNzbs)` after `y`.
    fn confirm_dialog_gates_admin_actions() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        assert!(!handle_event(&key(KeyCode::Char('x')), &mut app, &tx));
        assert_eq!(app.modal, Modal::Confirm(AdminAction::ClearDatabase));
        handle_event(&key(KeyCode::Char('n')), &mut app, &tx);
        assert!(app.modal.is_none());
        assert!(rx.try_recv().is_err());

        handle_event(&key(KeyCode::Char('a')), &mut app, &tx);
        handle_event(&key(KeyCode::Char('y')), &mut app, &tx);
        assert!(matches!(
            rx.try_recv(),
            Ok(Request::Admin(AdminAction::SaveAllNzbs))
        ));
    }

    #[test]
    fn q_quits_outside_settings_only() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        app.tab = Tab::Settings;
        assert!(!handle_event(&key(KeyCode::Char('q')), &mut app, &tx));
        assert_eq!(app.settings.form().host, "q");
        let ctrl_q = CEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(handle_event(&ctrl_q, &mut app, &tx));
        app.tab = Tab::Releases;
        assert!(handle_event(&key(KeyCode::Char('q')), &mut app, &tx));
    }

    #[test]
    fn tab_cycles_and_f5_refreshes_active_tab() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(&ConsoleConfig::default());
        handle_event(&key(KeyCode::Tab), &mut app, &tx);
        handle_event(&key(KeyCode::Tab), &mut app, &tx);
        assert_eq!(app.tab, Tab::Releases);
        handle_event(&key(KeyCode::F(5)), &mut app, &tx);
        assert!(matches!(rx.try_recv(), Ok(Request::LoadReleases { .. })));
    }
}
