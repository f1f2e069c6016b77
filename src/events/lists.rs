//! Keys for the Status, Releases and NZBs tabs.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::logic::dispatch::{ask_admin, request_download};
use crate::logic::{AdminAction, Request};
use crate::state::AppState;

/// Save-all / clear-database shortcuts shared by the non-form tabs.
fn handle_admin_key(ke: &KeyEvent, app: &mut AppState) -> bool {
    match ke.code {
        KeyCode::Char('a') => ask_admin(app, AdminAction::SaveAllNzbs),
        KeyCode::Char('x') => ask_admin(app, AdminAction::ClearDatabase),
        _ => return false,
    }
    true
}

/// What: Handle a key on the Status tab.
pub fn handle_status_key(
    ke: &KeyEvent,
    app: &mut AppState,
    req_tx: &mpsc::UnboundedSender<Request>,
) {
    if handle_admin_key(ke, app) {
        return;
    }
    if ke.code == KeyCode::Char('r') {
        super::refresh_current(app, req_tx);
    }
}

/// Move a row selection by `delta` within `0..len`.
fn step(selected: &mut usize, delta: isize, len: usize) {
    *selected = selected
        .saturating_add_signed(delta)
        .min(len.saturating_sub(1));
}

/// What: Handle a key on the Releases tab.
///
/// Details:
/// - Left/Right and PageUp/PageDown change pages; the selection resets to the first row.
pub fn handle_releases_key(
    ke: &KeyEvent,
    app: &mut AppState,
    req_tx: &mpsc::UnboundedSender<Request>,
) {
    if handle_admin_key(ke, app) {
        return;
    }
    let len = app.releases.page().visible().len();
    match ke.code {
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
            app.releases.set_page(-1);
            app.releases_selected = 0;
        }
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
            app.releases.set_page(1);
            app.releases_selected = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => step(&mut app.releases_selected, -1, len),
        KeyCode::Down | KeyCode::Char('j') => step(&mut app.releases_selected, 1, len),
        KeyCode::Char('r') => super::refresh_current(app, req_tx),
        _ => {}
    }
}

/// What: Handle a key on the NZBs tab.
///
/// Details:
/// - `d` or Enter downloads the selected NZB into the download directory.
pub fn handle_nzbs_key(
    ke: &KeyEvent,
    app: &mut AppState,
    req_tx: &mpsc::UnboundedSender<Request>,
) {
    if handle_admin_key(ke, app) {
        return;
    }
    let len = app.nzbs.page().visible().len();
    match ke.code {
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
            app.nzbs.set_page(-1);
            app.nzbs_selected = 0;
        }
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
            app.nzbs.set_page(1);
            app.nzbs_selected = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => step(&mut app.nzbs_selected, -1, len),
        KeyCode::Down | KeyCode::Char('j') => step(&mut app.nzbs_selected, 1, len),
        KeyCode::Char('d') | KeyCode::Enter => request_download(app, req_tx),
        KeyCode::Char('r') => super::refresh_current(app, req_tx),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::state::types::GeneratedFile;
    use crossterm::event::KeyModifiers;
    use std::num::NonZeroUsize;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn app_with_nzbs(n: usize) -> AppState {
        let cfg = ConsoleConfig {
            nzb_page_size: NonZeroUsize::new(2).expect("non-zero"),
            ..ConsoleConfig::default()
        };
        let mut app = AppState::new(&cfg);
        let ticket = app.nzbs.begin_load();
        let items = (0..n)
            .map(|i| GeneratedFile {
                name: Some(format!("n{i}")),
                key: (i % 2 == 0).then(|| format!("k{i}")),
                ..GeneratedFile::default()
            })
            .collect();
        app.nzbs.apply_load(ticket, Ok(items));
        app
    }

    #[test]
    /// What: Paging and selection on the NZBs tab pick the right download key.
    ///
    /// Inputs:
    /// - 5 NZBs at 2 per page; Right, Down, `d`; then Down past the end.
    ///
    /// Output:
    /// - Second page, row 1 (`n3`, no key) reports an error; row 0 (`n2`) downloads `k2`.
    fn nzb_paging_and_download() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app_with_nzbs(5);
        handle_nzbs_key(&press(KeyCode::Right), &mut app, &tx);
        assert_eq!(app.nzbs.page().current_page(), 2);
        handle_nzbs_key(&press(KeyCode::Down), &mut app, &tx);
        handle_nzbs_key(&press(KeyCode::Down), &mut app, &tx);
        assert_eq!(app.nzbs_selected, 1);
        handle_nzbs_key(&press(KeyCode::Char('d')), &mut app, &tx);
        assert!(rx.try_recv().is_err());
        assert!(
            app.download_status
                .as_ref()
                .is_some_and(crate::state::StatusLine::is_error)
        );

        handle_nzbs_key(&press(KeyCode::Up), &mut app, &tx);
        handle_nzbs_key(&press(KeyCode::Enter), &mut app, &tx);
        match rx.try_recv() {
            Ok(Request::Download { key, .. }) => assert_eq!(key, "k2"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn page_keys_saturate() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app_with_nzbs(5);
        for _ in 0..5 {
            handle_nzbs_key(&press(KeyCode::PageDown), &mut app, &tx);
        }
        assert_eq!(app.nzbs.page().indicator().label, "Page 3 of 3");
        for _ in 0..5 {
            handle_nzbs_key(&press(KeyCode::Left), &mut app, &tx);
        }
        assert_eq!(app.nzbs.page().current_page(), 1);
    }
}
