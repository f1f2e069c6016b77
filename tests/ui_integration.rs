//! Integration tests for UI rendering using ratatui's `TestBackend`.
//!
//! These tests draw full frames for each tab and dialog and check the visible text, without
//! a real terminal or a running service.

use ratatui::{Terminal, backend::TestBackend};

use tricera_console::config::ConsoleConfig;
use tricera_console::logic::AdminAction;
use tricera_console::state::types::{GeneratedFile, Release, SettingsRecord};
use tricera_console::state::{AppState, Modal, Tab};
use tricera_console::ui;

/// Render `app` into an 100x30 buffer and return it as one string per row.
fn render(app: &AppState) -> Vec<String> {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|f| ui::ui(f, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect())
        .collect()
}

fn contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|r| r.contains(needle))
}

#[test]
/// What: The header lists every tab and the configured endpoint.
///
/// Inputs:
/// - Fresh state for `http://nas.local:8080` mounted under `/tricerapost`.
///
/// Output:
/// - Tab titles, the endpoint label and `-` placeholders for unloaded counters.
fn header_and_empty_status_render() {
    let cfg = ConsoleConfig {
        base_url: "http://nas.local:8080/".into(),
        base_path: "tricerapost".into(),
        ..ConsoleConfig::default()
    };
    let app = AppState::new(&cfg);
    let rows = render(&app);
    for title in ["Status", "Settings", "Releases", "NZBs"] {
        assert!(contains(&rows, title), "missing tab {title}");
    }
    assert!(contains(&rows, "http://nas.local:8080/tricerapost"));
    assert!(contains(&rows, "Groups scanned"));
}

#[test]
/// What: The password row shows only a mask.
///
/// Inputs:
/// - Settings loaded with a stored password, then `s3cret` typed into the secret input.
///
/// Output:
/// - Six asterisks are shown; the plaintext never appears in the frame.
fn settings_password_is_masked() {
    let mut app = AppState::new(&ConsoleConfig::default());
    app.tab = Tab::Settings;
    let ticket = app.settings.begin_load();
    let record = SettingsRecord {
        host: Some("news.example.net".into()),
        password_set: true,
        ..SettingsRecord::default()
    };
    app.settings.apply_load(ticket, Ok(record));
    app.settings.set_secret_input("s3cret");
    let rows = render(&app);
    assert!(contains(&rows, "news.example.net"));
    assert!(contains(&rows, "******"));
    assert!(!contains(&rows, "s3cret"));
    assert!(contains(
        &rows,
        tricera_console::logic::settings_sync::PASSWORD_STORED
    ));
}

#[test]
fn releases_page_shows_cards_and_indicator() {
    let mut app = AppState::new(&ConsoleConfig::default());
    app.tab = Tab::Releases;
    let ticket = app.releases.begin_load();
    let items = vec![
        Release {
            name: Some("Some.Show.S01E01".into()),
            size_human: Some("1.2 GB".into()),
            nzb_created: true,
            ..Release::default()
        },
        Release {
            filename_guess: Some("movie.mkv".into()),
            ..Release::default()
        },
    ];
    app.releases.apply_load(ticket, Ok(items));
    let rows = render(&app);
    assert!(contains(&rows, "Some.Show.S01E01"));
    assert!(contains(&rows, "[1.2 GB]"));
    assert!(contains(&rows, "movie.mkv"));
    assert!(contains(&rows, "Page 1 of 1"));
    assert!(contains(&rows, "2 releases found."));
}

#[test]
fn empty_nzbs_show_page_one_of_one() {
    let mut app = AppState::new(&ConsoleConfig::default());
    app.tab = Tab::Nzbs;
    let ticket = app.nzbs.begin_load();
    app.nzbs.apply_load(ticket, Ok(Vec::<GeneratedFile>::new()));
    let rows = render(&app);
    assert!(contains(&rows, "Page 1 of 1"));
    assert!(contains(&rows, "No NZBs yet."));
}

#[test]
/// What: The confirm dialog shows the action prompt over the active tab.
///
/// Inputs:
/// - Confirm modal for clearing the database.
///
/// Output:
/// - Title, prompt start and the y/n hints are visible.
fn confirm_modal_overlays_tab() {
    let mut app = AppState::new(&ConsoleConfig::default());
    app.modal = Modal::Confirm(AdminAction::ClearDatabase);
    let rows = render(&app);
    assert!(contains(&rows, "Clear database"));
    assert!(contains(&rows, "Clear all stored data"));
    assert!(contains(&rows, "[y]"));
    assert!(contains(&rows, "[n]"));
}

#[test]
fn help_and_alert_render() {
    let mut app = AppState::new(&ConsoleConfig::default());
    app.modal = Modal::Help;
    assert!(contains(&render(&app), "Switch tab"));
    app.modal = Modal::Alert {
        message: "Download failed: HTTP 404".into(),
    };
    assert!(contains(&render(&app), "Download failed: HTTP 404"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let app = AppState::new(&ConsoleConfig::default());
    let backend = TestBackend::new(10, 4);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|f| ui::ui(f, &app)).expect("draw");
}

#[test]
/// What: A save-all result replaces an older download line on the NZBs tab.
///
/// Inputs:
/// - NZBs tab showing `Saved /tmp/old.nzb`, then save-all confirmed and finished with 7.
///
/// Output:
/// - `Saved 7 NZBs.` is visible and the old download line is gone.
fn nzbs_tab_shows_latest_admin_result() {
    use tricera_console::logic::AdminOutcome;
    use tricera_console::logic::dispatch::{answer_admin, ask_admin};
    use tricera_console::state::StatusLine;

    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let mut app = AppState::new(&ConsoleConfig::default());
    app.tab = Tab::Nzbs;
    app.download_status = Some(StatusLine::neutral("Saved /tmp/old.nzb"));
    assert!(contains(&render(&app), "Saved /tmp/old.nzb"));

    ask_admin(&mut app, AdminAction::SaveAllNzbs);
    answer_admin(&mut app, true, &tx);
    let _ = app
        .admin
        .finish(AdminAction::SaveAllNzbs, Ok(AdminOutcome::Saved(7)));
    let rows = render(&app);
    assert!(contains(&rows, "Saved 7 NZBs."));
    assert!(!contains(&rows, "Saved /tmp/old.nzb"));
}
