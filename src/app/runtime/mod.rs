use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::ConsoleConfig;
use crate::logic::dispatch::request_everything;
use crate::sources::ApiClient;
use crate::state::AppState;

use super::terminal::{restore_terminal, setup_terminal};

mod background;
mod channels;
mod cleanup;
mod event_loop;
mod handlers;
mod workers;

use background::spawn_event_thread;
use channels::Channels;
use cleanup::cleanup_on_exit;
use event_loop::run_event_loop;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Environment switch that skips raw terminal setup (tests and CI).
pub const HEADLESS_ENV: &str = "TRICERA_TEST_HEADLESS";

/// What: Run the console TUI end-to-end: initialize terminal and state, spawn the API
/// worker, load every view once, drive the event loop, and restore the terminal on exit.
///
/// Inputs:
/// - `cfg`: Resolved configuration (service address, page sizes, download directory).
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on unrecoverable terminal or client errors.
///
/// Details:
/// - Headless mode (`TRICERA_TEST_HEADLESS=1`) skips the terminal and the key reader but still
///   runs the loop and the initial loads.
/// - No polling: after the initial loads every request is operator-triggered.
pub async fn run(cfg: ConsoleConfig) -> Result<()> {
    let headless = std::env::var(HEADLESS_ENV).ok().as_deref() == Some("1");
    let api = ApiClient::from_config(&cfg)?;

    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        match Terminal::new(CrosstermBackend::new(std::io::stdout())) {
            Ok(t) => Some(t),
            Err(e) => {
                let _ = restore_terminal();
                return Err(e.into());
            }
        }
    };

    let mut app = AppState::new(&cfg);
    let mut channels = Channels::new(api);

    spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );

    request_everything(&mut app, &channels.req_tx);
    tracing::info!(endpoint = %app.endpoint_label, headless, "console started");

    run_event_loop(&mut terminal, &mut app, &mut channels).await;

    cleanup_on_exit(&app, &channels);
    if !headless {
        restore_terminal()?;
    }
    Ok(())
}
