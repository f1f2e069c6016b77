//! Library entry for the TriceraPost console, exposing the control surface for the binary and
//! integration tests.
//!
//! - `sources`: HTTP transport and the typed TriceraPost API client.
//! - `logic`: settings sync, paginated collections, scan status and admin actions.
//! - `state`: the single-writer application state the TUI renders.
//! - `app`, `events`, `ui`: the terminal front end.
//! - `args`: command-line parsing and one-shot commands.

pub mod app;
pub mod args;
pub mod config;
pub mod events;
pub mod logic;
pub mod sources;
pub mod state;
pub mod ui;
pub mod util;

#[cfg(test)]
pub mod test_utils;
