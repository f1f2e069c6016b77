//! TUI host: terminal setup, runtime event loop and worker tasks.

pub mod runtime;
mod terminal;

pub use runtime::run;
