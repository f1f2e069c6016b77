//! Command-line argument parsing and the one-shot host.

pub mod definition;
pub mod oneshot;
pub mod utils;

pub use definition::Args;
pub use oneshot::run_oneshot;
pub use utils::determine_log_level;
