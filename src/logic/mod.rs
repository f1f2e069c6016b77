//! Host-neutral behaviour shared by the TUI and the one-shot CLI.
//!
//! Every controller here owns its state explicitly and exposes split `begin_*` / `apply_*`
//! steps so the runtime can keep a single writer while network work runs on worker tasks.

pub mod admin;
pub mod collections;
pub mod dispatch;
pub mod download;
pub mod scan_status;
pub mod settings_sync;

pub use admin::{AdminAction, AdminHandler, AdminOutcome, FollowUps};
pub use collections::{CollectionStore, CollectionView, ItemCard, ResultItem};
pub use dispatch::{Outcome, Request};
pub use download::{download_to, save_nzb};
pub use scan_status::ScanStatusPanel;
pub use settings_sync::{PasswordStatus, SettingsController, SettingsField, SettingsForm};
