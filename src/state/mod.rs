//! Application state: the single-owner `AppState`, modal dialogs, pagination and wire types.

pub mod app_state;
pub mod modal;
pub mod pager;
pub mod types;

pub use app_state::{AppState, Tab};
pub use modal::Modal;
pub use pager::{PageIndicator, PageState};
pub use types::{
    GeneratedFile, LoadTickets, Release, ScanStatus, SecretEditIntent, SettingsRecord,
    SettingsUpdate, StatusLine, StatusTone,
};
