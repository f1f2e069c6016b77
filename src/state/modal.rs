//! Modal dialog state for the UI.

use crate::logic::AdminAction;

/// What: Dialog shown on top of the active tab.
///
/// Details:
/// - While a modal is open, keys go to it and not to the tab underneath.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    /// No dialog.
    #[default]
    None,
    /// Informational message dismissed with any key.
    Alert {
        /// Text shown.
        message: String,
    },
    /// Yes/no confirmation for an administrative action.
    Confirm(AdminAction),
    /// Key reference.
    Help,
}

impl Modal {
    /// `true` when no dialog is open.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
