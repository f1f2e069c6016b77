//! Central `AppState` owned by the event loop.

use std::path::PathBuf;

use crate::config::ConsoleConfig;
use crate::logic::{AdminHandler, CollectionStore, ScanStatusPanel, SettingsController};
use crate::sources::{normalize_base_path, normalize_base_url};
use crate::state::modal::Modal;
use crate::state::types::{GeneratedFile, Release, StatusLine};

/// Top-level tabs in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Scan counters.
    #[default]
    Status,
    /// Connection settings form.
    Settings,
    /// Candidate releases.
    Releases,
    /// Generated NZBs.
    Nzbs,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 4] = [Self::Status, Self::Settings, Self::Releases, Self::Nzbs];

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Settings => "Settings",
            Self::Releases => "Releases",
            Self::Nzbs => "NZBs",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Status => 0,
            Self::Settings => 1,
            Self::Releases => 2,
            Self::Nzbs => 3,
        }
    }

    /// Next tab, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What: Everything the TUI renders and mutates.
///
/// Details:
/// - Only the event loop holds `&mut AppState`; workers report back over channels, so every
///   read-modify-clamp sequence on the stores runs without interleaving.
#[derive(Debug)]
pub struct AppState {
    /// Active tab.
    pub tab: Tab,
    /// Open dialog.
    pub modal: Modal,
    /// Settings form and sync status.
    pub settings: SettingsController,
    /// Cursor row in the settings form.
    pub settings_cursor: usize,
    /// Candidate releases.
    pub releases: CollectionStore<Release>,
    /// Selected row in the visible release slice.
    pub releases_selected: usize,
    /// Generated NZBs.
    pub nzbs: CollectionStore<GeneratedFile>,
    /// Selected row in the visible NZB slice.
    pub nzbs_selected: usize,
    /// Scan counters panel.
    pub scan: ScanStatusPanel,
    /// Save-all / clear-database state.
    pub admin: AdminHandler,
    /// Last download result.
    pub download_status: Option<StatusLine>,
    /// Where downloads are written.
    pub download_dir: PathBuf,
    /// `origin + prefix` shown in the header.
    pub endpoint_label: String,
}

impl AppState {
    /// What: Build fresh state from configuration.
    #[must_use]
    pub fn new(cfg: &ConsoleConfig) -> Self {
        Self {
            tab: Tab::default(),
            modal: Modal::default(),
            settings: SettingsController::new(),
            settings_cursor: 0,
            releases: CollectionStore::new(cfg.release_page_size),
            releases_selected: 0,
            nzbs: CollectionStore::new(cfg.nzb_page_size),
            nzbs_selected: 0,
            scan: ScanStatusPanel::default(),
            admin: AdminHandler::new(),
            download_status: None,
            download_dir: cfg.download_dir.clone(),
            endpoint_label: format!(
                "{}{}",
                normalize_base_url(&cfg.base_url),
                normalize_base_path(&cfg.base_path)
            ),
        }
    }

    /// Keep row selections inside the visible slices after a reload or page change.
    pub fn clamp_selections(&mut self) {
        let r = self.releases.page().visible().len();
        self.releases_selected = self.releases_selected.min(r.saturating_sub(1));
        let n = self.nzbs.page().visible().len();
        self.nzbs_selected = self.nzbs_selected.min(n.saturating_sub(1));
    }

    /// Selected NZB on the current page.
    #[must_use]
    pub fn selected_nzb(&self) -> Option<&GeneratedFile> {
        self.nzbs.visible_item(self.nzbs_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle_both_ways() {
        let mut t = Tab::Status;
        for _ in 0..4 {
            t = t.next();
        }
        assert_eq!(t, Tab::Status);
        assert_eq!(Tab::Status.prev(), Tab::Nzbs);
        assert_eq!(Tab::Releases.next(), Tab::Nzbs);
    }

    #[test]
    fn endpoint_label_joins_origin_and_prefix() {
        let cfg = ConsoleConfig {
            base_url: "nas.local:8080/".into(),
            base_path: "tricerapost/".into(),
            ..ConsoleConfig::default()
        };
        let app = AppState::new(&cfg);
        assert_eq!(app.endpoint_label, "http://nas.local:8080/tricerapost");
    }
}
