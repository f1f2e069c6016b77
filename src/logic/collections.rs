//! Paginated collection store for releases and generated NZBs.

use std::num::NonZeroUsize;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::sources::api::{NZBS_PATH, RELEASES_PATH};
use crate::sources::{ApiClient, ApiError};
use crate::state::pager::{PageIndicator, PageState};
use crate::state::types::{GeneratedFile, LoadTickets, Release, StatusLine};
use crate::util::format_megabytes;

/// Host-neutral rendering of one collection item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemCard {
    /// Heading.
    pub title: String,
    /// Short tags shown in a row.
    pub badges: Vec<String>,
    /// Extra detail lines.
    pub lines: Vec<String>,
    /// Render with emphasis.
    pub highlighted: bool,
    /// Key for the download action, when the item can be downloaded.
    pub download_key: Option<String>,
}

/// What: A collection the store can fetch and render.
///
/// Details:
/// - Each implementor names its endpoint and the status texts shown after a load.
pub trait ResultItem: DeserializeOwned + Clone + Send + 'static {
    /// Endpoint returning the full list.
    const PATH: &'static str;
    /// Status when the list is empty.
    const EMPTY_MESSAGE: &'static str;
    /// Prefix of the failure status (`{prefix}: {msg}`).
    const FAILURE_PREFIX: &'static str;

    /// Status for a non-empty list of `n` items.
    fn found_message(n: usize) -> String;

    /// Card for display.
    fn card(&self) -> ItemCard;
}

impl ResultItem for Release {
    const PATH: &'static str = RELEASES_PATH;
    const EMPTY_MESSAGE: &'static str = "No complete releases yet.";
    const FAILURE_PREFIX: &'static str = "Failed to load releases";

    fn found_message(n: usize) -> String {
        format!("{n} releases found.")
    }

    fn card(&self) -> ItemCard {
        let title = self
            .filename_guess
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "(untitled)".to_string());
        let mut badges = vec![
            self.size_human.clone().unwrap_or_else(|| "size ?".to_string()),
            format!(
                "{}/{}",
                self.parts_received.unwrap_or(0),
                self.parts_expected
                    .filter(|n| *n > 0)
                    .map_or_else(|| "?".to_string(), |n| n.to_string())
            ),
        ];
        if let Some(kind) = self.kind.as_deref().filter(|k| *k != "unknown") {
            badges.push(kind.to_string());
        }
        badges.extend(
            [&self.quality, &self.source, &self.codec, &self.audio]
                .into_iter()
                .flatten()
                .cloned(),
        );
        if self.subtitles {
            badges.push("subs".to_string());
        }
        if !self.languages.is_empty() {
            badges.push(self.languages.join(", "));
        }
        let mut lines = Vec::with_capacity(2);
        if !self.groups.is_empty() {
            lines.push(format!("Groups: {}", self.groups.join(", ")));
        }
        lines.push(if self.nzb_created {
            "NZB created".to_string()
        } else {
            "NZB pending".to_string()
        });
        ItemCard {
            title,
            badges,
            lines,
            highlighted: self.nzb_created,
            download_key: None,
        }
    }
}

impl ResultItem for GeneratedFile {
    const PATH: &'static str = NZBS_PATH;
    const EMPTY_MESSAGE: &'static str = "No NZBs yet.";
    const FAILURE_PREFIX: &'static str = "Failed to load NZBs";

    fn found_message(n: usize) -> String {
        format!("{n} NZBs ready.")
    }

    fn card(&self) -> ItemCard {
        let lines = self
            .group
            .as_ref()
            .map(|g| vec![format!("Group: {g}")])
            .unwrap_or_default();
        ItemCard {
            title: self
                .name
                .clone()
                .unwrap_or_else(|| "(untitled)".to_string()),
            badges: vec![
                self.source.clone().unwrap_or_else(|| "unknown".to_string()),
                format_megabytes(self.bytes),
            ],
            lines,
            highlighted: false,
            download_key: self.key.clone(),
        }
    }
}

/// Rendered page of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionView {
    /// Cards of the visible slice.
    pub cards: Vec<ItemCard>,
    /// Page indicator and control state.
    pub indicator: PageIndicator,
    /// Latest status, if any.
    pub status: Option<StatusLine>,
}

/// What: Fetched list plus its paging position and load status.
///
/// Details:
/// - One explicitly owned instance per collection; no shared or global state.
/// - A failed load keeps the previously loaded items so the operator can keep browsing.
#[derive(Debug)]
pub struct CollectionStore<T> {
    /// Items and position.
    page: PageState<T>,
    /// Latest load status.
    status: Option<StatusLine>,
    /// Load correlation ids.
    loads: LoadTickets,
}

impl<T: ResultItem> Default for CollectionStore<T> {
    fn default() -> Self {
        Self {
            page: PageState::default(),
            status: None,
            loads: LoadTickets::default(),
        }
    }
}

impl<T: ResultItem> CollectionStore<T> {
    /// Empty store with the given page size.
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page: PageState::new(page_size),
            ..Self::default()
        }
    }

    /// Paging state.
    #[must_use]
    pub const fn page(&self) -> &PageState<T> {
        &self.page
    }

    /// Latest load status.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Start a load and return its ticket.
    pub const fn begin_load(&mut self) -> u64 {
        self.loads.issue()
    }

    /// What: Apply the outcome of the load identified by `ticket`.
    ///
    /// Inputs:
    /// - `ticket`: Value from [`Self::begin_load`].
    /// - `result`: Full list or failure.
    ///
    /// Output:
    /// - `true` when applied; `false` when superseded by a newer load.
    pub fn apply_load(&mut self, ticket: u64, result: Result<Vec<T>, ApiError>) -> bool {
        if !self.loads.is_latest(ticket) {
            debug!(ticket, path = T::PATH, "discarding stale collection load");
            return false;
        }
        match result {
            Ok(items) => {
                let n = items.len();
                self.page.replace(items);
                info!(path = T::PATH, count = n, "collection loaded");
                self.status = Some(StatusLine::neutral(if n == 0 {
                    T::EMPTY_MESSAGE.to_string()
                } else {
                    T::found_message(n)
                }));
            }
            Err(e) => {
                warn!(path = T::PATH, error = %e, "collection load failed");
                self.status = Some(StatusLine::error(format!("{}: {e}", T::FAILURE_PREFIX)));
            }
        }
        true
    }

    /// Fetch the full list and apply it.
    pub async fn load(&mut self, api: &ApiClient) {
        let ticket = self.begin_load();
        let result = api.collection::<T>(T::PATH).await;
        self.apply_load(ticket, result);
    }

    /// Move by `delta` pages, clamped.
    pub fn set_page(&mut self, delta: isize) {
        self.page.set_page(delta);
    }

    /// Jump to an absolute page, clamped.
    pub fn goto(&mut self, page: usize) {
        self.page.goto(page);
    }

    /// Item at `index` within the visible slice.
    #[must_use]
    pub fn visible_item(&self, index: usize) -> Option<&T> {
        self.page.visible().get(index)
    }

    /// Cards, indicator and status for the current page.
    #[must_use]
    pub fn view(&self) -> CollectionView {
        CollectionView {
            cards: self.page.visible().iter().map(ResultItem::card).collect(),
            indicator: self.page.indicator(),
            status: self.status.clone(),
        }
    }
}
