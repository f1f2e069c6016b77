//! Client-side pagination over a fully fetched list.

use std::num::NonZeroUsize;

/// Default number of items per page for both collections.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// What: Page indicator and control state derived from a [`PageState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIndicator {
    /// `Page {current} of {total}`.
    pub label: String,
    /// Previous control disabled (`current <= 1`).
    pub prev_disabled: bool,
    /// Next control disabled (`current >= total`).
    pub next_disabled: bool,
}

/// What: Items plus the operator's position in them.
///
/// Details:
/// - `current_page` is 1-based and re-clamped into `[1, total_pages]` after every mutation.
/// - `total_pages` and the visible slice are derived on demand, never stored.
/// - Items are replaced wholesale on reload and never mutated individually.
#[derive(Debug, Clone)]
pub struct PageState<T> {
    /// Full collection as last fetched.
    items: Vec<T>,
    /// Items per page.
    page_size: NonZeroUsize,
    /// 1-based current page.
    current_page: usize,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> PageState<T> {
    /// Empty state on page 1.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            items: Vec::new(),
            page_size,
            current_page: 1,
        }
    }

    /// What: Replace the collection.
    ///
    /// Inputs:
    /// - `items`: Freshly fetched list.
    ///
    /// Details:
    /// - Keeps the current page unless the new list is too short for it.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp();
    }

    /// What: Move by `delta` pages (`-1` previous, `+1` next).
    ///
    /// Details:
    /// - Saturates at both ends; no wraparound, no error.
    pub fn set_page(&mut self, delta: isize) {
        self.current_page = self.current_page.saturating_add_signed(delta);
        self.clamp();
    }

    /// Go to the previous page (no-op on page 1).
    pub fn prev(&mut self) {
        self.set_page(-1);
    }

    /// Go to the next page (no-op on the last page).
    pub fn next(&mut self) {
        self.set_page(1);
    }

    /// What: Jump to an absolute page, clamped.
    pub fn goto(&mut self, page: usize) {
        self.current_page = page;
        self.clamp();
    }

    /// Change the page size and re-clamp.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.clamp();
    }

    /// Re-apply the `[1, total_pages]` invariant.
    fn clamp(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }

    /// `max(1, ceil(len / page_size))`.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size.get()).max(1)
    }

    /// 1-based current page.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Full collection.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Offset of the first visible item.
    #[must_use]
    pub fn start_index(&self) -> usize {
        (self.current_page - 1) * self.page_size.get()
    }

    /// `items[(current-1)*size .. current*size]`, truncated to the list end.
    #[must_use]
    pub fn visible(&self) -> &[T] {
        let start = self.start_index().min(self.items.len());
        let end = (start + self.page_size.get()).min(self.items.len());
        &self.items[start..end]
    }

    /// Indicator text and control flags for the current position.
    #[must_use]
    pub fn indicator(&self) -> PageIndicator {
        let total = self.total_pages();
        PageIndicator {
            label: format!("Page {} of {total}", self.current_page),
            prev_disabled: self.current_page <= 1,
            next_disabled: self.current_page >= total,
        }
    }
}
