//! Scan counters panel.

use chrono::Local;
use tracing::warn;

use crate::sources::{ApiClient, ApiError};
use crate::state::types::{LoadTickets, ScanStatus, StatusLine};

/// Placeholder for a missing counter.
pub const MISSING: &str = "-";

/// What: Last fetched scan counters plus the panel footer.
#[derive(Debug, Default)]
pub struct ScanStatusPanel {
    /// Counters, `None` before the first load or after a failure.
    counters: Option<ScanStatus>,
    /// `Last updated: ...` or `Failed to fetch status`.
    footer: Option<StatusLine>,
    /// Load correlation ids.
    loads: LoadTickets,
}

impl ScanStatusPanel {
    /// Start a refresh and return its ticket.
    pub const fn begin_load(&mut self) -> u64 {
        self.loads.issue()
    }

    /// What: Apply a refresh result.
    ///
    /// Output:
    /// - `false` when a newer refresh superseded this one.
    ///
    /// Details:
    /// - Failure blanks every metric to `-`.
    pub fn apply_load(&mut self, ticket: u64, result: Result<ScanStatus, ApiError>) -> bool {
        if !self.loads.is_latest(ticket) {
            return false;
        }
        match result {
            Ok(status) => {
                self.counters = Some(status);
                self.footer = Some(StatusLine::neutral(format!(
                    "Last updated: {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S")
                )));
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch scan status");
                self.counters = None;
                self.footer = Some(StatusLine::error("Failed to fetch status"));
            }
        }
        true
    }

    /// Fetch and apply.
    pub async fn load(&mut self, api: &ApiClient) {
        let ticket = self.begin_load();
        let result = api.scan_status().await;
        self.apply_load(ticket, result);
    }

    /// Footer line.
    #[must_use]
    pub const fn footer(&self) -> Option<&StatusLine> {
        self.footer.as_ref()
    }

    /// `(label, value)` rows with `-` for anything missing.
    #[must_use]
    pub fn metrics(&self) -> Vec<(&'static str, String)> {
        let c = self.counters.as_ref();
        let pick = |f: fn(&ScanStatus) -> &Option<String>| {
            c.and_then(|s| f(s).clone())
                .unwrap_or_else(|| MISSING.to_string())
        };
        vec![
            ("Groups scanned", pick(|s| &s.groups_scanned)),
            ("Posts scanned", pick(|s| &s.posts_scanned)),
            ("Sets found", pick(|s| &s.sets_found)),
            ("Sets rejected", pick(|s| &s.sets_rejected)),
            ("NZBs found", pick(|s| &s.nzbs_found)),
            ("NZBs generated", pick(|s| &s.nzbs_generated)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::scripted_client;
    use serde_json::json;

    #[tokio::test]
    /// What: Counters render with `-` fallbacks and a timestamped footer.
    ///
    /// Inputs:
    /// - Status with two counters missing, then a failing refresh.
    ///
    /// Output:
    /// - Missing counters show `-`; failure blanks all and sets the error footer.
    async fn metrics_and_footer() {
        let (transport, api) = scripted_client();
        transport.push_json(
            200,
            &json!({"groups_scanned": 4, "posts_scanned": 1200, "sets_found": 0,
                    "sets_rejected": null, "nzbs_found": 2}),
        );
        transport.push_text(502, "");
        let mut panel = ScanStatusPanel::default();
        assert!(panel.metrics().iter().all(|(_, v)| v == MISSING));

        panel.load(&api).await;
        let m = panel.metrics();
        assert_eq!(m[0], ("Groups scanned", "4".to_string()));
        assert_eq!(m[2].1, "0");
        assert_eq!(m[3].1, "-");
        assert_eq!(m[5].1, "-");
        let footer = panel.footer().expect("footer");
        assert!(footer.text.starts_with("Last updated: "));
        assert!(!footer.is_error());

        panel.load(&api).await;
        assert!(panel.metrics().iter().all(|(_, v)| v == MISSING));
        let footer = panel.footer().expect("footer");
        assert_eq!(footer.text, "Failed to fetch status");
        assert!(footer.is_error());
    }
}
