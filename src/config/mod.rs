//! Console configuration: `console.conf`, environment overrides and defaults.
//!
//! Precedence, highest first: command-line flags (applied by `args`), environment
//! (`TRICERA_BASE_URL`, `TRICERA_BASE_PATH`), the config file, built-in defaults.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::state::pager::DEFAULT_PAGE_SIZE;

mod ensure;
pub mod paths;

pub use ensure::{CONFIG_SKELETON_CONTENT, ensure_config_keys_present};

/// Environment variable overriding `base_url`.
pub const ENV_BASE_URL: &str = "TRICERA_BASE_URL";
/// Environment variable overriding `base_path`.
pub const ENV_BASE_PATH: &str = "TRICERA_BASE_PATH";

/// Default service address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// What: Resolved console settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Service origin, e.g. `http://nas.local:8080`.
    pub base_url: String,
    /// Prefix the API is mounted under (empty for none).
    pub base_path: String,
    /// Releases per page.
    pub release_page_size: NonZeroUsize,
    /// NZBs per page.
    pub nzb_page_size: NonZeroUsize,
    /// Where downloaded NZBs are written.
    pub download_dir: PathBuf,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_path: String::new(),
            release_page_size: DEFAULT_PAGE_SIZE,
            nzb_page_size: DEFAULT_PAGE_SIZE,
            download_dir: paths::default_download_dir(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl ConsoleConfig {
    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// What: Load `console.conf` from the config directory, seeding it when missing.
    ///
    /// Output:
    /// - Defaults overlaid with the file and the environment.
    #[must_use]
    pub fn load() -> Self {
        let path = paths::config_file();
        let defaults = Self::default();
        ensure_config_keys_present(&path, &defaults);
        let mut cfg = Self::load_from(&path);
        cfg.apply_env(|k| std::env::var(k).ok());
        cfg
    }

    /// What: Defaults overlaid with the file at `path` (missing file = defaults).
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let mut cfg = Self::default();
        match fs::read_to_string(path) {
            Ok(content) => {
                parse_config(&content, &mut cfg);
                debug!(path = %path.display(), "config loaded");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config unreadable; using defaults");
            }
        }
        cfg
    }

    /// What: Apply environment overrides through `lookup`.
    ///
    /// Details:
    /// - Empty values are ignored for `base_url`; an empty `base_path` clears the prefix.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(path) = lookup(ENV_BASE_PATH) {
            self.base_path = path.trim().to_string();
        }
    }
}

/// What: Drop `//` and `#` trailing comments from a config value.
///
/// Details:
/// - A marker only starts a comment when whitespace precedes it, so
///   `http://host:8080` and `#abc` survive intact.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let cut = s.char_indices().find_map(|(i, c)| {
        let marker = c == '#' || (c == '/' && s[i..].starts_with("//"));
        let after_space = s[..i].chars().next_back().is_some_and(char::is_whitespace);
        (marker && after_space).then_some(i)
    });
    cut.map_or(s, |i| &s[..i]).trim()
}

/// Normalise a config key: lowercase, `.`/`-`/space become `_`.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

/// What: Parse `key = value` lines into `cfg`.
///
/// Details:
/// - Unknown keys and unparsable values are ignored so a typo never blocks startup.
/// - Page sizes of zero are ignored.
pub fn parse_config(content: &str, cfg: &mut ConsoleConfig) {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = normalize_key(raw_key);
        let val = strip_inline_comment(raw_val.trim());
        match key.as_str() {
            "base_url" | "server" | "url" => {
                if !val.is_empty() {
                    cfg.base_url = val.to_string();
                }
            }
            "base_path" | "api_prefix" => cfg.base_path = val.to_string(),
            "release_page_size" | "releases_per_page" => {
                if let Some(n) = val.parse::<usize>().ok().and_then(NonZeroUsize::new) {
                    cfg.release_page_size = n;
                }
            }
            "nzb_page_size" | "nzbs_per_page" => {
                if let Some(n) = val.parse::<usize>().ok().and_then(NonZeroUsize::new) {
                    cfg.nzb_page_size = n;
                }
            }
            "download_dir" => {
                if !val.is_empty() {
                    cfg.download_dir = expand_home(val);
                }
            }
            "connect_timeout_secs" => {
                if let Ok(v) = val.parse::<u64>() {
                    cfg.connect_timeout_secs = v;
                }
            }
            "request_timeout_secs" | "timeout_secs" => {
                if let Ok(v) = val.parse::<u64>() {
                    cfg.request_timeout_secs = v;
                }
            }
            other => debug!(key = other, "ignoring unknown config key"),
        }
    }
}

/// Expand a leading `~/` to `$HOME`.
fn expand_home(val: &str) -> PathBuf {
    if let Some(rest) = val.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return Path::new(&home).join(rest);
    }
    PathBuf::from(val)
}
