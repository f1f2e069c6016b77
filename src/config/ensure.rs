use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::{ConsoleConfig, normalize_key};

/// Skeleton written when `console.conf` is missing or empty.
pub const CONFIG_SKELETON_CONTENT: &str = "# TriceraPost console configuration\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments. A # or // after a space starts an inline comment.\n\
# TRICERA_BASE_URL and TRICERA_BASE_PATH override the values below;\n\
# command-line flags override both.\n\
#\n\
# Address of the TriceraPost service.\n\
base_url = http://127.0.0.1:8080\n\
#\n\
# Prefix the API is mounted under, e.g. /tricerapost (empty for none).\n\
base_path =\n\
#\n\
# Items per page in the Releases and NZBs tabs.\n\
release_page_size = 20\n\
nzb_page_size = 20\n\
#\n\
# Network timeouts in seconds.\n\
connect_timeout_secs = 10\n\
request_timeout_secs = 30\n";

/// What: Make sure `console.conf` exists and names every known key.
///
/// Inputs:
/// - `path`: Location of `console.conf`.
/// - `defaults`: Values appended for keys the file lacks.
///
/// Output:
/// - None; best effort, failures are only logged.
///
/// Details:
/// - A missing or empty file is seeded from [`CONFIG_SKELETON_CONTENT`].
/// - Existing lines are never rewritten; missing keys are appended at the end.
pub fn ensure_config_keys_present(path: &Path, defaults: &ConsoleConfig) {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let existing = fs::read_to_string(path).unwrap_or_default();
    let created_new = existing.trim().is_empty();
    let mut lines: Vec<String> = if created_new {
        CONFIG_SKELETON_CONTENT.lines().map(ToOwned::to_owned).collect()
    } else {
        existing.lines().map(ToOwned::to_owned).collect()
    };

    let mut have: HashSet<String> = HashSet::new();
    for line in &lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        if let Some((k, _)) = trimmed.split_once('=') {
            have.insert(normalize_key(k));
        }
    }

    let pairs: [(&str, String); 7] = [
        ("base_url", defaults.base_url.clone()),
        ("base_path", defaults.base_path.clone()),
        ("release_page_size", defaults.release_page_size.to_string()),
        ("nzb_page_size", defaults.nzb_page_size.to_string()),
        ("download_dir", defaults.download_dir.display().to_string()),
        ("connect_timeout_secs", defaults.connect_timeout_secs.to_string()),
        ("request_timeout_secs", defaults.request_timeout_secs.to_string()),
    ];
    let mut appended_any = false;
    for (k, v) in &pairs {
        if !have.contains(*k) {
            lines.push(format!("{k} = {v}"));
            appended_any = true;
        }
    }
    if created_new || appended_any {
        let mut content = lines.join("\n");
        content.push('\n');
        match fs::write(path, content) {
            Ok(()) => debug!(path = %path.display(), created_new, "config keys ensured"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to write config"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    /// What: A missing file is seeded and every key is present afterwards.
    ///
    /// Inputs:
    /// - Empty temp dir.
    ///
    /// Output:
    /// - File parses back to the defaults.
    fn seeds_missing_file_with_all_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("console.conf");
        let defaults = ConsoleConfig {
            download_dir: dir.path().join("dl"),
            ..ConsoleConfig::default()
        };
        ensure_config_keys_present(&path, &defaults);
        let content = fs::read_to_string(&path).expect("read");
        assert!(content.starts_with("# TriceraPost console configuration"));
        let mut parsed = ConsoleConfig::default();
        parse_config(&content, &mut parsed);
        assert_eq!(parsed, defaults);
    }

    #[test]
    fn appends_only_missing_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("console.conf");
        fs::write(&path, "Base-URL = http://nas:9000\n").expect("write");
        ensure_config_keys_present(&path, &ConsoleConfig::default());
        let content = fs::read_to_string(&path).expect("read");
        assert!(content.starts_with("Base-URL = http://nas:9000\n"));
        assert_eq!(content.matches("base_url").count(), 0);
        assert!(content.contains("nzb_page_size = 20"));
        assert!(content.contains("request_timeout_secs = 30"));
    }
}
