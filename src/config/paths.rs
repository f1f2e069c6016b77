use std::env;
use std::path::{Path, PathBuf};

/// Application directory name under the config base.
const APP_DIR: &str = "tricera-console";

/// Name of the console configuration file.
pub const CONFIG_FILE_NAME: &str = "console.conf";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// What: Config directory path without touching the filesystem.
///
/// Output:
/// - `$HOME/.config/tricera-console` when HOME is set, else the XDG config base.
#[must_use]
pub fn config_dir_path() -> PathBuf {
    if let Ok(home) = env::var("HOME")
        && !home.trim().is_empty()
    {
        return Path::new(&home).join(".config").join(APP_DIR);
    }
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

/// Config directory (ensured to exist).
#[must_use]
pub fn config_dir() -> PathBuf {
    let dir = config_dir_path();
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `$HOME/.config/tricera-console/logs` (ensured to exist).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Default NZB download directory (not created until the first download).
#[must_use]
pub fn default_download_dir() -> PathBuf {
    config_dir_path().join("downloads")
}

/// Path of `console.conf`.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
