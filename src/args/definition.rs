//! Command-line argument definition and processing.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::config::ConsoleConfig;

/// tricera-console - terminal control surface for a TriceraPost indexer
#[derive(Parser, Debug)]
#[command(name = "tricera-console")]
#[command(version)]
#[command(about = "Terminal control surface for a TriceraPost indexer", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Service address (overrides TRICERA_BASE_URL and console.conf)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Prefix the API is mounted under, e.g. /tricerapost
    #[arg(long)]
    pub base_path: Option<String>,

    /// Read configuration from this file instead of ~/.config/tricera-console/console.conf
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Items per page for releases and NZBs
    #[arg(long)]
    pub page_size: Option<NonZeroUsize>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print scan counters and exit
    #[arg(long)]
    pub status: bool,

    /// Print one page of candidate releases and exit
    #[arg(long)]
    pub releases: bool,

    /// Print one page of generated NZBs and exit
    #[arg(long)]
    pub nzbs: bool,

    /// Page to print with --releases or --nzbs (clamped to the last page)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Write every pending NZB to the server's output directory
    #[arg(long)]
    pub save_all: bool,

    /// Reset all stored data on the server
    #[arg(long)]
    pub clear_db: bool,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Download the NZB with this key and exit
    #[arg(long, value_name = "KEY")]
    pub download: Option<String>,

    /// Directory for --download (default: download_dir from console.conf)
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Prompt for a new NNTP password and store it
    #[arg(long, conflicts_with = "clear_password")]
    pub set_password: bool,

    /// Remove the stored NNTP password
    #[arg(long)]
    pub clear_password: bool,

    /// Print the current settings (never the password) and exit
    #[arg(long)]
    pub show_settings: bool,
}

impl Args {
    /// `true` when any one-shot flag was given, so the TUI should not start.
    #[must_use]
    pub const fn is_oneshot(&self) -> bool {
        self.status
            || self.releases
            || self.nzbs
            || self.save_all
            || self.clear_db
            || self.download.is_some()
            || self.set_password
            || self.clear_password
            || self.show_settings
    }

    /// What: Overlay command-line values onto `cfg` (highest precedence).
    pub fn apply_to(&self, cfg: &mut ConsoleConfig) {
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            cfg.base_url = url.trim().to_string();
        }
        if let Some(path) = &self.base_path {
            cfg.base_path = path.trim().to_string();
        }
        if let Some(size) = self.page_size {
            cfg.release_page_size = size;
            cfg.nzb_page_size = size;
        }
        if let Some(dir) = &self.output {
            cfg.download_dir.clone_from(dir);
        }
    }

    /// What: Resolve the effective configuration for this invocation.
    ///
    /// Details:
    /// - `--config FILE` replaces the default file; the environment and flags still apply.
    #[must_use]
    pub fn resolve_config(&self) -> ConsoleConfig {
        let mut cfg = match &self.config {
            Some(path) => {
                let mut cfg = ConsoleConfig::load_from(path);
                cfg.apply_env(|k| std::env::var(k).ok());
                cfg
            }
            None => ConsoleConfig::load(),
        };
        self.apply_to(&mut cfg);
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Flags win over file and environment values.
    ///
    /// Inputs:
    /// - Config with file values; args with URL, path, page size and output.
    ///
    /// Output:
    /// - Every flag applied; unspecified values untouched.
    fn flags_override_config() {
        let mut cfg = ConsoleConfig {
            base_url: "http://file:1".into(),
            base_path: "/file".into(),
            ..ConsoleConfig::default()
        };
        let args = Args::parse_from([
            "tricera-console",
            "--base-url",
            "http://cli:3",
            "--base-path",
            "",
            "--page-size",
            "7",
            "--output",
            "/tmp/out",
        ]);
        args.apply_to(&mut cfg);
        assert_eq!(cfg.base_url, "http://cli:3");
        assert_eq!(cfg.base_path, "");
        assert_eq!(cfg.release_page_size.get(), 7);
        assert_eq!(cfg.nzb_page_size.get(), 7);
        assert_eq!(cfg.download_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn oneshot_detection() {
        assert!(!Args::parse_from(["tricera-console"]).is_oneshot());
        assert!(!Args::parse_from(["tricera-console", "-v", "--page", "2"]).is_oneshot());
        assert!(Args::parse_from(["tricera-console", "--nzbs"]).is_oneshot());
        assert!(Args::parse_from(["tricera-console", "--download", "k"]).is_oneshot());
    }
}
