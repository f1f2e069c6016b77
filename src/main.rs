//! TriceraPost console binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;
use tricera_console::{app, args, config};

struct ConsoleTimer;

impl tracing_subscriber::fmt::time::FormatTime for ConsoleTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%d-T %H:%M:%S")
            .to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the log filter.
///
/// Details:
/// - `RUST_LOG` wins; otherwise the level from `--log-level` / `--verbose` applies.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// What: Initialize tracing to `<config>/logs/tricera-console.log`, falling back to stderr.
///
/// Details:
/// - The TUI owns the terminal, so the file sink is preferred; stderr is only used when the
///   log file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = config::paths::logs_dir();
    log_path.push("tricera-console.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(ConsoleTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(ConsoleTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let cfg = args.resolve_config();
    tracing::info!(
        base_url = %cfg.base_url,
        base_path = %cfg.base_path,
        oneshot = args.is_oneshot(),
        "TriceraPost console starting"
    );

    if args.is_oneshot() {
        let code = args::run_oneshot(&args, &cfg).await;
        tracing::info!(code, "one-shot command finished");
        std::process::exit(code);
    }

    if let Err(err) = app::run(cfg).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("tricera-console: {err}");
        std::process::exit(1);
    }
    tracing::info!("TriceraPost console exited");
}

#[cfg(test)]
mod tests {
    /// What: `FormatTime` impl writes a non-empty timestamp without panicking.
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives a `YYYY-MM-DD-T HH:MM:SS` stamp
    #[test]
    fn console_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::ConsoleTimer;
        let _ = t.format_time(&mut writer);
        assert_eq!(buf.len(), 21);
        assert!(buf.contains("-T "));
    }

    #[test]
    fn explicit_level_used_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_none() {
            let filter = super::env_filter("warn");
            assert_eq!(filter.to_string(), "warn");
        }
    }
}
