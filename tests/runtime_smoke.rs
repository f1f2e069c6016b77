#![cfg(test)]
// End-to-end runtime smoke test (headless)
// - Starts tricera_console::app::run in the background against an address nothing listens on.
// - Runs with TRICERA_TEST_HEADLESS=1 to bypass raw TTY setup/restore.
// - Waits briefly to allow initialization, the initial loads and a render cycle.
// - If still running after the wait, aborts the task and asserts the join was a clean cancel.

use std::time::Duration;

use tricera_console::config::ConsoleConfig;

#[tokio::test(flavor = "multi_thread")]
async fn runtime_smoke_headless_initializes_and_runs_without_panic() {
    unsafe {
        std::env::set_var("TRICERA_TEST_HEADLESS", "1");
    }

    let cfg = ConsoleConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout_secs: 1,
        request_timeout_secs: 1,
        download_dir: std::env::temp_dir().join("tricera-console-smoke"),
        ..ConsoleConfig::default()
    };
    let handle = tokio::spawn(async move { tricera_console::app::run(cfg).await });

    tokio::time::sleep(Duration::from_millis(50)).await;

    if handle.is_finished() {
        match handle.await {
            Ok(run_result) => {
                if let Err(e) = run_result {
                    panic!("app::run returned error early: {e:?}");
                }
                return;
            }
            Err(join_err) => panic!("app::run task panicked: {join_err}"),
        }
    }

    handle.abort();
    match handle.await {
        Ok(run_result) => {
            if let Err(e) = run_result {
                panic!("app::run completed with error on abort race: {e:?}");
            }
        }
        Err(join_err) => {
            assert!(
                join_err.is_cancelled(),
                "app::run join error should be cancellation, got: {join_err}"
            );
        }
    }
}
