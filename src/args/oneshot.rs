//! One-shot command-line host: run the requested actions against the service, print, exit.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::args::Args;
use crate::config::ConsoleConfig;
use crate::logic::{
    AdminAction, AdminHandler, CollectionStore, ResultItem, ScanStatusPanel, SettingsController,
    SettingsField, download_to,
};
use crate::sources::ApiClient;
use crate::state::types::{GeneratedFile, Release, StatusLine};

/// Operator interaction needed by one-shot actions.
pub trait Prompter {
    /// Ask a yes/no question; `true` means yes.
    fn confirm(&mut self, question: &str) -> bool;
    /// Read a secret without echo.
    ///
    /// # Errors
    /// - Terminal read failures.
    fn secret(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompts on the controlling terminal; `--yes` answers confirmations up front.
pub struct TerminalPrompter {
    /// Skip confirmation prompts.
    pub assume_yes: bool,
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{question} [y/N] ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn secret(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

/// What: Run every requested one-shot action and report an exit code.
///
/// Inputs:
/// - `args`: Parsed flags.
/// - `cfg`: Resolved configuration.
///
/// Output:
/// - `0` when every action succeeded, `1` otherwise.
pub async fn run_oneshot(args: &Args, cfg: &ConsoleConfig) -> i32 {
    let api = match ApiClient::from_config(cfg) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Cannot reach service: {e}");
            return 1;
        }
    };
    let mut prompter = TerminalPrompter {
        assume_yes: args.yes,
    };
    let mut stdout = io::stdout().lock();
    match execute(args, cfg, &api, &mut stdout, &mut prompter).await {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Failed to write output: {e}");
            1
        }
    }
}

/// What: Dispatch the one-shot flags in a fixed order.
///
/// Output:
/// - `Ok(true)` when no action ended in an error status.
///
/// Details:
/// - Order: password changes, admin actions, download, then the read-only listings, so a
///   listing in the same invocation reflects the changes.
///
/// # Errors
/// - Failures writing to `out`.
pub async fn execute<W: Write, P: Prompter>(
    args: &Args,
    cfg: &ConsoleConfig,
    api: &ApiClient,
    out: &mut W,
    prompter: &mut P,
) -> io::Result<bool> {
    let mut ok = true;
    if args.set_password || args.clear_password {
        ok &= change_password(api, args.set_password, out, prompter).await?;
    }
    if args.save_all {
        ok &= admin_action(api, AdminAction::SaveAllNzbs, out, prompter).await?;
    }
    if args.clear_db {
        ok &= admin_action(api, AdminAction::ClearDatabase, out, prompter).await?;
    }
    if let Some(key) = &args.download {
        let status = download_to(api, &cfg.download_dir, key).await;
        ok &= print_status_line(out, &status)?;
    }
    if args.show_settings {
        let mut ctl = SettingsController::new();
        ctl.load(api).await;
        ok &= print_settings(out, &ctl)?;
    }
    if args.status {
        let mut panel = ScanStatusPanel::default();
        panel.load(api).await;
        ok &= print_scan_status(out, &panel)?;
    }
    if args.releases {
        let mut store: CollectionStore<Release> = CollectionStore::new(cfg.release_page_size);
        store.load(api).await;
        store.goto(args.page);
        ok &= print_collection(out, &store)?;
    }
    if args.nzbs {
        let mut store: CollectionStore<GeneratedFile> = CollectionStore::new(cfg.nzb_page_size);
        store.load(api).await;
        store.goto(args.page);
        ok &= print_collection(out, &store)?;
    }
    Ok(ok)
}

/// What: Set or clear the stored NNTP password.
///
/// Details:
/// - Settings are loaded first so the update carries the server's current values for every
///   other field; a failed load aborts without sending anything.
async fn change_password<W: Write, P: Prompter>(
    api: &ApiClient,
    set: bool,
    out: &mut W,
    prompter: &mut P,
) -> io::Result<bool> {
    let mut ctl = SettingsController::new();
    ctl.load(api).await;
    if let Some(status) = ctl.status() {
        return print_status_line(out, status);
    }
    if set {
        let secret = zeroize::Zeroizing::new(prompter.secret("New NNTP password: ")?);
        if secret.is_empty() {
            writeln!(out, "Empty password; nothing changed.")?;
            return Ok(false);
        }
        ctl.set_secret_input(&secret);
    } else {
        ctl.set_clear_secret(true);
    }
    let saved = ctl.submit(api).await;
    if let Some(status) = ctl.status() {
        print_status_line(out, status)?;
    }
    if saved {
        writeln!(out, "{}", ctl.password_status().label())?;
    }
    Ok(saved)
}

async fn admin_action<W: Write, P: Prompter>(
    api: &ApiClient,
    action: AdminAction,
    out: &mut W,
    prompter: &mut P,
) -> io::Result<bool> {
    let mut admin = AdminHandler::new();
    admin.request(action);
    let accepted = prompter.confirm(action.prompt());
    if !accepted {
        info!(?action, "declined on the command line");
        writeln!(out, "{}: cancelled.", action.title())?;
        return Ok(true);
    }
    admin.run_confirmed(api, true).await;
    match admin.status() {
        Some(status) => print_status_line(out, status),
        None => Ok(true),
    }
}

/// Print a status line; `Ok(false)` for error tone.
fn print_status_line<W: Write>(out: &mut W, status: &StatusLine) -> io::Result<bool> {
    if status.is_error() {
        warn!(status = %status.text, "one-shot action failed");
        writeln!(out, "error: {}", status.text)?;
        Ok(false)
    } else {
        writeln!(out, "{}", status.text)?;
        Ok(true)
    }
}

/// What: Print the settings form; the password is only ever reported as stored or not.
fn print_settings<W: Write>(out: &mut W, ctl: &SettingsController) -> io::Result<bool> {
    if let Some(status) = ctl.status() {
        return print_status_line(out, status);
    }
    let form = ctl.form();
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    for field in SettingsField::ALL {
        let value = match field {
            SettingsField::Host => form.host.clone(),
            SettingsField::Port => form.port.clone(),
            SettingsField::Ssl => yes_no(form.ssl).to_string(),
            SettingsField::User => form.user.clone(),
            SettingsField::Password => ctl.password_status().label().to_string(),
            SettingsField::ClearPassword => continue,
            SettingsField::Lookback => form.lookback.clone(),
            SettingsField::Groups => form.groups.clone(),
            SettingsField::SchedulerInterval => form.scheduler_interval.clone(),
            SettingsField::SaveNzbs => yes_no(form.save_nzbs).to_string(),
            SettingsField::NzbDir => form.nzb_dir.clone(),
        };
        writeln!(out, "{:<22} {value}", format!("{}:", field.label()))?;
    }
    Ok(true)
}

fn print_scan_status<W: Write>(out: &mut W, panel: &ScanStatusPanel) -> io::Result<bool> {
    for (label, value) in panel.metrics() {
        writeln!(out, "{:<16} {value}", format!("{label}:"))?;
    }
    match panel.footer() {
        Some(footer) => print_status_line(out, footer),
        None => Ok(true),
    }
}

/// What: Print the current page of a collection as numbered cards.
fn print_collection<W: Write, T: ResultItem>(
    out: &mut W,
    store: &CollectionStore<T>,
) -> io::Result<bool> {
    let view = store.view();
    let ok = match &view.status {
        Some(status) => print_status_line(out, status)?,
        None => true,
    };
    let start = store.page().start_index();
    for (i, card) in view.cards.iter().enumerate() {
        let marker = if card.highlighted { "*" } else { " " };
        writeln!(out, "{marker}{:>4}. {}", start + i + 1, card.title)?;
        if !card.badges.is_empty() {
            writeln!(out, "       [{}]", card.badges.join("] ["))?;
        }
        for line in &card.lines {
            writeln!(out, "       {line}")?;
        }
        if let Some(key) = &card.download_key {
            writeln!(out, "       key: {key}")?;
        }
    }
    writeln!(out, "{}", view.indicator.label)?;
    Ok(ok)
}
