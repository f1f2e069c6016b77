//! Settings form editing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic::dispatch::request_settings_submit;
use crate::logic::{Request, SettingsField};
use crate::state::AppState;

/// Field under the cursor.
#[must_use]
pub fn current_field(app: &AppState) -> SettingsField {
    SettingsField::ALL[app.settings_cursor.min(SettingsField::ALL.len() - 1)]
}

/// What: Handle a key on the Settings tab.
///
/// Details:
/// - Up/Down move between fields; printable keys edit the text field under the cursor.
/// - Space toggles checkboxes; Enter toggles them or submits from a text field.
/// - Ctrl+S submits from anywhere.
/// - The password field only ever shows a mask.
pub fn handle_settings_key(
    ke: &KeyEvent,
    app: &mut AppState,
    req_tx: &mpsc::UnboundedSender<Request>,
) {
    let field = current_field(app);
    let ctrl = ke.modifiers.contains(KeyModifiers::CONTROL);
    match ke.code {
        KeyCode::Char('s') if ctrl => request_settings_submit(app, req_tx),
        KeyCode::Up => app.settings_cursor = app.settings_cursor.saturating_sub(1),
        KeyCode::Down => {
            app.settings_cursor = (app.settings_cursor + 1).min(SettingsField::ALL.len() - 1);
        }
        KeyCode::Enter if !field.is_toggle() => request_settings_submit(app, req_tx),
        KeyCode::Enter | KeyCode::Char(' ') if field.is_toggle() => toggle(app, field),
        KeyCode::Backspace => edit_text(app, field, None),
        KeyCode::Char(c) if !ctrl => edit_text(app, field, Some(c)),
        _ => {}
    }
}

fn toggle(app: &mut AppState, field: SettingsField) {
    match field {
        SettingsField::Ssl => app.settings.form_mut().ssl ^= true,
        SettingsField::SaveNzbs => app.settings.form_mut().save_nzbs ^= true,
        SettingsField::ClearPassword => {
            let clear = app.settings.clear_secret();
            app.settings.set_clear_secret(!clear);
        }
        _ => {}
    }
}

/// Append `c` to the field, or delete the last character when `c` is `None`.
fn edit_text(app: &mut AppState, field: SettingsField, c: Option<char>) {
    if field == SettingsField::Password {
        match c {
            Some(c) => app.settings.push_secret_char(c),
            None => app.settings.pop_secret_char(),
        }
        return;
    }
    let form = app.settings.form_mut();
    let target = match field {
        SettingsField::Host => &mut form.host,
        SettingsField::Port => &mut form.port,
        SettingsField::User => &mut form.user,
        SettingsField::Lookback => &mut form.lookback,
        SettingsField::Groups => &mut form.groups,
        SettingsField::SchedulerInterval => &mut form.scheduler_interval,
        SettingsField::NzbDir => &mut form.nzb_dir,
        SettingsField::Ssl
        | SettingsField::Password
        | SettingsField::ClearPassword
        | SettingsField::SaveNzbs => return,
    };
    match c {
        Some(c) => target.push(c),
        None => {
            target.pop();
        }
    }
}
