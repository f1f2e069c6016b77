use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::helpers::{palette, status_span, truncate_to_width};
use crate::logic::{SettingsController, SettingsField};
use crate::state::AppState;

/// What: Display value of one settings row.
///
/// Details:
/// - The password row never shows typed characters, only one `*` per character.
fn field_value(settings: &SettingsController, field: SettingsField) -> String {
    let form = settings.form();
    let check = |on: bool| if on { "[x]" } else { "[ ]" }.to_string();
    match field {
        SettingsField::Host => form.host.clone(),
        SettingsField::Port => form.port.clone(),
        SettingsField::Ssl => check(form.ssl),
        SettingsField::User => form.user.clone(),
        SettingsField::Password => "*".repeat(settings.secret_len()),
        SettingsField::ClearPassword => check(settings.clear_secret()),
        SettingsField::Lookback => form.lookback.clone(),
        SettingsField::Groups => form.groups.clone(),
        SettingsField::SchedulerInterval => form.scheduler_interval.clone(),
        SettingsField::SaveNzbs => check(form.save_nzbs),
        SettingsField::NzbDir => form.nzb_dir.clone(),
    }
}

/// Draw the settings form, password status and inline sync status.
pub fn render_settings(f: &mut Frame, app: &AppState, area: Rect) {
    let p = palette();
    let value_width = usize::from(area.width.saturating_sub(30));
    let mut lines: Vec<Line> = SettingsField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == app.settings_cursor;
            let marker = if selected { "> " } else { "  " };
            let label_style = if selected {
                Style::default().fg(p.sapphire).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(p.subtext0)
            };
            let value = truncate_to_width(&field_value(&app.settings, *field), value_width);
            let mut value_style = Style::default().fg(p.text);
            if selected {
                value_style = value_style.bg(p.surface1);
            }
            Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{:<24}", field.label()), label_style),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        app.settings.password_status().label(),
        Style::default().fg(p.yellow),
    )));
    if app.settings.is_submitting() {
        lines.push(Line::from(Span::styled(
            "Saving...",
            Style::default().fg(p.subtext0),
        )));
    } else if let Some(status) = app.settings.status() {
        lines.push(Line::from(status_span(status)));
    }

    let block = Block::default()
        .title(Span::styled(
            " Settings ",
            Style::default().fg(p.mauve).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(p.overlay1));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_row_is_masked() {
        let mut settings = SettingsController::new();
        settings.set_secret_input("hunter2");
        assert_eq!(field_value(&settings, SettingsField::Password), "*******");
        assert_eq!(field_value(&settings, SettingsField::SaveNzbs), "[x]");
        assert_eq!(field_value(&settings, SettingsField::Ssl), "[ ]");
    }
}
