use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::helpers::{centered_rect, palette};
use crate::logic::AdminAction;
use crate::state::Modal;

/// Key reference shown by the help overlay.
const HELP_LINES: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Switch tab"),
    ("F5 / Ctrl+R", "Refresh current tab"),
    ("Up / Down", "Move selection or form cursor"),
    ("Left / Right", "Previous / next page"),
    ("d / Enter", "Download selected NZB"),
    ("a", "Save all NZBs"),
    ("x", "Clear database"),
    ("Ctrl+S", "Save settings"),
    ("Space", "Toggle checkbox"),
    ("q / Ctrl+Q", "Quit"),
];

/// Draw the open modal, if any, over `area`.
pub fn render_modal(f: &mut Frame, area: Rect, modal: &Modal) {
    match modal {
        Modal::None => {}
        Modal::Alert { message } => render_alert(f, area, message),
        Modal::Confirm(action) => render_confirm(f, area, *action),
        Modal::Help => render_help(f, area),
    }
}

fn boxed(title: &str, accent: ratatui::style::Color) -> Block<'static> {
    let p = palette();
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(p.mantle))
}

/// What: Confirmation dialog for an administrative action.
///
/// Details:
/// - Clearing the database uses the error colour since it cannot be undone.
fn render_confirm(f: &mut Frame, area: Rect, action: AdminAction) {
    let p = palette();
    let accent = match action {
        AdminAction::ClearDatabase => p.red,
        AdminAction::SaveAllNzbs => p.yellow,
    };
    let rect = centered_rect(area, area.width.saturating_sub(10).min(64), 7);
    f.render_widget(Clear, rect);
    let lines = vec![
        Line::from(Span::styled(action.prompt(), Style::default().fg(p.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(p.green).add_modifier(Modifier::BOLD)),
            Span::styled(" confirm   ", Style::default().fg(p.subtext0)),
            Span::styled("[n]", Style::default().fg(p.red).add_modifier(Modifier::BOLD)),
            Span::styled(" cancel", Style::default().fg(p.subtext0)),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(boxed(action.title(), accent)),
        rect,
    );
}

fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    let p = palette();
    let rect = centered_rect(area, area.width.saturating_sub(10).min(70), 7);
    f.render_widget(Clear, rect);
    let lines = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(p.text))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc to close",
            Style::default().fg(p.overlay1),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(boxed("Notice", p.red)),
        rect,
    );
}

fn render_help(f: &mut Frame, area: Rect) {
    let p = palette();
    let height = u16::try_from(HELP_LINES.len() + 2).unwrap_or(u16::MAX);
    let rect = centered_rect(area, area.width.saturating_sub(10).min(56), height);
    f.render_widget(Clear, rect);
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{keys:<18}"),
                    Style::default().fg(p.sapphire).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*what, Style::default().fg(p.text)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(boxed("Keys", p.mauve)), rect);
}
