//! Terminal rendering of the console.
//!
//! `ui` lays out a tab header, the active tab body and a footer with key hints, then draws any
//! open modal on top.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs},
};

use crate::state::{AppState, Tab};

mod collections;
pub mod helpers;
mod modals;
mod settings;
mod status;

use helpers::{palette, status_span, truncate_to_width};

/// Draw the whole console for one frame.
pub fn ui(f: &mut Frame, app: &AppState) {
    let p = palette();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(p.base)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    match app.tab {
        Tab::Status => status::render_status(f, app, chunks[1]),
        Tab::Settings => settings::render_settings(f, app, chunks[1]),
        Tab::Releases => collections::render_collection(
            f,
            chunks[1],
            "Releases",
            &app.releases,
            app.releases_selected,
            app.admin.status(),
        ),
        Tab::Nzbs => collections::render_collection(
            f,
            chunks[1],
            "NZBs",
            &app.nzbs,
            app.nzbs_selected,
            app.download_status.as_ref().or_else(|| app.admin.status()),
        ),
    }
    render_footer(f, app, chunks[2]);
    modals::render_modal(f, area, &app.modal);
}

/// Tab strip on the left, API endpoint on the right.
fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let p = palette();
    let endpoint_w = u16::try_from(app.endpoint_label.chars().count() + 2)
        .unwrap_or(u16::MAX)
        .min(area.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(endpoint_w)])
        .split(area);

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(p.subtext0))
        .highlight_style(Style::default().fg(p.mauve).add_modifier(Modifier::BOLD))
        .divider(Span::styled("│", Style::default().fg(p.overlay1)));
    f.render_widget(tabs, chunks[0]);

    let label = truncate_to_width(&app.endpoint_label, usize::from(endpoint_w));
    f.render_widget(
        Paragraph::new(Span::styled(label, Style::default().fg(p.overlay1))),
        chunks[1],
    );
}

/// Key hints for the active tab.
const fn hints(tab: Tab) -> &'static str {
    match tab {
        Tab::Status => "r refresh  a save all  x clear db  ? help  q quit",
        Tab::Settings => "↑↓ field  Space toggle  Ctrl+S save  F5 reload  F1 help",
        Tab::Releases => "←→ page  ↑↓ select  r refresh  ? help  q quit",
        Tab::Nzbs => "←→ page  ↑↓ select  d download  a save all  ? help  q quit",
    }
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let p = palette();
    let mut spans = vec![Span::styled(hints(app.tab), Style::default().fg(p.overlay1))];
    if let Some(action) = app.admin.in_flight() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{}...", action.title()),
            Style::default().fg(p.yellow),
        ));
    } else if app.tab == Tab::Status
        && let Some(status) = app.admin.status()
        && status.is_error()
    {
        spans.push(Span::raw("  "));
        spans.push(status_span(status));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
