use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
};

use super::helpers::{palette, status_span};
use crate::state::AppState;

/// What: Draw the scan counters table and its footer.
///
/// Details:
/// - Missing counters render as `-`; the admin status (if any) sits under the footer.
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let p = palette();
    let rows: Vec<Row> = app
        .scan
        .metrics()
        .into_iter()
        .map(|(label, value)| {
            Row::new(vec![
                Cell::from(Span::styled(label, Style::default().fg(p.subtext0))),
                Cell::from(Span::styled(
                    value,
                    Style::default().fg(p.text).add_modifier(Modifier::BOLD),
                )),
            ])
        })
        .collect();

    let mut footer: Vec<Line> = Vec::new();
    if let Some(line) = app.scan.footer() {
        footer.push(Line::from(status_span(line)));
    }
    if let Some(line) = app.admin.status() {
        footer.push(Line::from(status_span(line)));
    }
    let footer_h = u16::try_from(footer.len()).unwrap_or(2);

    let block = Block::default()
        .title(Span::styled(
            " Scan status ",
            Style::default().fg(p.mauve).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(p.overlay1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(footer_h)])
        .split(inner);
    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(4)]).column_spacing(2);
    f.render_widget(table, chunks[0]);
    f.render_widget(Paragraph::new(footer), chunks[1]);
}
