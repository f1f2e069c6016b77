use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use super::helpers::{Palette, palette, status_span, truncate_to_width};
use crate::logic::{CollectionStore, ItemCard, ResultItem};
use crate::state::StatusLine;

/// Build the list item for one card.
fn card_item(card: &ItemCard, width: usize, p: &Palette) -> ListItem<'static> {
    let title_style = if card.highlighted {
        Style::default().fg(p.green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.text).add_modifier(Modifier::BOLD)
    };
    let mut lines = vec![Line::from(Span::styled(
        truncate_to_width(&card.title, width),
        title_style,
    ))];
    if !card.badges.is_empty() {
        let mut spans = Vec::with_capacity(card.badges.len() * 2);
        for badge in &card.badges {
            spans.push(Span::styled(
                format!("[{badge}]"),
                Style::default().fg(p.sapphire),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    for extra in &card.lines {
        lines.push(Line::from(Span::styled(
            truncate_to_width(extra, width),
            Style::default().fg(p.subtext0),
        )));
    }
    ListItem::new(lines)
}

/// What: Draw one page of a collection with its indicator and status.
///
/// Inputs:
/// - `title`: Panel title.
/// - `store`: Collection to render.
/// - `selected`: Row index within the visible page.
/// - `extra`: Additional status shown under the collection status (download results).
pub fn render_collection<T: ResultItem>(
    f: &mut Frame,
    area: Rect,
    title: &str,
    store: &CollectionStore<T>,
    selected: usize,
    extra: Option<&StatusLine>,
) {
    let p = palette();
    let view = store.view();
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(p.mauve).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(p.overlay1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let width = usize::from(chunks[0].width.saturating_sub(2));
    let items: Vec<ListItem> = view.cards.iter().map(|c| card_item(c, width, &p)).collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(p.surface1))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    if !view.cards.is_empty() {
        state.select(Some(selected.min(view.cards.len() - 1)));
    }
    f.render_stateful_widget(list, chunks[0], &mut state);

    let arrow = |disabled: bool, glyph: &'static str| {
        let fg = if disabled { p.overlay1 } else { p.sapphire };
        Span::styled(glyph, Style::default().fg(fg))
    };
    let mut first = vec![
        arrow(view.indicator.prev_disabled, "◀ "),
        Span::styled(view.indicator.label.clone(), Style::default().fg(p.text)),
        arrow(view.indicator.next_disabled, " ▶"),
    ];
    if let Some(status) = &view.status {
        first.push(Span::raw("   "));
        first.push(status_span(status));
    }
    let mut footer = vec![Line::from(first)];
    if let Some(status) = extra {
        footer.push(Line::from(status_span(status)));
    }
    f.render_widget(Paragraph::new(footer), chunks[1]);
}
