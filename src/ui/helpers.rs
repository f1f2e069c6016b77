//! Shared rendering helpers: palette, status styling, truncation and overlay geometry.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::{StatusLine, StatusTone};

/// Console colour palette (Catppuccin Mocha).
#[derive(Clone, Copy)]
pub struct Palette {
    /// Canvas background.
    pub base: Color,
    /// Panel background.
    pub mantle: Color,
    /// Selected row background.
    pub surface1: Color,
    /// Borders and hints.
    pub overlay1: Color,
    /// Body text.
    pub text: Color,
    /// Secondary text.
    pub subtext0: Color,
    /// Interactive accent.
    pub sapphire: Color,
    /// Headings.
    pub mauve: Color,
    /// Success.
    pub green: Color,
    /// Attention.
    pub yellow: Color,
    /// Errors.
    pub red: Color,
}

/// The palette every view draws with.
#[must_use]
pub const fn palette() -> Palette {
    Palette {
        base: Color::Rgb(0x1e, 0x1e, 0x2e),
        mantle: Color::Rgb(0x18, 0x18, 0x25),
        surface1: Color::Rgb(0x45, 0x47, 0x5a),
        overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
        text: Color::Rgb(0xcd, 0xd6, 0xf4),
        subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
        sapphire: Color::Rgb(0x74, 0xc7, 0xec),
        mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
        green: Color::Rgb(0xa6, 0xe3, 0xa1),
        yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
        red: Color::Rgb(0xf3, 0x8b, 0xa8),
    }
}

/// Style for a status line of the given tone.
#[must_use]
pub fn tone_style(tone: StatusTone) -> Style {
    let p = palette();
    match tone {
        StatusTone::Neutral => Style::default().fg(p.subtext0),
        StatusTone::Error => Style::default().fg(p.red).add_modifier(Modifier::BOLD),
    }
}

/// Render a status line as a single styled span.
#[must_use]
pub fn status_span(status: &StatusLine) -> Span<'static> {
    Span::styled(status.text.clone(), tone_style(status.tone))
}

/// What: Cut `text` so it occupies at most `max` terminal columns.
///
/// Inputs:
/// - `text`: Source string.
/// - `max`: Column budget.
///
/// Output:
/// - The original text when it fits, otherwise a prefix ending in `…`.
///
/// Details:
/// - Width is measured with `unicode-width`, so wide glyphs count as two columns.
#[must_use]
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Rectangle of at most `w` x `h` centred in `area`.
#[must_use]
pub fn centered_rect(area: Rect, w: u16, h: u16) -> Rect {
    let width = w.min(area.width);
    let height = h.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Truncation respects display width, including wide characters.
    ///
    /// Inputs:
    /// - ASCII and CJK strings against small budgets.
    ///
    /// Output:
    /// - Short strings untouched; long ones end with an ellipsis within budget.
    fn truncation_counts_columns() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        let cut = truncate_to_width("日本語テキスト", 6);
        assert!(UnicodeWidthStr::width(cut.as_str()) <= 6);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        let r = centered_rect(area, 10, 4);
        assert_eq!(r, Rect::new(5, 3, 10, 4));
        let big = centered_rect(area, 50, 50);
        assert_eq!(big, area);
    }
}
