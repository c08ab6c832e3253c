//! Shared rendering utilities and helpers.
//!
//! Low-level rendering utilities used across multiple UI components: cursor
//! positioning, character-aware truncation and match highlighting.
//!
//! All widths here are terminal columns, measured with `unicode-width`.
//! Country names are full of non-ASCII letters ("Côte d'Ivoire") and notes
//! are free text, so neither bytes nor chars line up with the screen.

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Widest the NAME column gets.
pub const NAME_COLUMN_MAX: usize = 36;

/// Narrowest the NAME column gets.
pub const NAME_COLUMN_MIN: usize = 12;

/// Characters used by every table column except NAME, separators included.
pub const FIXED_COLUMNS_WIDTH: usize = 46;

/// Width of the NAME column for a terminal `cols` wide.
#[must_use]
pub fn name_column_width(cols: usize) -> usize {
    cols.saturating_sub(FIXED_COLUMNS_WIDTH)
        .clamp(NAME_COLUMN_MIN, NAME_COLUMN_MAX)
}

/// Number of terminal columns `text` occupies.
///
/// Wide characters (CJK, most emoji) take two columns, combining marks none.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Longest prefix of `text` that fits in `max` columns.
fn prefix_within(text: &str, max: usize) -> (&str, usize) {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = char_width(ch);
        if used + w > max {
            return (&text[..idx], used);
        }
        used += w;
    }
    (text, used)
}

/// Shortens `text` to at most `max` columns, ending in `...` when cut.
///
/// # Examples
///
/// ```
/// use zatlas::ui::helpers::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Japan", 10), "Japan");
/// assert_eq!(truncate_to_width("Côte d'Ivoire", 8), "Côte ...");
/// assert_eq!(truncate_to_width("日本国", 5), "日...");
/// ```
#[must_use]
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return prefix_within(text, max).0.to_string();
    }
    let (head, _) = prefix_within(text, max - 3);
    format!("{head}...")
}

/// Longest suffix of `text` that fits in `max` columns.
///
/// Used by input boxes to keep the cursor end of the text in view.
#[must_use]
pub fn tail_within(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        let w = char_width(ch);
        if used + w > max {
            return &text[idx + ch.len_utf8()..];
        }
        used += w;
    }
    text
}

/// Pads `text` with spaces to `width` columns, truncating if wider.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let used = display_width(&truncated);
    format!("{truncated}{}", " ".repeat(width.saturating_sub(used)))
}

/// Right-aligns `text` in `width` columns, truncating if wider.
#[must_use]
pub fn fit_right(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let used = display_width(&truncated);
    format!("{}{truncated}", " ".repeat(width.saturating_sub(used)))
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges use character indices `(start, end)` with exclusive end. Ranges
/// that fall outside `text` are ignored. When `is_selected` is `true`, match
/// highlighting is skipped so the selection colors stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
