//! Details panel renderer.
//!
//! Shows every field of one country plus its favourite state and note. When
//! the note editor is open the note is drawn in a bordered box with a cursor.

use crate::ui::helpers::{fit, position_cursor, tail_within, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailsView;

const LABEL_WIDTH: usize = 12;
const MARGIN: usize = 4;

/// Renders the details panel starting at `row`.
///
/// # Returns
///
/// The next available row position.
///
/// # Layout
///
/// ```text
///     France
///     French Republic
///
///     Region      Europe · Western Europe
///     Capital     Paris
///     ...
///     ★ Favourite
///     Note        croissants
/// ```
pub fn render_details(row: usize, details: &DetailsView, theme: &Theme, cols: usize) -> usize {
    let value_width = cols.saturating_sub(MARGIN + LABEL_WIDTH + 1);
    let mut current_row = row + 1;

    position_cursor(current_row, 1);
    print!("{}", " ".repeat(MARGIN));
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}", truncate_to_width(&details.common_name, cols.saturating_sub(MARGIN)));
    print!("{}", Theme::reset());
    current_row += 1;

    position_cursor(current_row, 1);
    print!("{}", " ".repeat(MARGIN));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", truncate_to_width(&details.official_name, cols.saturating_sub(MARGIN)));
    print!("{}", Theme::reset());
    current_row += 2;

    let region = format!("{} · {}", details.region, details.subregion);
    let fields = [
        ("Region", region.as_str()),
        ("Capital", details.capital.as_str()),
        ("Population", details.population.as_str()),
        ("Area", details.area.as_str()),
        ("Languages", details.languages.as_str()),
        ("Currencies", details.currencies.as_str()),
        ("Flag", details.flag.as_str()),
    ];
    for (label, value) in fields {
        current_row = render_field(current_row, label, value, theme, value_width);
    }
    current_row += 1;

    position_cursor(current_row, 1);
    print!("{}", " ".repeat(MARGIN));
    if details.is_favorite {
        print!("{}★ Favourite", Theme::fg(&theme.colors.favorite_fg));
    } else {
        print!("{}☆ Not a favourite", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", Theme::reset());
    current_row += 1;

    if details.editing_note {
        render_note_editor(current_row, &details.note, theme, cols)
    } else if details.is_favorite {
        let note = if details.note.is_empty() { "(no note)" } else { details.note.as_str() };
        render_field(current_row, "Note", note, theme, value_width)
    } else {
        current_row
    }
}

fn render_field(row: usize, label: &str, value: &str, theme: &Theme, value_width: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(MARGIN));
    print!("{}{}", Theme::fg(&theme.colors.text_dim), fit(label, LABEL_WIDTH));
    print!(" {}{}", Theme::fg(&theme.colors.text_normal), truncate_to_width(value, value_width));
    print!("{}", Theme::reset());
    row + 1
}

/// The editable line of the note box, exactly `inner_width` columns wide.
///
/// Keeps the end of the draft (where the cursor is) in view.
fn note_line(draft: &str, inner_width: usize) -> String {
    let text = format!(" {draft}▏");
    fit(tail_within(&text, inner_width), inner_width)
}

/// Three-line bordered note box with a trailing cursor.
fn render_note_editor(row: usize, draft: &str, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(MARGIN * 2 + 2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(row, 1);
    print!("{}{border}┌{}┐{}", " ".repeat(MARGIN), "─".repeat(inner_width), Theme::reset());


    position_cursor(row + 1, 1);
    print!("{}{border}│", " ".repeat(MARGIN));
    print!("{}{}", Theme::fg(&theme.colors.text_normal), note_line(draft, inner_width));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}{border}└{}┘{}", " ".repeat(MARGIN), "─".repeat(inner_width), Theme::reset());

    row + 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::display_width;

    #[test]
    fn note_line_fits_the_box_with_wide_characters() {
        let line = note_line("東京で寿司を食べる", 10);
        assert_eq!(display_width(&line), 10);
        assert_eq!(line.trim_end(), "を食べる▏");

        let short = note_line("寿司", 10);
        assert_eq!(short, " 寿司▏    ");
        assert_eq!(display_width(&short), 10);
    }
}
