//! Table component renderer.
//!
//! This module renders the current page of countries as a table with
//! favourite, NAME, REGION, CAPITAL, POPULATION and note columns. It supports
//! selection highlighting and search match highlighting.

use crate::ui::helpers::{self, fit, fit_right, name_column_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, PaginationInfo};

const REGION_WIDTH: usize = 10;
const CAPITAL_WIDTH: usize = 16;
const POPULATION_WIDTH: usize = 13;

/// Renders the table column headers at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
///   NAME                                 REGION     CAPITAL             POPULATION
/// ```
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "  {} {} {} {}",
        fit("NAME", name_column_width(cols)),
        fit("REGION", REGION_WIDTH),
        fit("CAPITAL", CAPITAL_WIDTH),
        fit_right("POPULATION", POPULATION_WIDTH),
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single table row at the specified row position.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Search match highlights (unless selected)
/// 3. Favourite star and note marker in `favorite_fg`
/// 4. Normal text color
///
/// The row is padded to fill the entire terminal width to ensure consistent
/// selection background rendering.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let name_width = name_column_width(cols);
    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    position_cursor(row, 1);
    print!("{}", Theme::fg(base_fg));
    if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    if item.is_favorite {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.favorite_fg));
        }
        print!("★ ");
        print!("{}", Theme::fg(base_fg));
    } else {
        print!("  ");
    }

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    let name_len = helpers::display_width(&item.name);
    print!("{} ", " ".repeat(name_width.saturating_sub(name_len)));

    print!("{} ", fit(&item.region, REGION_WIDTH));
    print!("{} ", fit(&item.capital, CAPITAL_WIDTH));
    print!("{}", fit_right(&item.population, POPULATION_WIDTH));

    if item.has_note {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.favorite_fg));
        }
        print!(" ✎");
    } else {
        print!("  ");
    }

    let line_len = 2 + name_width + 1 + REGION_WIDTH + 1 + CAPITAL_WIDTH + 1 + POPULATION_WIDTH + 2;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the page position line, e.g. `‹ Page 2 of 13 ›  (248 countries)`.
///
/// Arrows are dimmed on the first and last page.
pub fn render_pagination(row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let has_prev = info.page > 1;
    let has_next = info.page < info.page_count;
    let noun = if info.total == 1 { "country" } else { "countries" };
    let text = format!("Page {} of {}  ({} {noun})", info.page, info.page_count, info.total);
    let line_len = helpers::display_width(&text) + 4;
    let padding = cols.saturating_sub(line_len) / 2;

    let arrow = |enabled: bool| {
        if enabled {
            Theme::fg(&theme.colors.header_fg)
        } else {
            Theme::fg(&theme.colors.border)
        }
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{}‹ ", arrow(has_prev));
    print!("{}{text}", Theme::fg(&theme.colors.text_dim));
    print!("{} ›", arrow(has_next));
    print!("{}", " ".repeat(cols.saturating_sub(padding + line_len)));
    print!("{}", Theme::reset());
    row + 1
}
