//! Composable UI component renderers.
//!
//! Each component is responsible for rendering a specific part of the
//! interface and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar and status line
//! - [`banner`]: Dismissible fetch error line
//! - [`search`]: Search input box (border, query text)
//! - [`table`]: Country table and page position line
//! - [`empty`]: Loading / no results message
//! - [`details`]: Details panel with the note editor
//! - [`footer`]: Keybinding hints
//!
//! # Layout Modes
//!
//! - [`render_normal_mode`]: Header + Banner + Table + Pagination + Footer
//! - [`render_search_mode`]: Header + Banner + `SearchBar` + Table + Pagination + Footer
//! - [`render_details_mode`]: Header + Banner + Details + Footer

mod banner;
mod details;
mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailsView, SearchBarInfo, UIViewModel};

use banner::render_banner;
use details::render_details;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_pagination, render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Header, separator and (if present) the error banner. Returns the next row.
fn render_top(vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(banner) = &vm.banner {
        current_row = render_banner(current_row, banner, theme, cols);
    }
    current_row
}

/// Table or empty state, then the page line, border and footer on the last
/// three rows.
fn render_listing(start_row: usize, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.max(1);
    let border_row = footer_start.saturating_sub(1);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(start_row, empty, theme, cols);
    } else {
        let current_row = render_table_headers(start_row, theme, cols);
        render_table_rows(current_row, &vm.display_items, theme, cols);
        render_pagination(border_row.saturating_sub(1), &vm.pagination, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Renders the normal mode layout (no search bar).
///
/// ```text
/// [blank line]
/// [Header: title + status]
/// [Border]
/// [Banner, if any]
/// [Table Headers]
/// [Table Rows]
/// [Blank padding to fill screen]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
pub fn render_normal_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_top(vm, theme, cols);
    render_listing(current_row, vm, theme, cols, rows);
}

/// Renders the search mode layout: the normal layout with the 3-line search
/// box between the banner and the table.
pub fn render_search_mode(vm: &UIViewModel, search: &SearchBarInfo, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_top(vm, theme, cols);
    current_row = render_search_bar(current_row, search, theme, cols);
    render_listing(current_row, vm, theme, cols, rows);
}

/// Renders the details panel in place of the table.
pub fn render_details_mode(vm: &UIViewModel, details: &DetailsView, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_top(vm, theme, cols);
    render_details(current_row, details, theme, cols);

    let footer_start = rows.max(1);
    render_border(footer_start.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
