//! Error banner component renderer.

use crate::ui::helpers::{display_width, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BannerInfo;

/// Renders the fetch error banner as a single full-width line.
///
/// The hint is right-aligned; the message is truncated first when the line
/// is too narrow for both.
pub fn render_banner(row: usize, banner: &BannerInfo, theme: &Theme, cols: usize) -> usize {
    let hint = format!(" {} ", banner.hint);
    let hint_len = display_width(&hint).min(cols);
    let message_width = cols.saturating_sub(hint_len);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{}", Theme::bg(&theme.colors.error_bg));
    print!("{}", fit(&format!(" ✗ {}", banner.message), message_width));
    print!("{}", fit(&hint, hint_len));
    print!("{}", Theme::reset());

    row + 1
}
