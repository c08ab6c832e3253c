//! View model types representing renderable UI state.
//!
//! View models are computed from application state via
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready data: formatted populations, favourite
//! markers, pre-computed highlight ranges and page numbers.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Rows of the current page that fit on screen.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Fetch error banner, unless dismissed.
    pub banner: Option<BannerInfo>,

    /// Page position below the table.
    pub pagination: PaginationInfo,

    /// Shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Details panel for the open country.
    pub details: Option<DetailsView>,
}

/// Display information for one country row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Official name, truncated to the name column.
    pub name: String,

    pub region: String,

    /// First capital, or empty.
    pub capital: String,

    /// Population with thousands separators.
    pub population: String,

    pub is_favorite: bool,

    /// Favourite with a non-empty note.
    pub has_note: bool,

    pub is_selected: bool,

    /// Character ranges of the search match within `name`.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. " Countries (45) ".
    pub title: String,

    /// Status line under the title: region filter and last update.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Dismissible error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInfo {
    pub message: String,

    /// Recovery hint, e.g. "r: retry  x: dismiss".
    pub hint: String,
}

/// Page position of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: usize,
    pub page_count: usize,

    /// Length of the filtered list across all pages.
    pub total: usize,
}

/// Empty state message display information.
///
/// Shown while loading, before permissions are granted, and when the filters
/// match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No countries found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text typed so far.
    pub query: String,

    /// Whether keystrokes currently go to the search box.
    pub focused: bool,

    /// A typed term is waiting for the quiet period to elapse.
    pub pending: bool,
}

/// Details panel contents for one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub official_name: String,
    pub common_name: String,
    pub region: String,
    pub subregion: String,
    pub capital: String,
    pub population: String,
    pub area: String,
    pub languages: String,
    pub currencies: String,
    pub flag: String,
    pub is_favorite: bool,

    /// Saved note, or the draft while the editor is open.
    pub note: String,

    pub editing_note: bool,
}
