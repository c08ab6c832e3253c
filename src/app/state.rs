//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with methods for filtering, selection management, and UI view model
//! generation. It serves as the single source of truth for all transient UI state.
//!
//! # Architecture
//!
//! `AppState` separates core data (the fetched dataset, the favourites) from
//! derived state (the ordered listing, the region index, the page cursor) to
//! keep state transitions consistent. Derived state is recomputed by
//! [`AppState::refresh_listing`] whenever one of its inputs changes:
//!
//! ```text
//! dataset ─┬─► regions
//!          └─► project(search_term, region_filter) ─► listing ─► clamp(page) ─► clamp(selection)
//! ```
//!
//! Favourites do not feed the pipeline. They are looked up per row when the
//! view model is built, so toggling a favourite never reorders the list.

use super::debounce::Debouncer;
use super::modes::{InputMode, SearchFocus};
use crate::catalog::{distinct_regions, match_range, matches_region, page_count, project, Pagination};
use crate::domain::{format_population, CountryRecord};
use crate::source::{format_age, RemoteDataSource, DEFAULT_ENDPOINT};
use crate::storage::{FavoritesStore, KeyValueStore, MemoryStore};
use crate::ui::helpers::{name_column_width, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BannerInfo, DetailsView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, PaginationInfo,
    SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Central application state container.
///
/// Mutated only by the event handler, one event at a time.
#[derive(Debug)]
pub struct AppState {
    /// Fetch state and the raw dataset.
    pub source: RemoteDataSource,

    /// Favourites and notes, written through to storage on every change.
    pub favorites: FavoritesStore,

    /// Records passing the current filters, in display order.
    pub listing: Vec<CountryRecord>,

    /// Distinct regions of the dataset, in cycle order.
    pub regions: Vec<String>,

    /// Active region filter; `None` shows every region.
    pub region_filter: Option<String>,

    /// Text in the search box, applied after the quiet period.
    pub search_input: String,

    /// Search term the listing is currently filtered by.
    pub search_term: String,

    pub debouncer: Debouncer<String>,

    pub pagination: Pagination,

    /// Zero-based index of the selected row within the current page.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Mode to return to when the details panel closes.
    pub return_mode: InputMode,

    /// Official name of the country shown in the details panel.
    pub open_country: Option<String>,

    /// Note text being edited.
    pub note_draft: String,

    /// Whether the user dismissed the banner for the current fetch error.
    pub error_dismissed: bool,

    /// Host permissions were granted; fetching is possible.
    pub permissions_granted: bool,

    /// Host permissions were denied.
    pub permissions_denied: bool,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Dataset URL.
    pub endpoint: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            FavoritesStore::load(Box::new(MemoryStore::new())),
            Theme::default(),
            DEFAULT_ENDPOINT.to_string(),
            Duration::from_millis(300),
        )
    }
}

impl AppState {
    /// Creates a new application state around an already-loaded favourites store.
    #[must_use]
    pub fn new(favorites: FavoritesStore, theme: Theme, endpoint: String, quiet_period: Duration) -> Self {
        Self {
            source: RemoteDataSource::new(),
            favorites,
            listing: Vec::new(),
            regions: Vec::new(),
            region_filter: None,
            search_input: String::new(),
            search_term: String::new(),
            debouncer: Debouncer::new(quiet_period),
            pagination: Pagination::default(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            return_mode: InputMode::Normal,
            open_country: None,
            note_draft: String::new(),
            error_dismissed: false,
            permissions_granted: false,
            permissions_denied: false,
            theme,
            endpoint,
        }
    }

    /// Replaces the favourites backend, reloading favourites from it.
    pub fn attach_storage(&mut self, backend: Box<dyn KeyValueStore>) {
        if !self.favorites.is_empty() {
            tracing::warn!(
                count = self.favorites.len(),
                "replacing unsaved in-memory favourites with stored ones"
            );
        }
        self.favorites = FavoritesStore::load(backend);
    }

    /// Keeps favourites in memory after the file store failed to open.
    pub fn storage_unavailable(&mut self) {
        tracing::warn!("favourites will not survive a reload");
        self.favorites.mark_degraded();
    }

    /// Recomputes the region index after the dataset changed, then the listing.
    ///
    /// A region filter that no longer exists in the dataset is cleared.
    pub fn apply_dataset(&mut self) {
        self.regions = distinct_regions(self.source.data()).into_iter().collect();

        if let Some(region) = &self.region_filter {
            if !self.regions.contains(region) {
                tracing::debug!(region = %region, "region filter no longer in dataset, clearing");
                self.region_filter = None;
            }
        }

        if let Some(name) = &self.open_country {
            if self.country_by_name(name).is_none() {
                tracing::debug!(name = %name, "open country no longer in dataset, closing details");
                self.close_details();
            }
        }

        self.refresh_listing();
    }

    /// Re-runs the pipeline and clamps the page and the selection.
    pub fn refresh_listing(&mut self) {
        let _span = tracing::debug_span!(
            "refresh_listing",
            total = self.source.data().len(),
            term = %self.search_term,
            region = ?self.region_filter
        )
        .entered();

        self.listing = project(
            self.source.data(),
            &self.search_term,
            self.region_filter.as_deref().unwrap_or(""),
        )
        .into_iter()
        .cloned()
        .collect();

        self.pagination.clamp(self.listing.len());
        self.clamp_selection();

        tracing::debug!(
            listed = self.listing.len(),
            page = self.pagination.page(),
            "listing refreshed"
        );
    }

    /// Applies a new search term, refreshing the listing if it changed.
    pub fn set_search_term(&mut self, term: String) -> bool {
        if term == self.search_term {
            return false;
        }
        tracing::debug!(term = %term, "search term applied");
        self.search_term = term;
        self.refresh_listing();
        true
    }

    /// Rows on the current page.
    #[must_use]
    pub fn current_page(&self) -> &[CountryRecord] {
        self.pagination.slice(&self.listing)
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        page_count(self.listing.len(), self.pagination.page_size())
    }

    #[must_use]
    pub fn selected_country(&self) -> Option<&CountryRecord> {
        self.current_page().get(self.selected_index)
    }

    #[must_use]
    pub fn country_by_name(&self, name: &str) -> Option<&CountryRecord> {
        self.source.data().iter().find(|c| c.official_name() == name)
    }

    /// Moves the selection down, continuing onto the next page at the bottom.
    pub fn move_selection_down(&mut self) {
        let page_len = self.current_page().len();
        if page_len == 0 {
            return;
        }
        if self.selected_index + 1 < page_len {
            self.selected_index += 1;
        } else if self.pagination.next(self.listing.len()) {
            self.selected_index = 0;
        }
    }

    /// Moves the selection up, continuing onto the previous page at the top.
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else if self.pagination.prev() {
            self.selected_index = self.current_page().len().saturating_sub(1);
        }
    }

    pub fn next_page(&mut self) -> bool {
        let changed = self.pagination.next(self.listing.len());
        if changed {
            self.selected_index = 0;
        }
        changed
    }

    pub fn prev_page(&mut self) -> bool {
        let changed = self.pagination.prev();
        if changed {
            self.selected_index = 0;
        }
        changed
    }

    /// Steps the region filter through `All → first → … → last → All`.
    ///
    /// Returns `false` if there are no regions to cycle through.
    pub fn cycle_region(&mut self, forward: bool) -> bool {
        let len = self.regions.len();
        if len == 0 {
            return false;
        }

        let position = self
            .region_filter
            .as_ref()
            .and_then(|current| self.regions.iter().position(|r| r == current));

        let next = match (position, forward) {
            (None, true) => Some(0),
            (None, false) => Some(len - 1),
            (Some(i), true) => (i + 1 < len).then_some(i + 1),
            (Some(i), false) => i.checked_sub(1),
        };

        self.region_filter = next.map(|i| self.regions[i].clone());
        tracing::debug!(region = ?self.region_filter, "region filter changed");
        self.refresh_listing();
        true
    }

    /// Opens the details panel for the selected country.
    pub fn open_details(&mut self) -> bool {
        let Some(name) = self.selected_country().map(|c| c.official_name().to_string()) else {
            return false;
        };
        tracing::debug!(name = %name, "opening details");
        self.return_mode = match self.input_mode {
            InputMode::Details | InputMode::NoteEditor => self.return_mode,
            mode => mode,
        };
        self.open_country = Some(name);
        self.input_mode = InputMode::Details;
        true
    }

    pub fn close_details(&mut self) {
        self.open_country = None;
        self.note_draft.clear();
        self.input_mode = self.return_mode;
    }

    /// Official name an action applies to: the open country in the details
    /// panel, otherwise the selected row.
    #[must_use]
    pub fn target_name(&self) -> Option<String> {
        match self.input_mode {
            InputMode::Details | InputMode::NoteEditor => self.open_country.clone(),
            _ => self.selected_country().map(|c| c.official_name().to_string()),
        }
    }

    fn clamp_selection(&mut self) {
        let page_len = self.current_page().len();
        self.selected_index = if page_len == 0 {
            0
        } else {
            self.selected_index.min(page_len - 1)
        };
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing
    ///
    /// A page holds up to 20 rows. When the terminal is shorter than that, a
    /// window of the page centred on the selection is shown instead.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let page = self.current_page();
        let empty_state = self.compute_empty_state();

        let (display_items, selected_display_index) = if empty_state.is_some() {
            (Vec::new(), 0)
        } else {
            let available_rows = self.calculate_available_rows(rows).max(1);

            let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
            let visible_end = (visible_start + available_rows).min(page.len());
            if visible_end - visible_start < available_rows && page.len() >= available_rows {
                visible_start = visible_end.saturating_sub(available_rows);
            }

            let items = page[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(relative_idx, country)| {
                    self.compute_display_item(country, visible_start + relative_idx, cols)
                })
                .collect();
            (items, self.selected_index.saturating_sub(visible_start))
        };

        UIViewModel {
            display_items,
            selected_index: selected_display_index,
            header: self.compute_header(),
            footer: self.compute_footer(),
            banner: self.compute_banner(),
            pagination: PaginationInfo {
                page: self.pagination.page(),
                page_count: self.page_count(),
                total: self.listing.len(),
            },
            empty_state,
            search_bar: self.compute_search_bar(),
            details: self.compute_details(),
        }
    }

    fn compute_display_item(&self, country: &CountryRecord, page_idx: usize, cols: usize) -> DisplayItem {
        let name = truncate_to_width(country.official_name(), name_column_width(cols));
        let visible_len = name.chars().count();

        let highlight_ranges = match_range(country.official_name(), &self.search_term)
            .filter(|(start, _)| *start < visible_len)
            .map(|(start, end)| vec![(start, end.min(visible_len))])
            .unwrap_or_default();

        let official = country.official_name();
        DisplayItem {
            name,
            region: country.region.clone(),
            capital: country.primary_capital().unwrap_or_default().to_string(),
            population: format_population(country.population),
            is_favorite: self.favorites.is_favorite(official),
            has_note: !self.favorites.note(official).is_empty(),
            is_selected: page_idx == self.selected_index,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = if self.favorites.is_empty() {
            format!(" Countries ({}) ", self.listing.len())
        } else {
            format!(" Countries ({})  ★ {} ", self.listing.len(), self.favorites.len())
        };

        let mut parts = vec![format!(
            "Region: {}",
            self.region_filter.as_deref().unwrap_or("All")
        )];
        if !self.search_term.is_empty() {
            parts.push(format!("Search: \"{}\"", self.search_term));
        }
        if self.source.is_loading() {
            parts.push("refreshing…".to_string());
        } else if let Some(fetched_at) = self.source.fetched_at() {
            parts.push(format!(
                "updated {}",
                format_age(fetched_at, chrono::Utc::now().timestamp())
            ));
        }
        if self.favorites.persistence_degraded() {
            parts.push("favourites not saved".to_string());
        }

        HeaderInfo {
            title,
            subtitle: parts.join("  ·  "),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: clear search  Enter: results  Type to filter"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: clear search  /: edit  j/k: move  h/l: page  f: favourite  Enter: details"
            }
            InputMode::Normal => {
                "j/k: move  h/l: page  Tab: region  /: search  f: favourite  Enter: details  r: reload  q: quit"
            }
            InputMode::Details => {
                if self.open_country.as_deref().is_some_and(|n| self.favorites.is_favorite(n)) {
                    "ESC: back  f: unfavourite  e: edit note"
                } else {
                    "ESC: back  f: favourite"
                }
            }
            InputMode::NoteEditor => "Enter/ESC: save note  Type to edit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_banner(&self) -> Option<BannerInfo> {
        if self.error_dismissed {
            return None;
        }
        self.source.error().map(|e| BannerInfo {
            message: format!("Failed to load countries: {e}"),
            hint: "r: retry  x: dismiss".to_string(),
        })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_input.clone(),
                focused: focus == SearchFocus::Typing,
                pending: self.debouncer.is_pending(),
            }),
            _ => None,
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.listing.is_empty() {
            return None;
        }

        let (message, subtitle) = if self.permissions_denied {
            (
                "Permissions required".to_string(),
                "Grant web access to load the country list".to_string(),
            )
        } else if !self.source.has_started() {
            (
                "Waiting for permissions".to_string(),
                "Accept the permission prompt to load countries".to_string(),
            )
        } else if self.source.is_loading() && self.source.data().is_empty() {
            ("Loading countries…".to_string(), self.endpoint_host())
        } else if self.source.data().is_empty() {
            (
                "No countries loaded".to_string(),
                "Press r to try again".to_string(),
            )
        } else {
            let subtitle = self.suggest_name().map_or_else(
                || "Try a different search or region".to_string(),
                |name| format!("Did you mean \"{name}\"?"),
            );
            ("No countries found".to_string(), subtitle)
        };

        Some(EmptyState { message, subtitle })
    }

    /// Closest official name to the search term within the active region.
    fn suggest_name(&self) -> Option<&str> {
        use fuzzy_matcher::FuzzyMatcher;

        if self.search_term.is_empty() {
            return None;
        }
        let region = self.region_filter.as_deref().unwrap_or("");
        let matcher = SkimMatcherV2::default().ignore_case();

        self.source
            .data()
            .iter()
            .filter(|c| matches_region(&c.region, region))
            .filter_map(|c| {
                matcher
                    .fuzzy_match(c.official_name(), &self.search_term)
                    .map(|score| (score, c.official_name()))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, name)| name)
    }

    fn compute_details(&self) -> Option<DetailsView> {
        const MISSING: &str = "n/a";

        let name = self.open_country.as_deref()?;
        let country = self.country_by_name(name)?;
        let is_favorite = self.favorites.is_favorite(name);
        let editing_note = self.input_mode == InputMode::NoteEditor;

        let capital = if country.capital.is_empty() {
            MISSING.to_string()
        } else {
            country.capital.join(", ")
        };

        let area = country.area.map_or_else(
            || MISSING.to_string(),
            |km2| format!("{} km²", format_population(km2.max(0.0).round() as u64)),
        );

        Some(DetailsView {
            official_name: country.official_name().to_string(),
            common_name: country.name.common.clone(),
            region: country.region.clone(),
            subregion: country.subregion.clone().unwrap_or_else(|| MISSING.to_string()),
            capital,
            population: format_population(country.population),
            area,
            languages: country.language_list().unwrap_or_else(|| MISSING.to_string()),
            currencies: country.currency_symbols().unwrap_or_else(|| MISSING.to_string()),
            flag: if country.flags.png.is_empty() {
                MISSING.to_string()
            } else {
                country.flags.png.clone()
            },
            is_favorite,
            note: if editing_note {
                self.note_draft.clone()
            } else {
                self.favorites.note(name).to_string()
            },
            editing_note,
        })
    }

    fn endpoint_host(&self) -> String {
        let without_scheme = self
            .endpoint
            .split_once("://")
            .map_or(self.endpoint.as_str(), |(_, rest)| rest);
        let host = without_scheme.split('/').next().unwrap_or(without_scheme);
        format!("Fetching from {host}")
    }

    /// Rows left for table rows after the chrome around them.
    ///
    /// Normal layout: blank, title, subtitle, border, column headers,
    /// pagination, border, footer. The banner takes one more row, the search
    /// box three.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let mut chrome = 8;
        if self.compute_banner().is_some() {
            chrome += 1;
        }
        if matches!(self.input_mode, InputMode::Search(_)) {
            chrome += 3;
        }
        total_rows.saturating_sub(chrome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FetchError;

    fn country(name: &str, region: &str) -> CountryRecord {
        let mut record = CountryRecord::new(name, region);
        record.capital = vec![format!("{name} City")];
        record.population = 1_000;
        record
    }

    fn loaded(records: Vec<CountryRecord>) -> AppState {
        let mut state = AppState::default();
        state.permissions_granted = true;
        let ticket = state.source.begin();
        state.source.complete(ticket.generation, Ok(records));
        state.apply_dataset();
        state
    }

    fn numbered(count: usize, region: &str) -> Vec<CountryRecord> {
        (0..count).map(|i| country(&format!("Country {i:03}"), region)).collect()
    }

    #[test]
    fn listing_is_sorted_and_regions_indexed() {
        let state = loaded(vec![
            country("Zed", "Europe"),
            country("Alpha", "Asia"),
            country("Mid", "Europe"),
        ]);
        let names: Vec<&str> = state.listing.iter().map(CountryRecord::official_name).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zed"]);
        assert_eq!(state.regions, vec!["Asia".to_string(), "Europe".to_string()]);
    }

    #[test]
    fn region_cycle_wraps_through_all() {
        let mut state = loaded(vec![country("A", "Asia"), country("B", "Europe")]);

        assert!(state.cycle_region(true));
        assert_eq!(state.region_filter.as_deref(), Some("Asia"));
        assert_eq!(state.listing.len(), 1);

        state.cycle_region(true);
        assert_eq!(state.region_filter.as_deref(), Some("Europe"));
        state.cycle_region(true);
        assert_eq!(state.region_filter, None);
        assert_eq!(state.listing.len(), 2);

        state.cycle_region(false);
        assert_eq!(state.region_filter.as_deref(), Some("Europe"));
    }

    #[test]
    fn page_clamps_when_search_shrinks_listing() {
        let mut records = numbered(45, "Europe");
        records.push(country("Japan", "Asia"));
        let mut state = loaded(records);

        assert!(state.next_page());
        assert!(state.next_page());
        assert_eq!(state.pagination.page(), 3);

        state.set_search_term("japan".to_string());
        assert_eq!(state.pagination.page(), 1);
        assert_eq!(state.current_page().len(), 1);
    }

    #[test]
    fn selection_crosses_page_boundaries() {
        let mut state = loaded(numbered(25, "Europe"));
        for _ in 0..19 {
            state.move_selection_down();
        }
        assert_eq!(state.selected_index, 19);

        state.move_selection_down();
        assert_eq!(state.pagination.page(), 2);
        assert_eq!(state.selected_index, 0);

        state.move_selection_up();
        assert_eq!(state.pagination.page(), 1);
        assert_eq!(state.selected_index, 19);
    }

    #[test]
    fn selection_clamps_to_shorter_last_page() {
        let mut state = loaded(numbered(25, "Europe"));
        state.selected_index = 15;
        state.next_page();
        assert_eq!(state.selected_index, 0);

        state.selected_index = 4;
        state.set_search_term("Country 02".to_string());
        assert_eq!(state.pagination.page(), 1);
        assert!(state.selected_index < state.current_page().len());
    }

    #[test]
    fn vanished_region_filter_is_cleared_on_new_dataset() {
        let mut state = loaded(vec![country("A", "Asia"), country("B", "Europe")]);
        state.cycle_region(true);

        let ticket = state.source.begin();
        state.source.complete(ticket.generation, Ok(vec![country("B", "Europe")]));
        state.apply_dataset();

        assert_eq!(state.region_filter, None);
        assert_eq!(state.listing.len(), 1);
    }

    #[test]
    fn favorites_do_not_reorder_listing() {
        let mut state = loaded(vec![country("Alpha", "Asia"), country("Zed", "Europe")]);
        state.favorites.toggle_favorite("Zed");
        state.refresh_listing();
        assert_eq!(state.listing[0].official_name(), "Alpha");

        let vm = state.compute_viewmodel(40, 120);
        assert!(!vm.display_items[0].is_favorite);
        assert!(vm.display_items[1].is_favorite);
    }

    #[test]
    fn viewmodel_marks_notes_and_highlights_matches() {
        let mut state = loaded(vec![country("French Republic", "Europe")]);
        state.favorites.toggle_favorite("French Republic");
        state.favorites.set_note("French Republic", "croissants");
        state.set_search_term("rep".to_string());

        let vm = state.compute_viewmodel(40, 120);
        let item = &vm.display_items[0];
        assert!(item.has_note);
        assert_eq!(item.highlight_ranges, vec![(7, 10)]);
        assert_eq!(item.population, "1,000");
        assert_eq!(vm.pagination, PaginationInfo { page: 1, page_count: 1, total: 1 });
    }

    #[test]
    fn empty_result_suggests_a_close_name() {
        let mut state = loaded(vec![country("French Republic", "Europe"), country("Japan", "Asia")]);
        state.set_search_term("frnch".to_string());

        let vm = state.compute_viewmodel(40, 120);
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "No countries found");
        assert_eq!(empty.subtitle, "Did you mean \"French Republic\"?");
        assert!(vm.display_items.is_empty());
    }

    #[test]
    fn loading_state_differs_from_no_results() {
        let mut state = AppState::default();
        state.source.begin();
        let vm = state.compute_viewmodel(40, 120);
        assert_eq!(vm.empty_state.unwrap().message, "Loading countries…");

        let waiting = AppState::default().compute_viewmodel(40, 120);
        assert_eq!(waiting.empty_state.unwrap().message, "Waiting for permissions");
    }

    #[test]
    fn banner_shows_error_until_dismissed() {
        let mut state = AppState::default();
        let ticket = state.source.begin();
        state.source.complete(ticket.generation, Err(FetchError::Status(503)));
        state.apply_dataset();

        let banner = state.compute_viewmodel(40, 120).banner.unwrap();
        assert_eq!(banner.message, "Failed to load countries: Request failed with status 503");

        state.error_dismissed = true;
        assert!(state.compute_viewmodel(40, 120).banner.is_none());
    }

    #[test]
    fn short_terminal_windows_around_selection() {
        let mut state = loaded(numbered(20, "Europe"));
        for _ in 0..15 {
            state.move_selection_down();
        }
        let vm = state.compute_viewmodel(14, 120);
        assert_eq!(vm.display_items.len(), 6);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].name, "Country 015");
    }

    #[test]
    fn details_view_is_built_from_the_open_country() {
        let mut record = country("Japan", "Asia");
        record.area = Some(377_930.0);
        let mut state = loaded(vec![record]);

        assert!(state.open_details());
        let details = state.compute_viewmodel(40, 120).details.unwrap();
        assert_eq!(details.official_name, "Japan");
        assert_eq!(details.capital, "Japan City");
        assert_eq!(details.area, "377,930 km²");
        assert_eq!(details.languages, "n/a");
        assert!(!details.is_favorite);

        state.close_details();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.compute_viewmodel(40, 120).details.is_none());
    }

    #[test]
    fn unavailable_storage_is_flagged_in_the_header() {
        let mut state = loaded(vec![country("Japan", "Asia")]);
        assert!(!state.compute_viewmodel(40, 120).header.subtitle.contains("favourites not saved"));

        state.storage_unavailable();
        state.favorites.toggle_favorite("Japan");
        assert!(state.favorites.is_favorite("Japan"));
        assert!(state.compute_viewmodel(40, 120).header.subtitle.contains("favourites not saved"));
    }
}
