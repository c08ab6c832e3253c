//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! host responses, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `PrevPage`, `NextRegion`, `PrevRegion`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `Char`, `Backspace`
//! - **Favourites**: `ToggleFavorite`, `OpenDetails`, `EditNote`, `CommitNote`
//! - **Host**: `PermissionsGranted`, `PermissionsDenied`, `CountriesFetched`, `DebounceElapsed`
//!
//! # Example
//!
//! ```no_run
//! use zatlas::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (should_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), zatlas::AtlasError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{CountryRecord, FetchError};

/// Events triggered by user input or host responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Web and filesystem access were granted. Opens storage and starts the
    /// initial fetch.
    PermissionsGranted,
    /// Permissions were refused; nothing can be fetched.
    PermissionsDenied,
    /// Re-fetches the dataset (manual retry).
    Refresh,
    /// The host answered the fetch issued with `generation`.
    CountriesFetched {
        generation: u64,
        outcome: std::result::Result<Vec<CountryRecord>, FetchError>,
    },
    /// A debounce timer elapsed.
    DebounceElapsed,

    /// Moves selection down, continuing onto the next page.
    KeyDown,
    /// Moves selection up, continuing onto the previous page.
    KeyUp,
    NextPage,
    PrevPage,
    /// Advances the region filter.
    NextRegion,
    /// Steps the region filter back.
    PrevRegion,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Applies the typed term now and focuses the results.
    FocusResults,
    /// Clears the search and returns to normal mode.
    ExitSearch,
    /// Appends a character to the search box or the note draft.
    Char(char),
    /// Removes the last character from the search box or the note draft.
    Backspace,
    /// Backs out of the current mode.
    Escape,

    /// Toggles the favourite state of the selected (or open) country.
    ToggleFavorite,
    /// Opens the details panel for the selected country.
    OpenDetails,
    /// Starts editing the note of the open favourite.
    EditNote,
    /// Saves the note draft and leaves the editor.
    CommitNote,
    /// Hides the error banner.
    DismissError,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
}

impl Event {
    /// Short name for tracing, without payloads.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PermissionsGranted => "PermissionsGranted",
            Self::PermissionsDenied => "PermissionsDenied",
            Self::Refresh => "Refresh",
            Self::CountriesFetched { .. } => "CountriesFetched",
            Self::DebounceElapsed => "DebounceElapsed",
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::NextPage => "NextPage",
            Self::PrevPage => "PrevPage",
            Self::NextRegion => "NextRegion",
            Self::PrevRegion => "PrevRegion",
            Self::SearchMode => "SearchMode",
            Self::FocusSearchBar => "FocusSearchBar",
            Self::FocusResults => "FocusResults",
            Self::ExitSearch => "ExitSearch",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::Escape => "Escape",
            Self::ToggleFavorite => "ToggleFavorite",
            Self::OpenDetails => "OpenDetails",
            Self::EditNote => "EditNote",
            Self::CommitNote => "CommitNote",
            Self::DismissError => "DismissError",
            Self::CloseFocus => "CloseFocus",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// Whether the UI should re-render, and the actions to execute in sequence.
///
/// # Errors
///
/// Reserved for failures that cannot be contained in state. Fetch and storage
/// failures never surface here: they become banner state or a degraded store.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::PermissionsGranted => {
            tracing::debug!("permissions granted, opening storage and fetching");
            state.permissions_granted = true;
            state.permissions_denied = false;
            Ok((true, vec![Action::OpenStorage, start_fetch(state)]))
        }
        Event::PermissionsDenied => {
            tracing::warn!("permissions denied, countries cannot be fetched");
            state.permissions_denied = true;
            Ok((true, vec![]))
        }
        Event::Refresh => {
            if !state.permissions_granted {
                tracing::debug!("refresh ignored, permissions not granted");
                return Ok((false, vec![]));
            }
            Ok((true, vec![start_fetch(state)]))
        }
        Event::CountriesFetched { generation, outcome } => {
            if !state.source.complete(*generation, outcome.clone()) {
                return Ok((false, vec![]));
            }
            if outcome.is_err() {
                state.error_dismissed = false;
            }
            state.apply_dataset();
            Ok((true, vec![]))
        }
        Event::DebounceElapsed => match state.debouncer.fire_next() {
            Some(term) => Ok((state.set_search_term(term), vec![])),
            None => Ok((false, vec![])),
        },

        Event::KeyDown => {
            if !browsing(state.input_mode) {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if !browsing(state.input_mode) {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage => Ok((browsing(state.input_mode) && state.next_page(), vec![])),
        Event::PrevPage => Ok((browsing(state.input_mode) && state.prev_page(), vec![])),
        Event::NextRegion => Ok((browsing(state.input_mode) && state.cycle_region(true), vec![])),
        Event::PrevRegion => Ok((browsing(state.input_mode) && state.cycle_region(false), vec![])),

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_input.clone_from(&state.search_term);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if let Some(term) = state.debouncer.flush() {
                state.set_search_term(term);
            }

            if state.search_term.is_empty() {
                state.input_mode = InputMode::Normal;
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(term = %state.search_term, "exiting search mode");
            state.debouncer.cancel();
            state.search_input.clear();
            state.set_search_term(String::new());
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                state.search_input.push(*c);
                tracing::trace!(input = %state.search_input, "search input updated");
                Ok((true, vec![schedule_search(state)]))
            }
            InputMode::NoteEditor => {
                state.note_draft.push(*c);
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                if state.search_input.pop().is_none() {
                    return Ok((false, vec![]));
                }
                Ok((true, vec![schedule_search(state)]))
            }
            InputMode::NoteEditor => Ok((state.note_draft.pop().is_some(), vec![])),
            _ => Ok((false, vec![])),
        },
        Event::Escape => match state.input_mode {
            InputMode::Details => {
                state.close_details();
                Ok((true, vec![]))
            }
            InputMode::NoteEditor => handle_event(state, &Event::CommitNote),
            InputMode::Search(_) => handle_event(state, &Event::ExitSearch),
            InputMode::Normal => {
                if state.region_filter.is_none() && state.search_term.is_empty() {
                    return Ok((false, vec![]));
                }
                tracing::debug!("clearing filters");
                state.region_filter = None;
                state.search_input.clear();
                state.set_search_term(String::new());
                state.refresh_listing();
                Ok((true, vec![]))
            }
        },

        Event::ToggleFavorite => {
            if state.input_mode == InputMode::NoteEditor
                || state.input_mode == InputMode::Search(SearchFocus::Typing)
            {
                return Ok((false, vec![]));
            }
            let Some(name) = state.target_name() else {
                tracing::debug!("no country selected to toggle");
                return Ok((false, vec![]));
            };
            state.favorites.toggle_favorite(&name);
            Ok((true, vec![]))
        }
        Event::OpenDetails => {
            if !browsing(state.input_mode) {
                return Ok((false, vec![]));
            }
            Ok((state.open_details(), vec![]))
        }
        Event::EditNote => {
            if state.input_mode != InputMode::Details {
                return Ok((false, vec![]));
            }
            let Some(name) = state.open_country.clone() else {
                return Ok((false, vec![]));
            };
            if !state.favorites.is_favorite(&name) {
                tracing::debug!(name = %name, "notes are only available for favourites");
                return Ok((false, vec![]));
            }
            state.note_draft = state.favorites.note(&name).to_string();
            state.input_mode = InputMode::NoteEditor;
            Ok((true, vec![]))
        }
        Event::CommitNote => {
            if state.input_mode != InputMode::NoteEditor {
                return Ok((false, vec![]));
            }
            if let Some(name) = state.open_country.clone() {
                let draft = std::mem::take(&mut state.note_draft);
                state.favorites.set_note(&name, &draft);
            }
            state.input_mode = InputMode::Details;
            Ok((true, vec![]))
        }
        Event::DismissError => {
            if state.source.error().is_none() || state.error_dismissed {
                return Ok((false, vec![]));
            }
            state.error_dismissed = true;
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

/// Modes in which the table has keyboard focus.
const fn browsing(mode: InputMode) -> bool {
    matches!(mode, InputMode::Normal | InputMode::Search(SearchFocus::Navigating))
}

fn start_fetch(state: &mut AppState) -> Action {
    let ticket = state.source.begin();
    Action::FetchCountries {
        url: state.endpoint.clone(),
        generation: ticket.generation,
    }
}

fn schedule_search(state: &mut AppState) -> Action {
    state.debouncer.schedule(state.search_input.clone());
    Action::ScheduleDebounce {
        seconds: state.debouncer.quiet_period().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, region: &str) -> CountryRecord {
        CountryRecord::new(name, region)
    }

    fn ready_state(records: Vec<CountryRecord>) -> AppState {
        let mut state = AppState::default();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let Some(Action::FetchCountries { generation, .. }) = actions.last().cloned() else {
            panic!("expected a fetch action, got {actions:?}");
        };
        handle_event(
            &mut state,
            &Event::CountriesFetched {
                generation,
                outcome: Ok(records),
            },
        )
        .unwrap();
        state
    }

    fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
        text.chars()
            .flat_map(|c| handle_event(state, &Event::Char(c)).unwrap().1)
            .collect()
    }

    #[test]
    fn permissions_open_storage_then_fetch() {
        let mut state = AppState::default();
        let (render, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(render);
        assert_eq!(actions[0], Action::OpenStorage);
        assert!(matches!(
            &actions[1],
            Action::FetchCountries { generation: 1, url } if url == &state.endpoint
        ));
        assert!(state.source.is_loading());
    }

    #[test]
    fn refresh_requires_permissions() {
        let mut state = AppState::default();
        let (render, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_fetch_result_is_ignored() {
        let mut state = ready_state(vec![country("Japan", "Asia")]);
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(matches!(actions[0], Action::FetchCountries { generation: 2, .. }));

        let (render, _) = handle_event(
            &mut state,
            &Event::CountriesFetched {
                generation: 1,
                outcome: Err(FetchError::Status(500)),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.source.error().is_none());
        assert!(state.source.is_loading());
    }

    #[test]
    fn failed_fetch_shows_banner_again_after_dismiss() {
        let mut state = ready_state(vec![country("Japan", "Asia")]);

        for _ in 0..2 {
            let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
            let Action::FetchCountries { generation, .. } = actions[0].clone() else {
                panic!("expected fetch");
            };
            handle_event(
                &mut state,
                &Event::CountriesFetched {
                    generation,
                    outcome: Err(FetchError::Network("offline".into())),
                },
            )
            .unwrap();
            assert!(!state.error_dismissed);
            assert!(state.compute_viewmodel(40, 120).banner.is_some());

            let (render, _) = handle_event(&mut state, &Event::DismissError).unwrap();
            assert!(render);
            assert!(state.compute_viewmodel(40, 120).banner.is_none());
        }

        assert_eq!(state.listing.len(), 1);
    }

    #[test]
    fn typing_is_debounced_until_the_last_timer() {
        let mut state = ready_state(vec![country("Japan", "Asia"), country("Jamaica", "Americas")]);
        handle_event(&mut state, &Event::SearchMode).unwrap();

        let actions = type_text(&mut state, "jap");
        assert_eq!(actions.len(), 3);
        assert!(actions
            .iter()
            .all(|a| matches!(a, Action::ScheduleDebounce { seconds } if (*seconds - 0.3).abs() < 1e-9)));
        assert_eq!(state.listing.len(), 2);

        assert!(!handle_event(&mut state, &Event::DebounceElapsed).unwrap().0);
        assert!(!handle_event(&mut state, &Event::DebounceElapsed).unwrap().0);
        assert_eq!(state.listing.len(), 2);

        assert!(handle_event(&mut state, &Event::DebounceElapsed).unwrap().0);
        assert_eq!(state.search_term, "jap");
        assert_eq!(state.listing.len(), 1);
    }

    #[test]
    fn enter_applies_pending_search_immediately() {
        let mut state = ready_state(vec![country("Japan", "Asia"), country("Chile", "Americas")]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "chi");

        handle_event(&mut state, &Event::FocusResults).unwrap();
        assert_eq!(state.search_term, "chi");
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));

        assert!(!handle_event(&mut state, &Event::DebounceElapsed).unwrap().0);
        assert_eq!(state.listing.len(), 1);
    }

    #[test]
    fn escape_cancels_pending_search() {
        let mut state = ready_state(vec![country("Japan", "Asia"), country("Chile", "Americas")]);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "chi");

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        for _ in 0..3 {
            handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        }
        assert_eq!(state.search_term, "");
        assert_eq!(state.listing.len(), 2);
    }

    #[test]
    fn favorite_and_note_flow_through_details() {
        let mut state = ready_state(vec![country("Japan", "Asia")]);

        handle_event(&mut state, &Event::OpenDetails).unwrap();
        assert_eq!(state.input_mode, InputMode::Details);

        assert!(!handle_event(&mut state, &Event::EditNote).unwrap().0);
        assert_eq!(state.input_mode, InputMode::Details);

        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(state.favorites.is_favorite("Japan"));

        handle_event(&mut state, &Event::EditNote).unwrap();
        assert_eq!(state.input_mode, InputMode::NoteEditor);
        type_text(&mut state, "ramen");
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Escape).unwrap();

        assert_eq!(state.input_mode, InputMode::Details);
        assert_eq!(state.favorites.note("Japan"), "rame");

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.open_country, None);
    }

    #[test]
    fn toggle_from_table_uses_selected_row() {
        let mut state = ready_state(vec![country("Alpha", "Asia"), country("Zed", "Europe")]);
        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(state.favorites.is_favorite("Zed"));
        assert!(!state.favorites.is_favorite("Alpha"));

        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn region_and_escape_reset() {
        let mut state = ready_state(vec![country("Alpha", "Asia"), country("Zed", "Europe")]);
        handle_event(&mut state, &Event::NextRegion).unwrap();
        assert_eq!(state.listing.len(), 1);

        assert!(handle_event(&mut state, &Event::Escape).unwrap().0);
        assert_eq!(state.region_filter, None);
        assert_eq!(state.listing.len(), 2);
        assert!(!handle_event(&mut state, &Event::Escape).unwrap().0);
    }

    #[test]
    fn paging_is_ignored_while_typing() {
        let records = (0..30).map(|i| country(&format!("C{i:02}"), "Europe")).collect();
        let mut state = ready_state(records);
        handle_event(&mut state, &Event::SearchMode).unwrap();
        assert!(!handle_event(&mut state, &Event::NextPage).unwrap().0);

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert!(handle_event(&mut state, &Event::NextPage).unwrap().0);
        assert_eq!(state.pagination.page(), 2);
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = AppState::default();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
