//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the zatlas library
//! and the Zellij plugin system. It implements `ZellijPlugin`, translates host
//! events into library [`Event`]s and carries out the [`Action`]s the library
//! returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` (fetch) and `FullHdAccess` (favourites file)
//! 3. **Granted**: Open the favourites file and start the first fetch
//! 4. **Update**: Handle keys, HTTP responses and debounce timers
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → navigation, search, favourite and note events (mode dependent)
//! - `WebRequestResult` → `Event::CountriesFetched { generation, outcome }`
//! - `Timer` → `Event::DebounceElapsed`
//! - `PermissionRequestResult` → `Event::PermissionsGranted` / `PermissionsDenied`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! Browsing (table or details focused):
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `l`/`Right`/`PageDown`, `h`/`Left`/`PageUp`: Next / previous page
//! - `Tab`, `Shift+Tab`: Next / previous region
//! - `/`: Search
//! - `f`: Toggle favourite
//! - `Enter`: Open details
//! - `e`: Edit note (details)
//! - `r`: Retry fetch
//! - `x`: Dismiss error
//! - `q`: Close plugin
//! - `Esc`: Back / clear filters
//!
//! Typing (search box or note editor):
//! - Characters: Type
//! - `Enter`/`Down`: Apply search and focus results (search), save note (editor)
//! - `Esc`: Clear search (search), save note (editor)

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zatlas::infrastructure::get_data_dir;
use zatlas::source::{decode_response, GENERATION_CONTEXT_KEY};
use zatlas::storage::JsonStorage;
use zatlas::{handle_event, Action, Config, Event, FetchError, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: zatlas::app::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zatlas::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Nothing touches the network or the filesystem here; both wait for the
    /// permission result.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zatlas::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(endpoint = %config.endpoint, debounce_ms = config.debounce_ms, "parsed configuration");
        self.app = zatlas::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the Zellij event, runs it through `handle_event` and
    /// executes the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Self::map_permission_result(permissions)
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zatlas::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        if self.app.input_mode.captures_text() {
            return Self::map_typing_key(self.app.input_mode, key);
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Right | BareKey::PageDown | BareKey::Char('l') => Event::NextPage,
            BareKey::Left | BareKey::PageUp | BareKey::Char('h') => Event::PrevPage,
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevRegion,
            BareKey::Tab => Event::NextRegion,
            BareKey::Char('/') => match self.app.input_mode {
                InputMode::Search(_) => Event::FocusSearchBar,
                _ => Event::SearchMode,
            },
            BareKey::Char('f') => Event::ToggleFavorite,
            BareKey::Enter => Event::OpenDetails,
            BareKey::Char('e') => Event::EditNote,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('x') => Event::DismissError,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    /// Keys while the search box or the note editor has focus.
    fn map_typing_key(mode: InputMode, key: &KeyWithModifier) -> Option<Event> {
        let in_search = mode == InputMode::Search(SearchFocus::Typing);
        Some(match key.bare_key {
            BareKey::Enter | BareKey::Down if in_search => Event::FocusResults,
            BareKey::Enter => Event::CommitNote,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
            _ => return None,
        })
    }

    /// Maps an HTTP response to a completed fetch.
    ///
    /// Responses without our generation in the context were not issued by
    /// this plugin instance and are ignored.
    fn map_web_result_event(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let generation = match context.get(GENERATION_CONTEXT_KEY).map(|g| g.parse::<u64>()) {
            Some(Ok(generation)) => generation,
            _ => {
                tracing::debug!(context = ?context, "web response without fetch generation, ignoring");
                return None;
            }
        };

        let outcome = decode_response(status, body);
        match &outcome {
            Ok(records) => tracing::debug!(generation, count = records.len(), "countries decoded"),
            Err(FetchError::Status(code)) => tracing::warn!(generation, status = code, "fetch rejected"),
            Err(e) => tracing::warn!(generation, error = %e, "fetch failed"),
        }

        Some(Event::CountriesFetched { generation, outcome })
    }

    fn map_permission_result(permissions: PermissionStatus) -> Event {
        match permissions {
            PermissionStatus::Granted => Event::PermissionsGranted,
            PermissionStatus::Denied => Event::PermissionsDenied,
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchCountries { url, generation } => {
                tracing::debug!(url = %url, generation, "requesting countries");
                let mut context = BTreeMap::new();
                context.insert(GENERATION_CONTEXT_KEY.to_string(), generation.to_string());
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
            Action::ScheduleDebounce { seconds } => {
                set_timeout(*seconds);
            }
            Action::OpenStorage => match JsonStorage::new(get_data_dir()) {
                Ok(storage) => {
                    tracing::debug!(dir = ?storage.dir(), "favourites storage opened");
                    self.app.attach_storage(Box::new(storage));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cannot open favourites storage, keeping them in memory");
                    self.app.storage_unavailable();
                }
            },
        }
    }
}
