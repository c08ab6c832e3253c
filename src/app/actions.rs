//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The plugin runtime
//! executes them in sequence. Everything the handler cannot do itself (host
//! HTTP requests, host timers, opening the filesystem) is expressed here.

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues the host HTTP request for the country dataset.
    ///
    /// The generation must be echoed back in the request context so the
    /// response can be matched to this request.
    FetchCountries {
        /// Dataset URL.
        url: String,
        /// Generation of the fetch ticket this request belongs to.
        generation: u64,
    },

    /// Starts a host timer for the search debounce.
    ScheduleDebounce {
        /// Quiet period in seconds.
        seconds: f64,
    },

    /// Switches favourites from in-memory to file-backed storage.
    ///
    /// Emitted once filesystem access has been granted.
    OpenStorage,
}
