//! Input mode state types for the application.
//!
//! The plugin operates in one of four input modes:
//! - **Normal**: browsing the country table
//! - **Search**: editing the search term, or navigating its results
//! - **Details**: the details panel of the selected country is open
//! - **`NoteEditor`**: editing the note of a favourite from the details panel
//!
//! ```text
//! Normal ──/──► Search(Typing) ──Enter──► Search(Navigating) ──Esc──► Normal
//!   │
//!   └─Enter─► Details ──e──► NoteEditor ──Enter/Esc──► Details ──Esc──► Normal
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through filtered results.
    ///
    /// Accepts j/k for movement, favourite toggling, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),

    /// Details panel for the selected country.
    Details,

    /// Editing a favourite's note. Keystrokes go to the draft.
    NoteEditor,
}

impl InputMode {
    /// Whether keystrokes are captured as text rather than commands.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing) | Self::NoteEditor)
    }
}
