//! Path utilities for the Zellij sandbox environment.
//!
//! The host filesystem is mounted under `/host` inside the plugin sandbox. These
//! helpers map user-facing paths onto it and locate the plugin's data directory.

use std::path::PathBuf;

/// Returns the data directory for zatlas storage.
///
/// The directory is located at `/host/.local/share/zellij/zatlas` in the Zellij
/// sandbox. In Zellij's plugin environment, `/host` points to the cwd of the last
/// focused terminal, or the folder where Zellij was started if that's not available.
///
/// This typically resolves to `~/.local/share/zellij/zatlas`. The favourites
/// file `favourites.json` and the trace file live inside it.
///
/// # Examples
///
/// ```
/// use zatlas::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str(), Some("/host/.local/share/zellij/zatlas"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zatlas")
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// # Examples
///
/// ```
/// use zatlas::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
