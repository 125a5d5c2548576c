//! Window title formatting.

use crate::constants::{APP_NAME, UNTITLED_NAME};

/// Build the window title for a document.
///
/// A leading `*` marks unsaved changes; documents without a file name show as
/// `Untitled`.
///
/// # Returns
/// A title such as `*notes.txt - Jot` or `Untitled - Jot`.
pub fn format_window_title(filename: Option<&str>, is_modified: bool) -> String {
    let name = filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNTITLED_NAME);
    let marker = if is_modified { "*" } else { "" };
    format!("{marker}{name} - {APP_NAME}")
}
