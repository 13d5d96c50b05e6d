//! Title extraction from markdown entries.

use crate::constants::ENTRY_FILE_EXTENSION;

/// Extracts a display title for a markdown document.
///
/// Only the first line is inspected. A heading line (`#` run, optional
/// whitespace, text) yields its trimmed text; anything else yields the file
/// name without its `.md` extension.
///
/// ```
/// use mlog::logbook_core::title::extract_title;
///
/// assert_eq!(extract_title("# The Title\n\nBody", "f.md"), "The Title");
/// assert_eq!(extract_title("No heading here", "f.md"), "f");
/// ```
pub fn extract_title(contents: &str, fallback_file_name: &str) -> String {
    let first_line = contents.lines().next().unwrap_or("");

    if first_line.starts_with('#') {
        let text = first_line.trim_start_matches('#').trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }

    strip_entry_extension(fallback_file_name).to_string()
}

/// Removes a trailing `.md` from a file name, if present.
pub fn strip_entry_extension(file_name: &str) -> &str {
    file_name
        .strip_suffix(ENTRY_FILE_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .unwrap_or(file_name)
}
