//! Category name resolution.
//!
//! Categories are matched against the configured list with a literal,
//! case-insensitive, whole-string comparison. The configured casing is what
//! flows downstream.

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Finds the configured category equal to `name`, ignoring case.
///
/// Returns the first match in list order, with the casing it was configured with.
///
/// ```
/// use mlog::logbook_core::category::find_category;
///
/// let categories = vec!["ACategory".to_string(), "Work Log".to_string()];
/// assert_eq!(find_category(&categories, "work log"), Some("Work Log"));
/// assert_eq!(find_category(&categories, "Work"), None);
/// ```
pub fn find_category<'a>(categories: &'a [String], name: &str) -> Option<&'a str> {
    let needle = name.to_lowercase();
    categories
        .iter()
        .find(|candidate| candidate.to_lowercase() == needle)
        .map(String::as_str)
}

/// Resolves a user supplied category to its canonical configured name.
///
/// An absent, empty or whitespace-only name resolves to the configured default
/// category. The (possibly substituted) name is trimmed before matching.
///
/// # Errors
///
/// Returns `AppError::UnknownCategory` carrying the raw input when nothing matches.
pub fn resolve_category<'a>(config: &'a Config, raw_name: Option<&str>) -> AppResult<&'a str> {
    let requested = match raw_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => config.default_category.as_str(),
    };

    find_category(&config.categories, requested.trim())
        .ok_or_else(|| AppError::UnknownCategory(requested.to_string()))
}

/// Directory name for a category: every space becomes an underscore.
pub fn category_directory_name(category_name: &str) -> String {
    category_name.replace(' ', "_")
}
