//! Index document builders.
//!
//! Both index documents are derived artifacts, rebuilt in full from the current
//! directory listing or configuration. These builders are pure; writing the
//! result to disk lives in `logbook_io`.

use crate::constants::{
    ENTRY_FILE_EXTENSION, GENERATED_AT_FORMAT, GENERATED_AT_PREFIX, INDEX_FILE_NAME,
};
use crate::logbook_core::category::category_directory_name;
use chrono::{DateTime, Local};

/// An entry file as listed in a category index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntry {
    /// File name within the category directory, e.g. `2017-09-28.md`.
    pub file_name: String,
    /// Title extracted from the file's first line.
    pub title: String,
}

impl IndexedEntry {
    pub fn new(file_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            title: title.into(),
        }
    }
}

/// Whether a directory listing name is an entry to be indexed.
///
/// Only `.md` files count, and the index document itself never does.
pub fn is_indexable_entry(file_name: &str) -> bool {
    file_name != INDEX_FILE_NAME
        && file_name
            .strip_suffix(ENTRY_FILE_EXTENSION)
            .is_some_and(|stem| stem.ends_with('.'))
}

/// Builds the markdown for a category index.
///
/// Entries are listed by file name descending, which is newest first for
/// sortable date patterns.
pub fn build_category_index(
    category_name: &str,
    entries: &[IndexedEntry],
    generated_at: &DateTime<Local>,
) -> String {
    let mut sorted: Vec<&IndexedEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.file_name.cmp(&a.file_name));

    let mut contents = format!("# {}\n\n", category_name);
    for entry in sorted {
        contents.push_str(&format!("* [{}]({})\n", entry.title, entry.file_name));
    }
    push_generated_at(&mut contents, generated_at);
    contents
}

/// Builds the markdown for the master index linking every category index.
pub fn build_main_index(
    title: &str,
    categories: &[String],
    generated_at: &DateTime<Local>,
) -> String {
    let mut sorted: Vec<&String> = categories.iter().collect();
    sorted.sort();

    let mut contents = format!("# {}\n\n", title);
    for category in sorted {
        contents.push_str(&format!(
            "* [{}]({}/{})\n",
            category,
            category_directory_name(category),
            INDEX_FILE_NAME
        ));
    }
    push_generated_at(&mut contents, generated_at);
    contents
}

fn push_generated_at(contents: &mut String, generated_at: &DateTime<Local>) {
    contents.push_str("\n\n");
    contents.push_str(GENERATED_AT_PREFIX);
    contents.push_str(&generated_at.format(GENERATED_AT_FORMAT).to_string());
}
