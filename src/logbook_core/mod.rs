//! Core logbook functionality without I/O operations.
//!
//! This module contains the pure logic of the logbook: resolving category names
//! and entry dates, extracting titles from markdown, and building the text of the
//! index documents. Nothing here touches the filesystem; see `logbook_io` for the
//! adapters that read directories and write files.

pub mod category;
pub mod dates;
pub mod index;
pub mod title;

pub use category::{category_directory_name, find_category, resolve_category};
pub use dates::{format_entry_date, parse_entry_date, resolve_entry_date};
pub use index::{build_category_index, build_main_index, is_indexable_entry, IndexedEntry};
pub use title::extract_title;
