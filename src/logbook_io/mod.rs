//! Logbook I/O operations and file management.
//!
//! This module contains all the filesystem work of the logbook: preparing
//! category directories, writing entries, scanning category directories, writing
//! the index documents, and opening the logbook in the system file browser.
//! The text of the index documents comes from `logbook_core`.

use crate::config::Config;
use crate::constants::{ENTRY_FILE_EXTENSION, ENV_VAR_MLOG_OPENER, INDEX_FILE_NAME};
use crate::errors::{AppError, AppResult};
use crate::logbook_core::{
    build_category_index, build_main_index, category_directory_name, extract_title,
    is_indexable_entry, resolve_category, resolve_entry_date, IndexedEntry,
};
use chrono::{DateTime, Local};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};


/// Paths written by a full index rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildReport {
    /// Category indexes regenerated, in configured category order.
    pub category_indexes: Vec<PathBuf>,
    /// The master index.
    pub main_index: PathBuf,
}

/// Creates a single directory readable only by its owner.
pub(crate) fn create_private_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use crate::constants::DEFAULT_DIR_PERMISSIONS;
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DEFAULT_DIR_PERMISSIONS);
    }
    builder.create(path)
}

fn private_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true);
    #[cfg(unix)]
    options.mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
    options
}

/// Writes `contents` to `path`, replacing it. A new file is readable only by its owner.
pub(crate) fn write_private_file(path: &Path, contents: &str) -> io::Result<()> {
    private_file_options()
        .create(true)
        .truncate(true)
        .open(path)?
        .write_all(contents.as_bytes())
}

/// Returns the directory of a category, creating it on first use.
///
/// `category_name` must already be the canonical configured name; its spaces are
/// replaced with underscores to form the directory name.
///
/// # Errors
///
/// Returns `AppError::DirectoryNotWritable` if the directory cannot be created,
/// is not a directory, is read-only, or cannot be listed.
pub fn category_path(config: &Config, category_name: &str) -> AppResult<PathBuf> {
    let path = config
        .logbook_root
        .join(category_directory_name(category_name));

    if !path.exists() {
        create_private_dir(&path).map_err(|source| AppError::DirectoryNotWritable {
            path: path.clone(),
            source,
        })?;
        info!("Created category directory {}", path.display());
    }

    check_directory_access(&path)?;
    Ok(path)
}

fn check_directory_access(path: &Path) -> AppResult<()> {
    let not_writable = |source: io::Error| AppError::DirectoryNotWritable {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(not_writable)?;
    if !metadata.is_dir() {
        return Err(not_writable(io::Error::new(
            io::ErrorKind::Other,
            "not a directory",
        )));
    }
    if metadata.permissions().readonly() {
        return Err(not_writable(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "directory is read-only",
        )));
    }
    fs::read_dir(path).map_err(not_writable)?;
    Ok(())
}

/// Saves `entry_text` as the entry for a category and date.
///
/// The category defaults to the configured default and the date to
/// `reference_datetime`. The entry is written verbatim to
/// `<logbook>/<category_dir>/<date>.md`.
///
/// # Errors
///
/// - `AppError::EmptyEntry` if `entry_text` is empty (checked before any I/O)
/// - `AppError::UnknownCategory` / `AppError::InvalidDate` from resolution
/// - `AppError::DirectoryNotWritable` if the category directory is unusable
/// - `AppError::EntryExists` if the entry exists and `overwrite` is false
/// - `AppError::Io` if writing fails
///
/// # Examples
///
/// ```no_run
/// use chrono::Local;
/// use mlog::config::ConfigProvider;
/// use mlog::logbook_io;
///
/// let provider = ConfigProvider::from_env()?;
/// let config = provider.get_config()?;
/// let path = logbook_io::import_log_entry(
///     config,
///     "# Shipped the release",
///     Some("work log"),
///     Some("2017-11-10"),
///     false,
///     &Local::now(),
/// )?;
/// assert!(path.ends_with("Work_Log/2017-11-10.md"));
/// # Ok::<(), mlog::AppError>(())
/// ```
pub fn import_log_entry(
    config: &Config,
    entry_text: &str,
    raw_category: Option<&str>,
    raw_date: Option<&str>,
    overwrite: bool,
    reference_datetime: &DateTime<Local>,
) -> AppResult<PathBuf> {
    if entry_text.is_empty() {
        return Err(AppError::EmptyEntry);
    }

    let category = resolve_category(config, raw_category)?;
    let date_stem = resolve_entry_date(
        &config.file_name_format,
        raw_date,
        &reference_datetime.naive_local(),
    )?;
    if date_stem.contains(['/', '\\']) {
        return Err(AppError::InvalidDate {
            input: raw_date.unwrap_or_default().to_string(),
            reason: format!(
                "file name format '{}' produces a path separator",
                config.file_name_format
            ),
        });
    }
    debug!("Resolved category {} and date {}", category, date_stem);

    let directory = category_path(config, category)?;
    let entry_file = directory.join(format!("{}.{}", date_stem, ENTRY_FILE_EXTENSION));

    debug!("Attempting to write file: {}", entry_file.display());
    write_entry_file(&entry_file, entry_text, overwrite)?;

    info!("Saved entry {}", entry_file.display());
    Ok(entry_file)
}

fn write_entry_file(path: &Path, contents: &str, overwrite: bool) -> AppResult<()> {
    let mut options = private_file_options();
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options
        .open(path)
        .map_err(|e| entry_open_error(path, e))?;

    file.write_all(contents.as_bytes())
        .map_err(|e| AppError::io_at(path, e))?;
    Ok(())
}

fn entry_open_error(path: &Path, source: io::Error) -> AppError {
    match source.kind() {
        io::ErrorKind::AlreadyExists => AppError::EntryExists {
            path: path.to_path_buf(),
        },
        // a writable mode bit does not mean this user may write there
        io::ErrorKind::PermissionDenied => AppError::DirectoryNotWritable {
            path: path.parent().unwrap_or(path).to_path_buf(),
            source,
        },
        _ => AppError::io_at(path, source),
    }
}

/// Lists the entries of a category directory with their extracted titles.
///
/// Only `.md` files other than `index.md` are listed. Entries come back in
/// directory order; sorting is up to the index builder.
///
/// # Errors
///
/// Returns `AppError::DirectoryNotWritable` if the directory cannot be listed and
/// `AppError::Io` if any entry cannot be read. A single unreadable entry aborts
/// the scan. Contents that are not valid UTF-8 are decoded lossily.
pub fn scan_category_entries(directory: &Path) -> AppResult<Vec<IndexedEntry>> {
    let not_listable = |source: io::Error| AppError::DirectoryNotWritable {
        path: directory.to_path_buf(),
        source,
    };

    debug!("Scanning category path: {}", directory.display());
    let mut entries = Vec::new();
    for item in fs::read_dir(directory).map_err(not_listable)? {
        let item = item.map_err(not_listable)?;
        let file_name = match item.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                debug!("Skipping non UTF-8 file name {:?}", name);
                continue;
            }
        };

        let path = item.path();
        if !is_indexable_entry(&file_name) || !path.is_file() {
            continue;
        }

        let bytes = fs::read(&path).map_err(|e| AppError::io_at(&path, e))?;
        let title = extract_title(&String::from_utf8_lossy(&bytes), &file_name);
        entries.push(IndexedEntry::new(file_name, title));
    }

    debug!("Found {} entries", entries.len());
    Ok(entries)
}

/// Regenerates `index.md` in a category's directory.
///
/// The whole document is rebuilt from the current directory listing and
/// overwrites whatever was there.
pub fn generate_category_index_page(
    config: &Config,
    raw_category: Option<&str>,
    reference_datetime: &DateTime<Local>,
) -> AppResult<PathBuf> {
    let category = resolve_category(config, raw_category)?;
    let directory = category_path(config, category)?;

    let entries = scan_category_entries(&directory)?;
    let contents = build_category_index(category, &entries, reference_datetime);

    let index_file = directory.join(INDEX_FILE_NAME);
    write_private_file(&index_file, &contents).map_err(|source| {
        AppError::DirectoryNotWritable {
            path: directory.clone(),
            source,
        }
    })?;

    info!(
        "Regenerated index for {} with {} entries",
        category,
        entries.len()
    );
    Ok(index_file)
}

/// Regenerates `index.md` at the logbook root, linking every category index.
pub fn generate_main_index_page(
    config: &Config,
    reference_datetime: &DateTime<Local>,
) -> AppResult<PathBuf> {
    let contents = build_main_index(&config.title, &config.categories, reference_datetime);

    let index_file = config.logbook_root.join(INDEX_FILE_NAME);
    write_private_file(&index_file, &contents).map_err(|e| AppError::io_at(&index_file, e))?;

    info!("Regenerated main index {}", index_file.display());
    Ok(index_file)
}

/// Regenerates every existing category index and then the master index.
///
/// Categories that have no directory yet are skipped rather than created.
pub fn rebuild_all_indexes(
    config: &Config,
    reference_datetime: &DateTime<Local>,
) -> AppResult<RebuildReport> {
    let mut category_indexes = Vec::new();

    for category in &config.categories {
        let directory = config.logbook_root.join(category_directory_name(category));
        if !directory.is_dir() {
            debug!("Skipping category {} with no directory", category);
            continue;
        }
        category_indexes.push(generate_category_index_page(
            config,
            Some(category),
            reference_datetime,
        )?);
    }

    let main_index = generate_main_index_page(config, reference_datetime)?;
    Ok(RebuildReport {
        category_indexes,
        main_index,
    })
}

/// Opens the logbook root in the system file browser.
///
/// The program is taken from `MLOG_OPENER` when set, otherwise the platform
/// default (`open`, `explorer` or `xdg-open`).
pub fn open_logbook(config: &Config) -> AppResult<()> {
    let opener = env::var(ENV_VAR_MLOG_OPENER)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default_opener().to_string());

    launch_opener(&opener, &config.logbook_root)
}

fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    }
}

fn launch_opener(opener: &str, path: &Path) -> AppResult<()> {
    debug!("Launching opener: {} {}", opener, path.display());

    match Command::new(opener).arg(path).status() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(AppError::Opener(format!(
            "'{}' exited with non-zero status code: {}",
            opener,
            status.code().unwrap_or(-1)
        ))),
        Err(e) => match e.kind() {
            io::ErrorKind::NotFound => Err(AppError::Opener(format!(
                "'{}' not found: {}. Set {} to a program that opens directories.",
                opener, e, ENV_VAR_MLOG_OPENER
            ))),
            _ => Err(AppError::Opener(format!(
                "failed to execute '{}': {}",
                opener, e
            ))),
        },
    }
}
