//! Error handling utilities for the mlog application.
//!
//! This module provides the central error type `AppError`, which represents all
//! failure conditions of the logbook core, the `ConfigError` type for configuration
//! bootstrap and mutation failures, and the `AppResult` alias used throughout.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, loading, validating or changing configuration.
///
/// # Examples
///
/// ```
/// use mlog::errors::ConfigError;
/// use std::path::PathBuf;
///
/// let error = ConfigError::MissingHomeConfig {
///     path: PathBuf::from("/home/user/.mlog-config.json"),
/// };
/// assert!(format!("{}", error).contains("mlog init"));
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory pointer file does not exist or cannot be read.
    #[error("Missing {path} file. Please run mlog init to configure the logbook location before running any other commands.")]
    MissingHomeConfig {
        /// Expected location of the pointer file
        path: PathBuf,
    },

    /// The logbook root named by the pointer file has no settings file.
    #[error("Missing logbook-config.json file in {path}. Please run mlog init to configure the logbook location before running any other commands.")]
    MissingLogbookConfig {
        /// The logbook root that was searched
        path: PathBuf,
    },

    /// A configuration document exists but is not valid JSON of the expected shape.
    #[error("Unable to parse {path}: {source}")]
    Parse {
        /// The file that failed to parse
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be rendered as JSON.
    #[error("Unable to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A logbook location given to `init` cannot be used.
    #[error("Invalid logbook location: {0}")]
    InvalidLocation(String),

    /// An option name that `config set`/`config add` does not know.
    #[error("Invalid Option Name: {0}")]
    UnknownOption(String),

    /// An option value that cannot be stored.
    #[error("Invalid value '{value}' for option {option}")]
    InvalidValue {
        /// Name of the option
        option: String,
        /// The rejected value
        value: String,
    },

    /// A loaded configuration that violates an invariant.
    #[error("{0}")]
    Invalid(String),
}

/// Represents all possible errors that can occur in the mlog application.
///
/// Every core operation fails fast with one of these; nothing is retried. The
/// binary maps them to a printed message and a non-zero exit status.
///
/// # Examples
///
/// ```
/// use mlog::errors::AppError;
///
/// let error = AppError::UnknownCategory("Not A Category".to_string());
/// assert_eq!(format!("{}", error), "Unknown Category: Not A Category");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// No text was supplied for a new entry.
    #[error("No entry text given for the log entry")]
    EmptyEntry,

    /// The requested category matches nothing in the configured list.
    #[error("Unknown Category: {0}")]
    UnknownCategory(String),

    /// The supplied date string could not be parsed.
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate {
        /// The raw input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// An entry already exists for the category and date.
    #[error("Entry for the given date already exists at {path}. Use the --overwrite flag if you want to replace it.")]
    EntryExists {
        /// Path of the existing entry
        path: PathBuf,
    },

    /// A category directory cannot be created, listed or written.
    #[error("Unable to write to {path}: {source}")]
    DirectoryNotWritable {
        /// The directory in question
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration bootstrap, loading or mutation failures.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The file browser used by `mlog open` could not be launched.
    #[error("Unable to open logbook: {0}")]
    Opener(String),
}

impl AppError {
    /// Wraps an I/O error with the path it concerns, keeping its kind.
    pub fn io_at(path: &std::path::Path, source: io::Error) -> Self {
        AppError::Io(io::Error::new(
            source.kind(),
            format!("{}: {}", path.display(), source),
        ))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
