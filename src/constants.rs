//! Constants used throughout the application.
//!
//! File names, environment variables, default settings and date formats live
//! here so the on-disk layout is described in one place.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "mlog";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Keep a markdown logbook of dated entries in categorized folders";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used when `--verbose` is given.
pub const VERBOSE_LOG_LEVEL: &str = "info";
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "mlog";

// Environment Variables
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Selects the log output format (`text` or `json`).
pub const ENV_VAR_MLOG_LOG_FORMAT: &str = "MLOG_LOG_FORMAT";
/// Overrides the program used by `mlog open`.
pub const ENV_VAR_MLOG_OPENER: &str = "MLOG_OPENER";

// File System Layout
/// Pointer file in the home directory naming the logbook root.
pub const HOME_CONFIG_FILE_NAME: &str = ".mlog-config.json";
/// Settings file at the logbook root.
pub const LOGBOOK_CONFIG_FILE_NAME: &str = "logbook-config.json";
/// Name of every generated index document.
pub const INDEX_FILE_NAME: &str = "index.md";
/// File extension for entries, without the dot.
pub const ENTRY_FILE_EXTENSION: &str = "md";
/// Permissions for directories created by mlog (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Permissions for entry files written by mlog (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Default Logbook Settings
/// Title of a freshly initialized logbook.
pub const DEFAULT_TITLE: &str = "Logbook";
/// Categories of a freshly initialized logbook.
pub const DEFAULT_CATEGORIES: &[&str] = &["General", "Work Log", "Weekly Summary"];
/// Default category of a freshly initialized logbook.
pub const DEFAULT_CATEGORY: &str = "General";
/// Default entry file name pattern.
pub const DEFAULT_FILE_NAME_FORMAT: &str = "YYYY-MM-DD";
/// Default port for the rendering server.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// Configuration Option Names
/// String-valued options accepted by `config set`.
pub const STRING_OPTIONS: &[&str] = &["defaultCategory", "fileNameFormat", "title"];
/// Integer-valued options accepted by `config set`.
pub const INTEGER_OPTIONS: &[&str] = &["serverPort"];
/// List-valued options accepted by `config add`.
pub const LIST_OPTIONS: &[&str] = &["categories"];

// Date/Time
/// Format of the generation timestamp at the foot of index documents.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";
/// Prefix of the generation timestamp line.
pub const GENERATED_AT_PREFIX: &str = "> Generated at: ";
/// Date-time formats tried, in order, when parsing a user supplied date.
pub const DATETIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];
/// Date-only formats tried, in order, when parsing a user supplied date.
pub const DATE_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y%m%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];
