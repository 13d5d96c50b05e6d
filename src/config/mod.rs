//! Configuration management for the mlog application.
//!
//! Configuration lives in two JSON documents:
//!
//! - `~/.mlog-config.json`: a pointer holding the absolute logbook location
//!   (`mlogLocation`).
//! - `<logbook>/logbook-config.json`: the logbook settings (`categories`,
//!   `defaultCategory`, `fileNameFormat`, `title`, `serverPort`).
//!
//! `ConfigProvider` loads both once and caches the result for its lifetime. Core
//! operations take a `&Config` explicitly, so tests build one per case.
//!
//! This module also holds the bootstrap steps behind `mlog init` and the option
//! mutation behind `mlog config set/add`.

use crate::constants::{
    DEFAULT_CATEGORIES, DEFAULT_CATEGORY, DEFAULT_FILE_NAME_FORMAT, DEFAULT_SERVER_PORT,
    DEFAULT_TITLE, ENV_VAR_HOME, HOME_CONFIG_FILE_NAME, INTEGER_OPTIONS, LIST_OPTIONS,
    LOGBOOK_CONFIG_FILE_NAME, STRING_OPTIONS,
};
use crate::errors::{AppError, AppResult, ConfigError};
use crate::logbook_core::category::find_category;
use crate::logbook_io::{create_private_dir, write_private_file};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolved configuration of one logbook.
///
/// The settings fields round-trip through `logbook-config.json`; `logbook_root`
/// comes from the home pointer file and is never written to the settings file.
///
/// # Examples
///
/// ```
/// use mlog::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     logbook_root: PathBuf::from("/path/to/logbook"),
///     categories: vec!["Work Log".to_string()],
///     default_category: "Work Log".to_string(),
///     ..Config::default()
/// };
/// assert_eq!(config.file_name_format, "YYYY-MM-DD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Absolute path of the logbook root.
    #[serde(skip)]
    pub logbook_root: PathBuf,

    /// Configured categories, in display order.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Category used when none is given.
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Pattern used to render entry dates into file names.
    #[serde(default = "default_file_name_format")]
    pub file_name_format: String,

    /// Title of the master index.
    #[serde(default = "default_title")]
    pub title: String,

    /// Port of the rendering server.
    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_file_name_format() -> String {
    DEFAULT_FILE_NAME_FORMAT.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logbook_root: PathBuf::new(),
            categories: default_categories(),
            default_category: default_category(),
            file_name_format: default_file_name_format(),
            title: default_title(),
            server_port: default_server_port(),
        }
    }
}

/// Contents of the home directory pointer file.
#[derive(Debug, Serialize, Deserialize)]
struct HomeConfig {
    #[serde(rename = "mlogLocation")]
    mlog_location: PathBuf,
}

impl Config {
    /// Path of this logbook's settings file.
    pub fn logbook_config_path(&self) -> PathBuf {
        self.logbook_root.join(LOGBOOK_CONFIG_FILE_NAME)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the logbook root is empty, relative, or
    /// not an existing directory.
    pub fn validate(&self) -> AppResult<()> {
        if self.logbook_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("Logbook location is empty".to_string()).into());
        }

        if !self.logbook_root.is_absolute() {
            return Err(ConfigError::Invalid(format!(
                "Logbook location must be an absolute path: {}",
                self.logbook_root.display()
            ))
            .into());
        }

        if !self.logbook_root.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "Logbook location is not a directory: {}",
                self.logbook_root.display()
            ))
            .into());
        }

        Ok(())
    }

    /// Renders the settings as pretty JSON, as stored in `logbook-config.json`.
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e).into())
    }

    /// Writes the settings to `logbook-config.json` at the logbook root.
    pub fn save(&self) -> AppResult<()> {
        let path = self.logbook_config_path();
        let contents = self.to_json()?;
        write_private_file(&path, &contents).map_err(|e| AppError::io_at(&path, e))?;
        info!("Saved logbook configuration to {}", path.display());
        Ok(())
    }

    /// Sets a string or integer option by its configuration-file name.
    ///
    /// `defaultCategory` must name a configured category and is stored with the
    /// configured casing. `serverPort` must be a valid port number.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownOption` for names that are not string or
    /// integer options, `ConfigError::InvalidValue` for unusable values, and
    /// `AppError::UnknownCategory` for an unknown default category.
    pub fn set_option(&mut self, option_name: &str, value: &str) -> AppResult<()> {
        let invalid = || ConfigError::InvalidValue {
            option: option_name.to_string(),
            value: value.to_string(),
        };

        match option_name {
            "defaultCategory" => {
                let canonical = find_category(&self.categories, value.trim())
                    .ok_or_else(|| AppError::UnknownCategory(value.to_string()))?;
                self.default_category = canonical.to_string();
            }
            "fileNameFormat" => {
                if value.trim().is_empty() {
                    return Err(invalid().into());
                }
                self.file_name_format = value.to_string();
            }
            "title" => self.title = value.to_string(),
            "serverPort" => {
                self.server_port = value.trim().parse::<u16>().map_err(|_| invalid())?;
            }
            _ => return Err(ConfigError::UnknownOption(option_name.to_string()).into()),
        }

        debug!("Set option {} to {}", option_name, value);
        Ok(())
    }

    /// Appends a value to a list option.
    ///
    /// Returns `false` without changing anything when an equal category (ignoring
    /// case) is already configured.
    pub fn add_to_list(&mut self, option_name: &str, value: &str) -> AppResult<bool> {
        if option_name != "categories" {
            return Err(ConfigError::UnknownOption(option_name.to_string()).into());
        }

        let category = value.trim();
        if category.is_empty() {
            return Err(ConfigError::InvalidValue {
                option: option_name.to_string(),
                value: value.to_string(),
            }
            .into());
        }

        if find_category(&self.categories, category).is_some() {
            debug!("Category {} already configured", category);
            return Ok(false);
        }

        self.categories.push(category.to_string());
        debug!("Added category {}", category);
        Ok(true)
    }
}

/// Whether `option_name` is accepted by `config set`.
pub fn is_string_option(option_name: &str) -> bool {
    STRING_OPTIONS.contains(&option_name) || INTEGER_OPTIONS.contains(&option_name)
}

/// Whether `option_name` is accepted by `config add`.
pub fn is_list_option(option_name: &str) -> bool {
    LIST_OPTIONS.contains(&option_name)
}

/// Loads and caches the configuration of the logbook named in the home pointer file.
///
/// ```no_run
/// use mlog::config::ConfigProvider;
///
/// let provider = ConfigProvider::from_env()?;
/// let config = provider.get_config()?;
/// println!("Logbook at {}", config.logbook_root.display());
/// # Ok::<(), mlog::AppError>(())
/// ```
#[derive(Debug)]
pub struct ConfigProvider {
    home_dir: PathBuf,
    cached: OnceCell<Config>,
}

impl ConfigProvider {
    /// Creates a provider reading the pointer file from `home_dir`.
    pub fn new(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
            cached: OnceCell::new(),
        }
    }

    /// Creates a provider for the current user's home directory (`HOME`).
    pub fn from_env() -> AppResult<Self> {
        let home = env::var(ENV_VAR_HOME)
            .map_err(|_| ConfigError::Invalid(format!("{} is not set", ENV_VAR_HOME)))?;
        if home.is_empty() {
            return Err(ConfigError::Invalid(format!("{} is empty", ENV_VAR_HOME)).into());
        }
        Ok(Self::new(home))
    }

    /// The home directory this provider reads from.
    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// Returns the configuration, loading it on first use.
    pub fn get_config(&self) -> AppResult<&Config> {
        self.cached.get_or_try_init(|| load_config(&self.home_dir))
    }

    /// Drops the cached configuration so the next call reloads it from disk.
    pub fn invalidate(&mut self) {
        self.cached = OnceCell::new();
    }
}

/// Path of the home pointer file inside `home_dir`.
pub fn home_config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(HOME_CONFIG_FILE_NAME)
}

/// Reads the pointer file and the logbook settings it points at.
///
/// # Errors
///
/// - `ConfigError::MissingHomeConfig` if the pointer file cannot be read
/// - `ConfigError::MissingLogbookConfig` if the settings file cannot be read
/// - `ConfigError::Parse` if either document is malformed
/// - `ConfigError::Invalid` if the logbook root fails validation
pub fn load_config(home_dir: &Path) -> AppResult<Config> {
    let home_config_file = home_config_path(home_dir);
    debug!("Using base config file: {}", home_config_file.display());

    let home_contents = fs::read_to_string(&home_config_file).map_err(|_| {
        ConfigError::MissingHomeConfig {
            path: home_config_file.clone(),
        }
    })?;
    let home_config: HomeConfig =
        serde_json::from_str(&home_contents).map_err(|source| ConfigError::Parse {
            path: home_config_file.clone(),
            source,
        })?;

    let logbook_root = home_config.mlog_location;
    let logbook_config_file = logbook_root.join(LOGBOOK_CONFIG_FILE_NAME);
    debug!("Using logbook config: {}", logbook_config_file.display());

    let logbook_contents = fs::read_to_string(&logbook_config_file).map_err(|_| {
        ConfigError::MissingLogbookConfig {
            path: logbook_root.clone(),
        }
    })?;
    let mut config: Config =
        serde_json::from_str(&logbook_contents).map_err(|source| ConfigError::Parse {
            path: logbook_config_file.clone(),
            source,
        })?;
    config.logbook_root = logbook_root;

    config.validate()?;
    Ok(config)
}

/// Expands `~` and environment variables in a logbook location.
///
/// # Errors
///
/// Returns `ConfigError::InvalidLocation` if expansion fails or the result is
/// not an absolute path.
pub fn expand_location(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw.trim())
        .map_err(|e| ConfigError::InvalidLocation(format!("Failed to expand path: {}", e)))?;
    let location = PathBuf::from(expanded.into_owned());

    if !location.is_absolute() {
        return Err(ConfigError::InvalidLocation(format!(
            "{} is not an absolute path",
            location.display()
        ))
        .into());
    }
    Ok(location)
}

/// Prepares the directory that will hold the logbook.
///
/// An existing directory is accepted as is. Otherwise the parent must exist, be
/// a directory, and be writable, and the location is created.
pub fn prepare_directory(location: &Path) -> AppResult<()> {
    if location.as_os_str().is_empty() || location == Path::new("/") {
        return Err(ConfigError::InvalidLocation(
            "Blank or root path specified for log location".to_string(),
        )
        .into());
    }

    if location.exists() {
        if !location.is_dir() {
            return Err(ConfigError::InvalidLocation(format!(
                "{} already exists and is not a directory.",
                location.display()
            ))
            .into());
        }
        debug!("Logbook directory {} already exists", location.display());
        return Ok(());
    }

    let parent = location.parent().unwrap_or_else(|| Path::new("/"));
    debug!("Path does not exist, checking parent {}", parent.display());
    let metadata = fs::metadata(parent).map_err(|_| {
        ConfigError::InvalidLocation(format!(
            "Parent Directory {} does not exist.",
            parent.display()
        ))
    })?;
    if !metadata.is_dir() {
        return Err(ConfigError::InvalidLocation(format!(
            "Parent of log location {} is not a directory.",
            parent.display()
        ))
        .into());
    }
    if metadata.permissions().readonly() {
        return Err(ConfigError::InvalidLocation(format!(
            "{} does not have r/w access.",
            parent.display()
        ))
        .into());
    }

    create_private_dir(location).map_err(|e| AppError::io_at(location, e))?;
    info!("Created logbook directory {}", location.display());
    Ok(())
}

/// Writes the home pointer file naming `location`, replacing any existing one.
pub fn write_home_config(home_dir: &Path, location: &Path) -> AppResult<PathBuf> {
    let path = home_config_path(home_dir);
    let home_config = HomeConfig {
        mlog_location: location.to_path_buf(),
    };
    let contents = serde_json::to_string_pretty(&home_config).map_err(ConfigError::Serialize)?;

    write_private_file(&path, &contents).map_err(|e| AppError::io_at(&path, e))?;
    info!("Wrote home config {}", path.display());
    Ok(path)
}

/// Writes the default settings file into `location` unless one already exists.
pub fn prepare_logbook_config(location: &Path) -> AppResult<PathBuf> {
    let path = location.join(LOGBOOK_CONFIG_FILE_NAME);
    if path.exists() {
        debug!("Keeping existing logbook config {}", path.display());
        return Ok(path);
    }

    let contents = Config::default().to_json()?;
    write_private_file(&path, &contents).map_err(|e| AppError::io_at(&path, e))?;
    info!("Created default logbook config {}", path.display());
    Ok(path)
}
