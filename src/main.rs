/*!
# mlog - A Markdown Logbook

mlog keeps a logbook of dated markdown entries filed under user-defined
categories. Each category is a directory holding one file per date plus a
generated `index.md`, and the logbook root holds a master `index.md` linking
every category.

This file contains the binary entry point: logging setup, argument parsing and
dispatch to the library operations.

## Usage

```text
mlog [OPTIONS] [COMMAND]

Commands:
  add         Save the text piped on stdin as a log entry
  init        Set up a logbook in the given directory
  config      Show or change the logbook configuration
  rebuild     Regenerate every category index and the main index
  categories  List the configured categories
  open        Open the logbook directory in the system file browser

Options:
  -c, --category <CATEGORY>  Category to file the entry under
  -d, --date <DATE>          Date of the entry (defaults to today)
  -o, --overwrite            Replace an existing entry for the same category and date
  -v, --verbose              Print verbose output
```

## Environment

- `HOME`: location of the `.mlog-config.json` pointer file
- `RUST_LOG`: log filter, overriding `--verbose`
- `MLOG_LOG_FORMAT`: `json` for structured logs, `text` (default) otherwise
- `MLOG_OPENER`: program used by `mlog open`
*/

use chrono::{DateTime, Local};
use clap::{CommandFactory, Parser};
use mlog::cli::{AddArgs, CliArgs, Commands, ConfigAction};
use mlog::config::{self, ConfigProvider};
use mlog::constants::{
    DEFAULT_LOG_LEVEL, ENV_VAR_MLOG_LOG_FORMAT, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
    TRACING_SERVICE_NAME, VERBOSE_LOG_LEVEL,
};
use mlog::errors::{AppError, AppResult, ConfigError};
use mlog::logbook_core::category_directory_name;
use mlog::logbook_io;
use std::env;
use std::io::{self, IsTerminal, Read};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let correlation_id = Uuid::new_v4();
    let root_span = tracing::info_span!(
        "app_invocation",
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting mlog");
    debug!("CLI arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `--verbose` when set. `MLOG_LOG_FORMAT=json` switches to
/// JSON lines.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let format = env::var(ENV_VAR_MLOG_LOG_FORMAT).unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if format.eq_ignore_ascii_case(LOG_FORMAT_JSON) {
        builder
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .init();
    } else {
        builder.compact().with_target(false).init();
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    // One reference time per invocation; everything downstream receives it.
    let reference_datetime = Local::now();
    let provider = ConfigProvider::from_env()?;

    if let Some(add_args) = args.add_args() {
        return add_entry(&provider, add_args, &reference_datetime);
    }

    match args.command {
        Some(Commands::Init { directory }) => init_logbook(provider, &directory, &reference_datetime),
        Some(Commands::Config { action }) => configure(&provider, action, &reference_datetime),
        Some(Commands::Rebuild) => {
            let config = provider.get_config()?;
            let report = logbook_io::rebuild_all_indexes(config, &reference_datetime)?;
            for path in &report.category_indexes {
                println!("Rebuilt {}", path.display());
            }
            println!("Rebuilt {}", report.main_index.display());
            Ok(())
        }
        Some(Commands::Categories) => {
            let config = provider.get_config()?;
            for category in &config.categories {
                let marker = if *category == config.default_category {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "{}{}\t{}",
                    category,
                    marker,
                    category_directory_name(category)
                );
            }
            Ok(())
        }
        Some(Commands::Open) => logbook_io::open_logbook(provider.get_config()?),
        Some(Commands::Add(_)) | None => Ok(()),
    }
}

fn add_entry(
    provider: &ConfigProvider,
    add_args: &AddArgs,
    reference_datetime: &DateTime<Local>,
) -> AppResult<()> {
    let config = provider.get_config()?;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        let mut command = CliArgs::command();
        eprintln!("{}", command.render_help());
        eprintln!("Pipe the entry text into mlog, e.g. `echo \"# Done\" | mlog add`.");
        return Err(AppError::EmptyEntry);
    }

    let mut entry_text = String::new();
    stdin.lock().read_to_string(&mut entry_text)?;
    debug!("Read {} bytes of entry text", entry_text.len());

    let entry_path = logbook_io::import_log_entry(
        config,
        &entry_text,
        add_args.category.as_deref(),
        add_args.date.as_deref(),
        add_args.overwrite,
        reference_datetime,
    )?;
    println!("Saved Log to {}", entry_path.display());

    logbook_io::generate_category_index_page(
        config,
        add_args.category.as_deref(),
        reference_datetime,
    )?;
    Ok(())
}

fn init_logbook(
    mut provider: ConfigProvider,
    directory: &str,
    reference_datetime: &DateTime<Local>,
) -> AppResult<()> {
    let location = config::expand_location(directory)?;
    info!("Initializing logbook at {}", location.display());

    config::prepare_directory(&location)?;
    config::write_home_config(provider.home_dir(), &location)?;
    config::prepare_logbook_config(&location)?;

    provider.invalidate();
    let config = provider.get_config()?;
    logbook_io::generate_main_index_page(config, reference_datetime)?;

    println!("{} Initialized", location.display());
    println!("{}", config.to_json()?);
    Ok(())
}

fn configure(
    provider: &ConfigProvider,
    action: ConfigAction,
    reference_datetime: &DateTime<Local>,
) -> AppResult<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", provider.get_config()?.to_json()?);
        }
        ConfigAction::Set { name, value } => {
            if config::is_list_option(&name) {
                return Err(ConfigError::Invalid(format!(
                    "{} is a list option; use `mlog config add {} <value>`",
                    name, name
                ))
                .into());
            }
            let mut updated = provider.get_config()?.clone();
            updated.set_option(&name, &value)?;
            updated.save()?;
            println!("{}", updated.to_json()?);
        }
        ConfigAction::Add { name, value } => {
            if config::is_string_option(&name) {
                return Err(ConfigError::Invalid(format!(
                    "{} is not a list option; use `mlog config set {} <value>`",
                    name, name
                ))
                .into());
            }
            let mut updated = provider.get_config()?.clone();
            if updated.add_to_list(&name, &value)? {
                updated.save()?;
                logbook_io::generate_main_index_page(&updated, reference_datetime)?;
            } else {
                info!("{} already contains {}", name, value);
            }
            println!("{}", updated.to_json()?);
        }
    }
    Ok(())
}
