/*!
# mlog

mlog keeps a markdown logbook: dated entries filed under a configurable set of
categories, each category with a generated index page and the whole logbook
with a master index.

## Layout on disk

```text
<logbook root>/
  logbook-config.json
  index.md                 master index, one link per category
  Work_Log/
    index.md               category index, newest entry first
    2017-11-10.md
```

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading, caching, bootstrap and mutation
- `constants`: File names, defaults and formats
- `errors`: Error handling infrastructure
- `logbook_core`: Pure logic (category and date resolution, titles, index text)
- `logbook_io`: Filesystem operations (entries, index pages, opening the logbook)

## Usage Example

```rust,no_run
use chrono::Local;
use mlog::config::ConfigProvider;
use mlog::logbook_io;

fn main() -> mlog::AppResult<()> {
    let provider = ConfigProvider::from_env()?;
    let config = provider.get_config()?;
    let now = Local::now();

    let entry = logbook_io::import_log_entry(config, "# Standup notes", None, None, false, &now)?;
    logbook_io::generate_category_index_page(config, None, &now)?;
    println!("Saved {}", entry.display());
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Pure logbook logic
pub mod logbook_core;
/// Logbook filesystem operations
pub mod logbook_io;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
