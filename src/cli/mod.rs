//! # Command-Line Interface
//!
//! User-facing shells around the inventory ledger.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `form` (default) | Interactive entry form with export |
//! | `batch` | Record lines from a file or stdin, then export |
//! | `check-location` | Validate a shelf location code |
//! | `sku` | Derive the SKU for an ISBN and condition |
//! | `config show` / `config init` | Inspect or create the config file |
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`. The default comes from the
//! config file.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! booklist --verbose batch books.csv
//! ```

mod app;
mod batch;
mod config_cmd;
mod output;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
