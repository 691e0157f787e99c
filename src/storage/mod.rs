//! # Storage Layer
//!
//! Everything that touches the filesystem: the config file and the
//! spreadsheet export. Nothing is persisted between sessions apart from
//! the exports themselves.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `~/.config/book-lister/config.toml` |
//! | Exports | XLSX | `~/Documents/Listing uploads/books_data_{timestamp}.xlsx` |
//!
//! ## Key Types
//!
//! - [`Config`] - Loaded settings and where they came from
//! - [`export_entries`] - Writes entries to a new spreadsheet

mod config;
mod export;

pub use config::{default_export_dir, Config, ConfigError, OutputFormat, Settings, EXPORT_FOLDER};
pub use export::{export_entries, export_file_name, ExportError, EXPORT_COLUMNS, SHEET_NAME};
