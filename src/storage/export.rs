//! Spreadsheet export for book entries
//!
//! Entries are written to `books_data_{YYYYMMDD}_{HHMMSS}.xlsx` with a single
//! sheet holding a header row and one row per entry. A second export in the
//! same second gets a numeric suffix instead of overwriting the first.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use thiserror::Error;

use crate::domain::BookEntry;

/// Column headers, in export order
pub const EXPORT_COLUMNS: [&str; 5] = ["ISBN", "SKU", "Condition", "Location", "Quantity"];

/// Name of the single worksheet in every export
pub const SHEET_NAME: &str = "Sheet1";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write export file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
}

/// Returns the file name for an export taken at `now`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("books_data_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// Picks a path in `dir` that no existing file uses
fn unique_export_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    let candidate = dir.join(export_file_name(now));
    if !candidate.exists() {
        return candidate;
    }

    let stem = format!("books_data_{}", now.format("%Y%m%d_%H%M%S"));
    (1..)
        .map(|n| dir.join(format!("{}_{}.xlsx", stem, n)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Writes `entries` to a new spreadsheet in `dir` and returns its absolute path
///
/// The directory and any missing parents are created first.
pub fn export_entries(
    entries: &[BookEntry],
    dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let create_err = |source: std::io::Error| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(create_err)?;
    let dir = fs::canonicalize(dir).map_err(create_err)?;

    let path = unique_export_path(&dir, now);

    let mut workbook = Workbook::new();
    write_sheet(workbook.add_worksheet(), entries)
        .and_then(|_| workbook.save(&path))
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

fn write_sheet(sheet: &mut Worksheet, entries: &[BookEntry]) -> Result<(), XlsxError> {
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, entry) in entries.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, entry.isbn())?;
        sheet.write_string(row, 1, entry.sku())?;
        sheet.write_string(row, 2, entry.condition().as_str())?;
        sheet.write_string(row, 3, entry.location().to_string())?;
        sheet.write_number(row, 4, entry.quantity())?;
    }

    sheet.autofit();
    Ok(())
}
