//! Inventory ledger
//!
//! The ledger holds every entry recorded during one session. Entries are
//! validated on the way in, never edited, never removed, and never reordered.
//!
//! ## Validation Order
//!
//! The first failing rule is reported and nothing is stored:
//!
//! 1. All four fields present
//! 2. ISBN not on the throwaway list
//! 3. Location is a valid code (see [`Location`])
//! 4. Quantity is a whole number of at least one
//! 5. Condition is `New` or `Used`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

use super::entry::{BookEntry, Condition};
use super::location::{Location, LocationError};
use crate::storage::{export_entries, ExportError};

/// ISBNs rejected when no configuration overrides them
pub const DEFAULT_THROWAWAY_ISBNS: [&str; 2] = ["1234567890", "0987654321"];

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("All fields must be filled")]
    IncompleteInput,

    #[error("Throw away this book: ISBN {0} is on the throwaway list")]
    ThrowawayItem(String),

    #[error(transparent)]
    InvalidLocation(#[from] LocationError),

    #[error("Quantity cannot be zero")]
    ZeroQuantity,

    #[error("Invalid quantity '{0}': expected a whole number of at least 1")]
    InvalidQuantity(String),

    #[error("Invalid condition '{0}': expected New or Used")]
    InvalidCondition(String),

    #[error(transparent)]
    ExportIo(#[from] ExportError),
}

impl LedgerError {
    /// Stable machine-readable name for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::IncompleteInput => "incomplete_input",
            LedgerError::ThrowawayItem(_) => "throwaway_item",
            LedgerError::InvalidLocation(_) => "invalid_location",
            LedgerError::ZeroQuantity => "zero_quantity",
            LedgerError::InvalidQuantity(_) => "invalid_quantity",
            LedgerError::InvalidCondition(_) => "invalid_condition",
            LedgerError::ExportIo(_) => "export_io",
        }
    }
}

/// Settings fixed when the ledger is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// ISBNs that must be discarded instead of listed
    pub throwaway_isbns: BTreeSet<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            throwaway_isbns: DEFAULT_THROWAWAY_ISBNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Position of a row for alternating display styles (1-based count)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowParity {
    Odd,
    Even,
}

impl RowParity {
    /// Parity of the row at the given 1-based position
    pub fn of(position: usize) -> Self {
        if position % 2 == 1 {
            RowParity::Odd
        } else {
            RowParity::Even
        }
    }
}

/// Result of a successful [`InventoryLedger::add_entry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedEntry {
    pub entry: BookEntry,
    pub parity: RowParity,
}

/// The entries recorded in the current session plus the field locks
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    entries: Vec<BookEntry>,
    locked_condition: Option<Condition>,
    locked_location: Option<String>,
    throwaway_isbns: BTreeSet<String>,
}

impl InventoryLedger {
    /// Creates an empty ledger with the given configuration
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            entries: Vec::new(),
            locked_condition: None,
            locked_location: None,
            throwaway_isbns: config.throwaway_isbns,
        }
    }

    /// Validates the raw field values and appends a new entry
    ///
    /// On failure the ledger is left untouched.
    pub fn add_entry(
        &mut self,
        isbn: &str,
        condition: &str,
        location: &str,
        quantity: &str,
    ) -> Result<AddedEntry, LedgerError> {
        let (isbn, condition, location, quantity) =
            (isbn.trim(), condition.trim(), location.trim(), quantity.trim());

        if [isbn, condition, location, quantity].iter().any(|f| f.is_empty()) {
            return Err(LedgerError::IncompleteInput);
        }

        if self.is_throwaway(isbn) {
            return Err(LedgerError::ThrowawayItem(isbn.to_string()));
        }

        let location: Location = location.parse()?;
        let quantity = parse_quantity(quantity)?;
        let condition: Condition = condition
            .parse()
            .map_err(|_| LedgerError::InvalidCondition(condition.to_string()))?;

        let entry = BookEntry::new(isbn.to_string(), condition, location, quantity);
        self.entries.push(entry.clone());

        Ok(AddedEntry {
            entry,
            parity: RowParity::of(self.entries.len()),
        })
    }

    /// Sets or clears the condition lock
    pub fn set_locked_condition(&mut self, condition: Option<Condition>) {
        self.locked_condition = condition;
    }

    /// Sets or clears the location lock
    pub fn set_locked_location(&mut self, location: Option<String>) {
        self.locked_location = location;
    }

    pub fn locked_condition(&self) -> Option<Condition> {
        self.locked_condition
    }

    pub fn locked_location(&self) -> Option<&str> {
        self.locked_location.as_deref()
    }

    /// Returns true if the ISBN is on the throwaway list
    pub fn is_throwaway(&self, isbn: &str) -> bool {
        self.throwaway_isbns.contains(isbn.trim())
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[BookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of books across all entries
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity())).sum()
    }

    /// Writes the session to a timestamped spreadsheet in `dir`
    ///
    /// Returns the absolute path of the written file.
    pub fn export_to_file(&self, dir: &Path) -> Result<PathBuf, LedgerError> {
        self.export_to_file_at(dir, Local::now())
    }

    /// Same as [`export_to_file`](Self::export_to_file) with an explicit timestamp
    pub fn export_to_file_at(&self, dir: &Path, now: DateTime<Local>) -> Result<PathBuf, LedgerError> {
        Ok(export_entries(&self.entries, dir, now)?)
    }
}

/// Parses a quantity, rejecting zero, negative and non-numeric values
fn parse_quantity(raw: &str) -> Result<u32, LedgerError> {
    let value: i64 = raw
        .parse()
        .map_err(|_| LedgerError::InvalidQuantity(raw.to_string()))?;

    match value {
        0 => Err(LedgerError::ZeroQuantity),
        v if v < 0 => Err(LedgerError::InvalidQuantity(raw.to_string())),
        v => u32::try_from(v).map_err(|_| LedgerError::InvalidQuantity(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn ledger() -> InventoryLedger {
        InventoryLedger::new(LedgerConfig::default())
    }

    #[test]
    fn add_valid_entry() {
        let mut ledger = ledger();
        let added = ledger.add_entry("1111111111", "New", "A050", "3").unwrap();

        assert_eq!(added.entry.sku(), "1111111111-11");
        assert_eq!(added.entry.condition(), Condition::New);
        assert_eq!(added.parity, RowParity::Odd);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0], added.entry);
    }

    #[test]
    fn parity_alternates() {
        let mut ledger = ledger();
        let parities: Vec<_> = ["1", "2", "3", "4"]
            .iter()
            .map(|isbn| ledger.add_entry(isbn, "Used", "B001", "1").unwrap().parity)
            .collect();

        assert_eq!(
            parities,
            vec![RowParity::Odd, RowParity::Even, RowParity::Odd, RowParity::Even]
        );
    }

    #[test]
    fn missing_fields_are_incomplete() {
        let mut ledger = ledger();
        let cases = [
            ("", "New", "A050", "1"),
            ("111", "", "A050", "1"),
            ("111", "New", "", "1"),
            ("111", "New", "A050", ""),
            ("   ", "New", "A050", "1"),
        ];

        for (isbn, condition, location, quantity) in cases {
            let err = ledger.add_entry(isbn, condition, location, quantity).unwrap_err();
            assert!(matches!(err, LedgerError::IncompleteInput), "{:?}", err);
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn incomplete_is_checked_before_throwaway() {
        let mut ledger = ledger();
        let err = ledger.add_entry("1234567890", "New", "", "1").unwrap_err();
        assert!(matches!(err, LedgerError::IncompleteInput));
    }

    #[test]
    fn throwaway_wins_over_other_errors() {
        let mut ledger = ledger();
        let err = ledger.add_entry("0987654321", "Bogus", "ZZZZ", "0").unwrap_err();
        assert!(matches!(err, LedgerError::ThrowawayItem(ref isbn) if isbn == "0987654321"));
        assert_eq!(err.kind(), "throwaway_item");
        assert!(ledger.is_empty());
    }

    #[test]
    fn custom_throwaway_list() {
        let config = LedgerConfig {
            throwaway_isbns: ["555".to_string()].into_iter().collect(),
        };
        let mut ledger = InventoryLedger::new(config);

        assert!(ledger.add_entry("1234567890", "New", "A001", "1").is_ok());
        assert!(matches!(
            ledger.add_entry("555", "New", "A001", "1"),
            Err(LedgerError::ThrowawayItem(_))
        ));
    }

    #[test]
    fn invalid_location_rejected() {
        let mut ledger = ledger();
        for location in ["A000", "A201", "AA01", "A01", "1001"] {
            let err = ledger.add_entry("111", "New", location, "1").unwrap_err();
            assert!(matches!(err, LedgerError::InvalidLocation(_)), "{}", location);
            assert_eq!(err.kind(), "invalid_location");
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn location_checked_before_quantity() {
        let mut ledger = ledger();
        let err = ledger.add_entry("111", "New", "A999", "0").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidLocation(_)));
    }

    #[test]
    fn location_is_normalized() {
        let mut ledger = ledger();
        let added = ledger.add_entry("111", "Used", "c007", "2").unwrap();
        assert_eq!(added.entry.location().to_string(), "C007");
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut ledger = ledger();
        let err = ledger.add_entry("111", "New", "A050", "0").unwrap_err();
        assert!(matches!(err, LedgerError::ZeroQuantity));
        assert_eq!(err.to_string(), "Quantity cannot be zero");

        let err = ledger.add_entry("111", "New", "A050", "000").unwrap_err();
        assert!(matches!(err, LedgerError::ZeroQuantity));
        assert!(ledger.is_empty());
    }

    #[test]
    fn bad_quantities_rejected() {
        let mut ledger = ledger();
        for quantity in ["-1", "abc", "1.5", "99999999999"] {
            let err = ledger.add_entry("111", "New", "A050", quantity).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidQuantity(_)), "{}", quantity);
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn unknown_condition_rejected() {
        let mut ledger = ledger();
        let err = ledger.add_entry("111", "Mint", "A050", "1").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCondition(ref c) if c == "Mint"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn locks_are_plain_state() {
        let mut ledger = ledger();
        assert_eq!(ledger.locked_condition(), None);
        assert_eq!(ledger.locked_location(), None);

        ledger.set_locked_condition(Some(Condition::Used));
        ledger.set_locked_location(Some("not-validated".to_string()));
        assert_eq!(ledger.locked_condition(), Some(Condition::Used));
        assert_eq!(ledger.locked_location(), Some("not-validated"));

        ledger.set_locked_condition(None);
        ledger.set_locked_location(None);
        assert_eq!(ledger.locked_condition(), None);
        assert_eq!(ledger.locked_location(), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn locked_condition_is_reused_by_caller() {
        let mut ledger = ledger();
        ledger.set_locked_condition(Some(Condition::Used));

        for isbn in ["2222222222", "3333333333"] {
            let condition = ledger.locked_condition().unwrap().as_str();
            ledger.add_entry(isbn, condition, "D100", "1").unwrap();
        }

        assert_eq!(ledger.len(), 2);
        assert!(ledger.entries().iter().all(|e| e.condition() == Condition::Used));
        assert_eq!(ledger.entries()[1].sku(), "3333333333-2");
    }

    #[test]
    fn total_quantity_sums_entries() {
        let mut ledger = ledger();
        ledger.add_entry("1", "New", "A001", "3").unwrap();
        ledger.add_entry("2", "New", "A001", "4").unwrap();
        assert_eq!(ledger.total_quantity(), 7);
    }

    #[test]
    fn export_does_not_change_entries() {
        let dir = TempDir::new().unwrap();
        let mut ledger = ledger();
        ledger.add_entry("1111111111", "New", "A050", "3").unwrap();
        let before = ledger.entries().to_vec();

        let now = Local.with_ymd_and_hms(2024, 2, 15, 15, 30, 45).unwrap();
        let path = ledger.export_to_file_at(dir.path(), now).unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with("books_data_20240215_153045.xlsx"));
        assert_eq!(ledger.entries(), before.as_slice());
    }

    #[test]
    fn export_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // A regular file where the directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let ledger = ledger();
        let err = ledger.export_to_file(&blocker.join("sub")).unwrap_err();
        assert_eq!(err.kind(), "export_io");
    }
}
