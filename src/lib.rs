//! Book Lister - record book inventory entries and export them to a spreadsheet
//!
//! Entries (ISBN, condition, shelf location, quantity) are validated and
//! collected in an [`InventoryLedger`] for the session, then written to an
//! `.xlsx` file on request. The CLI provides an interactive terminal form
//! and a batch mode on top of the ledger.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{BookEntry, Condition, InventoryLedger, LedgerConfig, LedgerError, Location};
