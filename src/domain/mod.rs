//! Domain models for Book Lister
//!
//! Contains the entry validation and SKU rules. File output is delegated
//! to the storage layer.

mod entry;
mod ledger;
mod location;

pub use entry::{derive_sku, BookEntry, Condition};
pub use ledger::{
    AddedEntry, InventoryLedger, LedgerConfig, LedgerError, RowParity, DEFAULT_THROWAWAY_ISBNS,
};
pub use location::{is_valid_location, Location, LocationError, MAX_SHELF, MIN_SHELF};
