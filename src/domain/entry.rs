//! Book entry domain model
//!
//! A book entry is one validated inventory row. The SKU is always derived
//! from the ISBN and the condition and cannot be set on its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::location::Location;

/// Physical condition of a listed book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    /// All selectable conditions, in display order
    pub const ALL: [Condition; 2] = [Condition::New, Condition::Used];

    /// Returns the display label used in exports and the form
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
        }
    }

    /// Returns the suffix appended to the ISBN to form the SKU
    pub fn sku_suffix(&self) -> &'static str {
        match self {
            Condition::New => "11",
            Condition::Used => "2",
        }
    }

    /// Returns the other condition (used by the form selector)
    pub fn toggle(self) -> Self {
        match self {
            Condition::New => Condition::Used,
            Condition::Used => Condition::New,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            _ => Err(format!("Unknown condition '{}': expected New or Used", s)),
        }
    }
}

/// Derives the SKU for an ISBN in the given condition
pub fn derive_sku(isbn: &str, condition: Condition) -> String {
    format!("{}-{}", isbn, condition.sku_suffix())
}

/// One validated inventory row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookEntry {
    isbn: String,
    sku: String,
    condition: Condition,
    location: Location,
    quantity: u32,
}

impl BookEntry {
    /// Creates an entry from already-validated parts
    pub(crate) fn new(isbn: String, condition: Condition, location: Location, quantity: u32) -> Self {
        let sku = derive_sku(&isbn, condition);
        Self {
            isbn,
            sku,
            condition,
            location,
            quantity,
        }
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
