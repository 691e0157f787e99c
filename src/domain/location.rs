//! Shelf location codes
//!
//! Location Format: one letter followed by three digits, e.g. `A050`.
//! - Letter: `A`-`Z`, case-insensitive, stored uppercase
//! - Number: `001`-`200`, always written zero-padded to three digits

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest shelf number accepted in a location code
pub const MIN_SHELF: u16 = 1;

/// Highest shelf number accepted in a location code
pub const MAX_SHELF: u16 = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Invalid location '{0}': expected 4 characters like 'A050'")]
    WrongLength(String),

    #[error("Invalid location '{0}': must start with a letter A-Z")]
    BadLetter(String),

    #[error("Invalid location '{0}': must end with three digits")]
    BadNumber(String),

    #[error("Invalid location '{0}': shelf number must be between 001 and 200")]
    OutOfRange(String),
}

/// A validated shelf location such as `A050`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    letter: char,
    shelf: u16,
}

impl Location {
    /// Builds a location from its parts, checking both ranges
    pub fn new(letter: char, shelf: u16) -> Option<Self> {
        let letter = letter.to_ascii_uppercase();
        if letter.is_ascii_uppercase() && (MIN_SHELF..=MAX_SHELF).contains(&shelf) {
            Some(Self { letter, shelf })
        } else {
            None
        }
    }

    /// Returns the aisle letter (always uppercase)
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Returns the shelf number
    pub fn shelf(&self) -> u16 {
        self.shelf
    }
}

/// Returns true if `s` is a well-formed location code
pub fn is_valid_location(s: &str) -> bool {
    s.parse::<Location>().is_ok()
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.letter, self.shelf)
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(LocationError::WrongLength(s.to_string()));
        }

        let letter = chars[0].to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(LocationError::BadLetter(s.to_string()));
        }

        if !chars[1..].iter().all(|c| c.is_ascii_digit()) {
            return Err(LocationError::BadNumber(s.to_string()));
        }

        // Three ASCII digits always fit in a u16
        let shelf: u16 = chars[1..]
            .iter()
            .filter_map(|c| c.to_digit(10))
            .fold(0, |acc, d| acc * 10 + d as u16);

        Location::new(letter, shelf).ok_or_else(|| LocationError::OutOfRange(s.to_string()))
    }
}

impl TryFrom<String> for Location {
    type Error = LocationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_valid_location() {
        let loc: Location = "A050".parse().unwrap();
        assert_eq!(loc.letter(), 'A');
        assert_eq!(loc.shelf(), 50);
        assert_eq!(loc.to_string(), "A050");
    }

    #[test]
    fn lowercase_letter_is_normalized() {
        let loc: Location = "b010".parse().unwrap();
        assert_eq!(loc.to_string(), "B010");
    }

    #[test]
    fn range_boundaries() {
        assert!(is_valid_location("Z001"));
        assert!(is_valid_location("Z200"));
        assert!(!is_valid_location("Z000"));
        assert!(!is_valid_location("Z201"));
        assert!(!is_valid_location("Z999"));
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        assert_eq!(
            "A50".parse::<Location>(),
            Err(LocationError::WrongLength("A50".to_string()))
        );
        assert_eq!(
            "A0500".parse::<Location>(),
            Err(LocationError::WrongLength("A0500".to_string()))
        );
        assert_eq!(
            "1050".parse::<Location>(),
            Err(LocationError::BadLetter("1050".to_string()))
        );
        assert_eq!(
            "AB50".parse::<Location>(),
            Err(LocationError::BadNumber("AB50".to_string()))
        );
        assert_eq!(
            "A-50".parse::<Location>(),
            Err(LocationError::BadNumber("A-50".to_string()))
        );
        assert!(!is_valid_location(""));
    }

    #[test]
    fn non_ascii_is_rejected() {
        // Accented letter and full-width digits
        assert!(!is_valid_location("É050"));
        assert!(!is_valid_location("A０５０"));
    }

    #[test]
    fn serde_roundtrip() {
        let loc: Location = "c123".parse().unwrap();
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, "\"C123\"");

        let parsed: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, loc);
    }

    proptest! {
        #[test]
        fn every_letter_and_shelf_in_range_is_valid(
            letter in proptest::char::range('A', 'Z'),
            shelf in MIN_SHELF..=MAX_SHELF,
            lower in any::<bool>(),
        ) {
            let letter = if lower { letter.to_ascii_lowercase() } else { letter };
            let code = format!("{}{:03}", letter, shelf);
            let loc: Location = code.parse().unwrap();
            prop_assert_eq!(loc.to_string(), code.to_ascii_uppercase());
        }

        #[test]
        fn shelf_out_of_range_is_invalid(
            letter in proptest::char::range('A', 'Z'),
            shelf in prop_oneof![Just(0u16), (MAX_SHELF + 1)..1000u16],
        ) {
            let code = format!("{}{:03}", letter, shelf);
            prop_assert!(!is_valid_location(&code));
        }

        #[test]
        fn validity_matches_membership(s in "\\PC{0,6}") {
            let chars: Vec<char> = s.chars().collect();
            let expected = chars.len() == 4
                && chars[0].is_ascii_alphabetic()
                && chars[1..].iter().all(|c| c.is_ascii_digit())
                && {
                    let n: u16 = chars[1..].iter().collect::<String>().parse().unwrap();
                    (1..=200).contains(&n)
                };
            prop_assert_eq!(is_valid_location(&s), expected);
        }
    }
}
