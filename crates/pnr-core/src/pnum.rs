//! # Personal Number Validation
//!
//! A personal number ("pnum") is 11 ASCII digits laid out as:
//!
//! ```text
//!  D D M M Y Y I I I C C
//!  └─┘ └─┘ └─┘ └───┘ └─┘
//!  day mon  yy  indiv ctrl
//! ```
//!
//! The ninth digit (index 8, last of the individual block) encodes gender.
//! Control digits are carried but never checked; there is no modulo-11
//! checksum validation.
//!
//! ## Validation Order
//!
//! 1. Every character of the trimmed input is an ASCII digit (the empty
//!    string fails here).
//! 2. The trimmed input is exactly [`PNUM_LENGTH`] long.
//! 3. (day, month, literal two-digit year) is a calendar date.
//!
//! Surrounding whitespace is trimmed first and is never itself an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PnumError;

/// Number of digits in a personal number.
pub const PNUM_LENGTH: usize = 11;

/// A validated personal number.
///
/// Holds the trimmed input. Construction goes through [`Pnum::parse`], so
/// every `Pnum` satisfies the digit, length, and date invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pnum(String);

impl Pnum {
    /// Parse and validate a raw candidate, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`PnumError`].
    pub fn parse(raw: &str) -> Result<Self, PnumError> {
        let s = raw.trim();

        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PnumError::InvalidCharacters);
        }
        if s.len() != PNUM_LENGTH {
            return Err(PnumError::InvalidLength);
        }

        let day = two_digits(s, 0);
        let month = two_digits(s, 2);
        let year = two_digits(s, 4);
        if !is_calendar_date(day, month, year) {
            return Err(PnumError::InvalidDateOfBirth);
        }

        Ok(Self(s.to_string()))
    }

    /// Access the trimmed digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Day of birth (1-31).
    pub fn day(&self) -> u32 {
        two_digits(&self.0, 0)
    }

    /// Month of birth (1-12).
    pub fn month(&self) -> u32 {
        two_digits(&self.0, 2)
    }

    /// Two-digit year of birth (1-99).
    pub fn two_digit_year(&self) -> u32 {
        two_digits(&self.0, 4)
    }

    /// The three-digit individual number block.
    pub fn individual_number(&self) -> &str {
        &self.0[6..9]
    }

    /// The two trailing control digits.
    pub fn control_digits(&self) -> &str {
        &self.0[9..11]
    }

    /// The digit that encodes gender (index 8).
    pub fn gender_digit(&self) -> u32 {
        digit_at(&self.0, 8)
    }
}

/// Validate a raw candidate without keeping the parsed value.
///
/// Equivalent to `Pnum::parse(raw).map(|_| ())`.
pub fn validate(raw: &str) -> Result<(), PnumError> {
    Pnum::parse(raw).map(|_| ())
}

impl std::fmt::Display for Pnum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Pnum {
    type Err = PnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Pnum {
    type Error = PnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pnum> for String {
    fn from(pnum: Pnum) -> Self {
        pnum.0
    }
}

/// Caller guarantees `s[idx]` is an ASCII digit.
fn digit_at(s: &str, idx: usize) -> u32 {
    u32::from(s.as_bytes()[idx] - b'0')
}

fn two_digits(s: &str, idx: usize) -> u32 {
    digit_at(s, idx) * 10 + digit_at(s, idx + 1)
}

/// Literal-year calendar check. Year 00 has no counterpart in the
/// Gregorian calendar and is rejected.
fn is_calendar_date(day: u32, month: u32, year: u32) -> bool {
    year >= 1 && NaiveDate::from_ymd_opt(year as i32, month, day).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_pnum() {
        let pnum = Pnum::parse("24129745378").unwrap();
        assert_eq!(pnum.as_str(), "24129745378");
        assert_eq!(pnum.day(), 24);
        assert_eq!(pnum.month(), 12);
        assert_eq!(pnum.two_digit_year(), 97);
        assert_eq!(pnum.individual_number(), "453");
        assert_eq!(pnum.control_digits(), "78");
        assert_eq!(pnum.gender_digit(), 3);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let pnum = Pnum::parse(" 24129745378  \n").unwrap();
        assert_eq!(pnum.as_str(), "24129745378");
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(Pnum::parse("4-129745378"), Err(PnumError::InvalidCharacters));
        assert_eq!(Pnum::parse("+2412974537"), Err(PnumError::InvalidCharacters));
        assert_eq!(Pnum::parse("2412 9745378"), Err(PnumError::InvalidCharacters));
        assert_eq!(Pnum::parse("abc"), Err(PnumError::InvalidCharacters));
    }

    #[test]
    fn non_ascii_decimal_digits_are_rejected() {
        // Full-width and Arabic-Indic digits are Unicode decimals, not ASCII.
        assert_eq!(
            Pnum::parse("２４１２９７４５３７８"),
            Err(PnumError::InvalidCharacters)
        );
        assert_eq!(
            Pnum::parse("٢٤١٢٩٧٤٥٣٧٨"),
            Err(PnumError::InvalidCharacters)
        );
        assert_eq!(
            Pnum::parse("2412974537８"),
            Err(PnumError::InvalidCharacters)
        );
    }

    #[test]
    fn empty_and_blank_are_character_errors() {
        assert_eq!(Pnum::parse(""), Err(PnumError::InvalidCharacters));
        assert_eq!(Pnum::parse("   "), Err(PnumError::InvalidCharacters));
    }

    #[test]
    fn character_check_wins_over_length() {
        assert_eq!(Pnum::parse("4-1"), Err(PnumError::InvalidCharacters));
        assert_eq!(
            Pnum::parse("4-12974537812345"),
            Err(PnumError::InvalidCharacters)
        );
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(Pnum::parse("224129745378"), Err(PnumError::InvalidLength));
        assert_eq!(Pnum::parse("4129745378"), Err(PnumError::InvalidLength));
        assert_eq!(Pnum::parse("2412974547"), Err(PnumError::InvalidLength));
    }

    #[test]
    fn length_check_wins_over_date() {
        // 99/99 is not a date, but the length is wrong first.
        assert_eq!(Pnum::parse("999999"), Err(PnumError::InvalidLength));
    }

    #[test]
    fn rejects_impossible_day() {
        assert_eq!(
            Pnum::parse("32122445378"),
            Err(PnumError::InvalidDateOfBirth)
        );
        assert_eq!(
            Pnum::parse("00122445378"),
            Err(PnumError::InvalidDateOfBirth)
        );
    }

    #[test]
    fn rejects_impossible_month() {
        assert_eq!(
            Pnum::parse("24132445378"),
            Err(PnumError::InvalidDateOfBirth)
        );
        assert_eq!(
            Pnum::parse("24002445378"),
            Err(PnumError::InvalidDateOfBirth)
        );
    }

    #[test]
    fn february_30_is_never_valid() {
        assert_eq!(
            Pnum::parse("30029745378"),
            Err(PnumError::InvalidDateOfBirth)
        );
    }

    #[test]
    fn leap_day_follows_literal_year() {
        assert!(Pnum::parse("29029645378").is_ok()); // 96 is a leap year
        assert_eq!(
            Pnum::parse("29029745378"),
            Err(PnumError::InvalidDateOfBirth)
        );
    }

    #[test]
    fn year_zero_is_rejected() {
        assert_eq!(
            Pnum::parse("01010045378"),
            Err(PnumError::InvalidDateOfBirth)
        );
    }

    #[test]
    fn validate_matches_parse() {
        assert!(validate("24129745378").is_ok());
        assert_eq!(validate("4-129745378"), Err(PnumError::InvalidCharacters));
    }

    #[test]
    fn from_str_and_display() {
        let pnum: Pnum = "24129745478".parse().unwrap();
        assert_eq!(pnum.to_string(), "24129745478");
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: Pnum = serde_json::from_str("\"24129745378\"").unwrap();
        assert_eq!(ok.as_str(), "24129745378");
        assert!(serde_json::from_str::<Pnum>("\"32122445378\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"24129745378\"");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Digit strings of the wrong length always fail on length.
        #[test]
        fn wrong_length_digits_are_length_errors(s in "[0-9]{1,30}") {
            prop_assume!(s.len() != PNUM_LENGTH);
            prop_assert_eq!(Pnum::parse(&s), Err(PnumError::InvalidLength));
        }

        /// Any non-digit character takes priority over every other check.
        #[test]
        fn non_digit_always_character_error(
            prefix in "[0-9]{0,12}",
            bad in "[a-zA-Z\\-+./_]",
            suffix in "[0-9]{0,12}",
        ) {
            let s = format!("{prefix}{bad}{suffix}");
            prop_assert_eq!(Pnum::parse(&s), Err(PnumError::InvalidCharacters));
        }

        /// Whitespace padding never changes the outcome.
        #[test]
        fn padding_is_irrelevant(s in "[0-9]{11}", left in "[ \t]{0,3}", right in "[ \t\n]{0,3}") {
            let padded = format!("{left}{s}{right}");
            prop_assert_eq!(Pnum::parse(&padded), Pnum::parse(&s));
        }
    }
}
