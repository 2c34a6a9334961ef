//! # Error Types
//!
//! Structured errors for the registry core, built with `thiserror`.
//!
//! [`PnumError`] is part of the external contract: its `Display` text is the
//! exact reason string returned to API clients, so the wording must not change.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a candidate personal number is rejected.
///
/// Checks run in a fixed order (characters, length, date of birth) and the
/// first failing check determines the variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PnumError {
    /// The trimmed input is empty or contains a character that is not an
    /// ASCII decimal digit.
    #[error("The input personal number contains invalid characters.")]
    InvalidCharacters,

    /// The trimmed input consists of digits but is not exactly 11 long.
    #[error("The input personal numbers must contain 11 digits.")]
    InvalidLength,

    /// The day, month and two-digit year do not form a calendar date.
    #[error("The input personal numbers contains an invalid date of birth.")]
    InvalidDateOfBirth,
}

impl PnumError {
    /// The fixed, human-readable reason string for this error.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Errors loading a dataset from the backing store.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Read {
        /// Location of the backing store.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strings_are_verbatim() {
        assert_eq!(
            PnumError::InvalidCharacters.reason(),
            "The input personal number contains invalid characters."
        );
        assert_eq!(
            PnumError::InvalidLength.reason(),
            "The input personal numbers must contain 11 digits."
        );
        assert_eq!(
            PnumError::InvalidDateOfBirth.reason(),
            "The input personal numbers contains an invalid date of birth."
        );
    }

    #[test]
    fn dataset_read_error_mentions_path() {
        let err = DatasetError::Read {
            path: PathBuf::from("/srv/pnr.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("/srv/pnr.txt"));
        assert!(msg.contains("no such file"));
    }
}
