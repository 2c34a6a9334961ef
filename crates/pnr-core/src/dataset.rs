//! # Dataset
//!
//! A snapshot of the line-oriented backing store. The first line is a header
//! and is discarded; every following line is one raw candidate pnum, kept
//! exactly as read (surrounding whitespace included). Blank lines are rows
//! too and count as invalid candidates.

use std::path::Path;

use crate::error::DatasetError;

/// Raw rows of the registry, header removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<String>,
}

impl Dataset {
    /// Build a dataset from file contents, dropping the first line.
    pub fn parse(contents: &str) -> Self {
        Self {
            rows: contents.lines().skip(1).map(str::to_owned).collect(),
        }
    }

    /// Build a dataset from rows that already exclude the header.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    /// Read and parse a dataset file synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Read`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::parse(&contents);
        tracing::debug!(path = %path.display(), rows = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Iterate raw rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(String::as_str)
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
