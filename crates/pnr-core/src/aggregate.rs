//! # Aggregation
//!
//! Counts and grouped tallies over a [`Dataset`]. Every data row is
//! classified with [`Pnum::parse`]; only valid rows are derived further.
//!
//! ## Age Groups
//!
//! Eleven contiguous bins, left-inclusive and right-exclusive, the last one
//! open-ended:
//!
//! ```text
//! [0,10) [10,20) [20,30) ... [80,90) [90,100) [100,∞)
//! ```
//!
//! ## Ordering
//!
//! [`GroupTally`] keeps entries in discovery order (the order in which a
//! key was first seen during the scan). It is neither sorted by label nor
//! by age.

use chrono::NaiveDate;

use crate::dataset::Dataset;
use crate::demographics::{age, gender, Gender};
use crate::pnum::Pnum;

/// One of the eleven fixed age bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeGroup {
    /// 0-9 years.
    Under10,
    /// 10-19 years.
    Teens,
    /// 20-29 years.
    Twenties,
    /// 30-39 years.
    Thirties,
    /// 40-49 years.
    Forties,
    /// 50-59 years.
    Fifties,
    /// 60-69 years.
    Sixties,
    /// 70-79 years.
    Seventies,
    /// 80-89 years.
    Eighties,
    /// 90-99 years.
    Nineties,
    /// 100 years and above.
    Centenarian,
}

impl AgeGroup {
    /// All bins in ascending age order.
    pub const ALL: [AgeGroup; 11] = [
        Self::Under10,
        Self::Teens,
        Self::Twenties,
        Self::Thirties,
        Self::Forties,
        Self::Fifties,
        Self::Sixties,
        Self::Seventies,
        Self::Eighties,
        Self::Nineties,
        Self::Centenarian,
    ];

    /// The bin containing `age`.
    pub fn from_age(age: u32) -> Self {
        let idx = (age / 10).min(10) as usize;
        Self::ALL[idx]
    }

    /// Fixed display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Under10 => "0 - 9 years",
            Self::Teens => "10 - 19 years",
            Self::Twenties => "20 - 29 years",
            Self::Thirties => "30 - 39 years",
            Self::Forties => "40 - 49 years",
            Self::Fifties => "50 - 59 years",
            Self::Sixties => "60 - 69 years",
            Self::Seventies => "70 - 79 years",
            Self::Eighties => "80 - 89 years",
            Self::Nineties => "90 - 99 years",
            Self::Centenarian => "Above 100 years",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Composite grouping key.
///
/// Displays as `('<label>', '<gender>')`, the wire shape of the
/// `listbygroups` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// Age bin.
    pub age_group: AgeGroup,
    /// Gender.
    pub gender: Gender,
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "('{}', '{}')", self.age_group.label(), self.gender.as_str())
    }
}

/// A valid row with its derived demographics. Lives only for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    /// The validated identifier.
    pub pnum: Pnum,
    /// Age on the reference date.
    pub age: u32,
    /// Derived gender.
    pub gender: Gender,
    /// Bin for `age`.
    pub age_group: AgeGroup,
}

impl PersonRecord {
    /// Derive a record for `pnum` on `today`.
    pub fn derive(pnum: Pnum, today: NaiveDate) -> Self {
        let age = age(&pnum, today);
        let gender = gender(&pnum);
        Self {
            pnum,
            age,
            gender,
            age_group: AgeGroup::from_age(age),
        }
    }

    /// Grouping key for this record.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            age_group: self.age_group,
            gender: self.gender,
        }
    }
}

/// Headline counts over a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PnumCounts {
    /// All data rows; always `valid + invalid`.
    pub total: u64,
    /// Rows that pass validation.
    pub valid: u64,
    /// Rows that fail validation.
    pub invalid: u64,
    /// Valid rows with a male gender digit.
    pub male: u64,
    /// Valid rows with a female gender digit.
    pub female: u64,
}

/// Tally of `(age group, gender)` keys in discovery order.
///
/// Only keys that were seen at least once are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTally {
    entries: Vec<(GroupKey, u64)>,
}

impl GroupTally {
    /// Increment the count for `key`, appending it if new.
    pub fn record(&mut self, key: GroupKey) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    /// Count for `key`, zero if never seen.
    pub fn get(&self, key: &GroupKey) -> u64 {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, c)| *c)
    }

    /// Iterate `(key, count)` in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derived records for every valid row, in file order.
pub fn person_records(dataset: &Dataset, today: NaiveDate) -> impl Iterator<Item = PersonRecord> + '_ {
    dataset
        .rows()
        .filter_map(|row| Pnum::parse(row).ok())
        .map(move |pnum| PersonRecord::derive(pnum, today))
}

/// Count total, valid, invalid, male, and female rows.
pub fn count_all(dataset: &Dataset) -> PnumCounts {
    let mut counts = PnumCounts::default();
    for row in dataset.rows() {
        match Pnum::parse(row) {
            Ok(pnum) => {
                counts.valid += 1;
                match gender(&pnum) {
                    Gender::Male => counts.male += 1,
                    Gender::Female => counts.female += 1,
                }
            }
            Err(_) => counts.invalid += 1,
        }
    }
    counts.total = counts.valid + counts.invalid;
    counts
}

/// Tally valid rows by `(age group, gender)` as of `today`.
pub fn group_by_age_and_gender(dataset: &Dataset, today: NaiveDate) -> GroupTally {
    let mut tally = GroupTally::default();
    for record in person_records(dataset, today) {
        tally.record(record.group_key());
    }
    tally
}

/// Whether the trimmed input equals some trimmed data row.
///
/// Plain string equality: the input need not be a valid pnum.
pub fn is_registered(raw: &str, dataset: &Dataset) -> bool {
    let needle = raw.trim();
    dataset.rows().any(|row| row.trim() == needle)
}
