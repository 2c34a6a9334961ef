#![deny(missing_docs)]

//! # pnr-core — Personal Number Registry Core
//!
//! Validation, demographic derivation, and aggregation over a flat-file
//! registry of 11-digit personal numbers ("pnums"). This crate has no HTTP
//! dependencies; the API layer in `pnr-api` is a thin adapter around it.
//!
//! ## Data Flow
//!
//! ```text
//! raw line ─► Pnum::parse ─► (valid subset) ─► gender / age ─► aggregate
//! ```
//!
//! ## Design Principles
//!
//! 1. **Validated newtype.** A [`Pnum`] can only be obtained through
//!    [`Pnum::parse`], so derivation functions never see invalid input and
//!    never re-validate.
//!
//! 2. **Fixed check order.** Character class, then length, then date of
//!    birth. The first failing check decides the reported [`PnumError`].
//!
//! 3. **No caching.** A [`Dataset`] is a snapshot of the backing store taken
//!    by the caller; aggregation functions are pure over that snapshot.

pub mod aggregate;
pub mod dataset;
pub mod demographics;
pub mod error;
pub mod pnum;

// Re-export primary types at crate root for ergonomic imports.
pub use aggregate::{
    count_all, group_by_age_and_gender, is_registered, person_records, AgeGroup, GroupKey,
    GroupTally, PersonRecord, PnumCounts,
};
pub use dataset::Dataset;
pub use demographics::{age, birth_date, gender, resolve_birth_year, Gender};
pub use error::{DatasetError, PnumError};
pub use pnum::{validate, Pnum, PNUM_LENGTH};
