//! # API Route Modules
//!
//! - `pnums` — validation, age/gender derivation, registry membership, and
//!   aggregate counts over the registry file.

pub mod pnums;
