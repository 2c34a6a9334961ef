//! # Demographic Derivation
//!
//! Gender and age derived from a validated [`Pnum`].
//!
//! ## Century Resolution
//!
//! A pnum carries only a two-digit year. It is resolved against the
//! reference date: with `cc` = the reference year modulo 100, a two-digit
//! year `yy <= cc` resolves to `2000 + yy`, otherwise to `1900 + yy`.
//!
//! This mis-dates anyone born more than a century before the reference
//! date (a 1924 birth seen from 2026 resolves to 2024). The rule is kept
//! as-is; consumers of the `/age` endpoint depend on it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pnum::Pnum;

/// Gender encoded by the ninth digit of a pnum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Odd ninth digit.
    Male,
    /// Even ninth digit.
    Female,
}

impl Gender {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender of the holder: female if the digit at index 8 is even, male if odd.
pub fn gender(pnum: &Pnum) -> Gender {
    if pnum.gender_digit() % 2 == 0 {
        Gender::Female
    } else {
        Gender::Male
    }
}

/// Resolve a two-digit year to a full year relative to `today`.
pub fn resolve_birth_year(two_digit_year: u32, today: NaiveDate) -> i32 {
    let current_yy = today.year().rem_euclid(100);
    let yy = two_digit_year as i32;
    if yy <= current_yy {
        2000 + yy
    } else {
        1900 + yy
    }
}

/// Full date of birth after century resolution.
///
/// Leap years agree between the literal year (1..=99) and 1900/2000 + yy,
/// so this is `Some` for every validated pnum.
pub fn birth_date(pnum: &Pnum, today: NaiveDate) -> Option<NaiveDate> {
    let year = resolve_birth_year(pnum.two_digit_year(), today);
    NaiveDate::from_ymd_opt(year, pnum.month(), pnum.day())
}

/// Age in whole years on `today`.
///
/// Computed as the year difference minus one when today's (month, day) is
/// before the birthday. A birthday later in the current year would yield
/// -1 and is clamped to 0.
pub fn age(pnum: &Pnum, today: NaiveDate) -> u32 {
    let birth_year = resolve_birth_year(pnum.two_digit_year(), today);
    let mut years = today.year() - birth_year;
    if (today.month(), today.day()) < (pnum.month(), pnum.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pnum(s: &str) -> Pnum {
        Pnum::parse(s).unwrap()
    }

    /// Reference date the historical API fixtures were recorded against.
    fn reference() -> NaiveDate {
        date(2023, 6, 15)
    }

    #[test]
    fn odd_ninth_digit_is_male() {
        assert_eq!(gender(&pnum("24129745378")), Gender::Male);
    }

    #[test]
    fn even_ninth_digit_is_female() {
        assert_eq!(gender(&pnum("24129745478")), Gender::Female);
    }

    #[test]
    fn zero_is_even() {
        assert_eq!(gender(&pnum("24129745078")), Gender::Female);
    }

    #[test]
    fn gender_wire_names() {
        assert_eq!(Gender::Male.to_string(), "male");
        assert_eq!(Gender::Female.to_string(), "female");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
    }

    #[test]
    fn age_before_birthday() {
        assert_eq!(age(&pnum("24129745378"), reference()), 25);
    }

    #[test]
    fn age_after_birthday() {
        assert_eq!(age(&pnum("24019745478"), reference()), 26);
    }

    #[test]
    fn age_on_birthday() {
        assert_eq!(age(&pnum("15069745378"), reference()), 26);
        assert_eq!(age(&pnum("16069745378"), reference()), 25);
    }

    #[test]
    fn future_two_digit_year_resolves_to_1900s() {
        // yy = 24 > 23, so 1924; birthday not yet reached in June.
        assert_eq!(age(&pnum("24122445478"), reference()), 98);
    }

    #[test]
    fn current_two_digit_year_resolves_to_2000s() {
        assert_eq!(resolve_birth_year(23, reference()), 2023);
        assert_eq!(resolve_birth_year(24, reference()), 1924);
        assert_eq!(resolve_birth_year(1, reference()), 2001);
    }

    #[test]
    fn birthday_later_this_year_clamps_to_zero() {
        assert_eq!(age(&pnum("24122345478"), reference()), 0);
    }

    #[test]
    fn birth_date_is_resolved() {
        assert_eq!(
            birth_date(&pnum("24129745378"), reference()),
            Some(date(1997, 12, 24))
        );
        assert_eq!(
            birth_date(&pnum("29020445378"), reference()),
            Some(date(2004, 2, 29))
        );
    }
}
