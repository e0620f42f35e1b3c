//! # Temporal Types — Strict Calendar Dates
//!
//! Defines [`SkipDay`], a calendar date on which the rollout must not
//! advance.
//!
//! ## Format Invariant
//!
//! Only the ISO-8601 extended calendar form `YYYY-MM-DD` is accepted, with
//! zero-padded month and day. The date must exist: `2024-02-30` is rejected
//! as firmly as `Feb 2 2024`. There is no lenient fallback, because a
//! mistyped skip day silently turning into a rollout day is exactly the
//! failure this type exists to prevent.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical textual form.
pub const SKIP_DAY_FORMAT: &str = "%Y-%m-%d";

/// A calendar date listed in `rollout.skip_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkipDay(NaiveDate);

/// Why a string is not a valid skip day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipDayError {
    /// Not shaped like `YYYY-MM-DD`.
    #[error("expected a date in YYYY-MM-DD form, got {0:?}")]
    Format(String),
    /// Shaped correctly but no such calendar date.
    #[error("{0:?} is not a valid calendar date")]
    NoSuchDate(String),
    /// The year needs more or fewer than four digits to write down.
    #[error("year {0} cannot be written as YYYY")]
    YearOutOfRange(i32),
}

/// Years representable in `YYYY` form.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

impl SkipDay {
    /// Wrap a date.
    ///
    /// # Errors
    ///
    /// Returns [`SkipDayError::YearOutOfRange`] when the year falls outside
    /// `0000..=9999`, which `YYYY` cannot express.
    pub fn from_date(date: NaiveDate) -> Result<Self, SkipDayError> {
        if YEAR_RANGE.contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(SkipDayError::YearOutOfRange(date.year()))
        }
    }

    /// Parse a strict `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`SkipDayError::Format`] when the text is not exactly ten
    /// characters of the form `DDDD-DD-DD`, and [`SkipDayError::NoSuchDate`]
    /// when it names a date that does not exist.
    pub fn parse(s: &str) -> Result<Self, SkipDayError> {
        if !has_iso_date_shape(s) {
            return Err(SkipDayError::Format(s.to_string()));
        }
        NaiveDate::parse_from_str(s, SKIP_DAY_FORMAT)
            .map(Self)
            .map_err(|_| SkipDayError::NoSuchDate(s.to_string()))
    }

    /// Access the inner date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso8601(&self) -> String {
        // chrono's %Y does not zero-pad years below 1000.
        format!("{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

/// `DDDD-DD-DD`, ASCII digits only.
fn has_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl FromStr for SkipDay {
    type Err = SkipDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SkipDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl TryFrom<NaiveDate> for SkipDay {
    type Error = SkipDayError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_date(date)
    }
}

impl Serialize for SkipDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for SkipDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
