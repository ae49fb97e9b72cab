//! Calendar date ranges for stays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a date range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    /// Check-out must be strictly after check-in.
    #[error("check-out date {check_out} must be after check-in date {check_in}")]
    NotAfterCheckIn {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// A half-open stay interval `[check_in, check_out)`.
///
/// The check-out day is not slept in, so it is excluded both from pricing
/// (nights) and from availability overlap: a stay ending on a date does not
/// conflict with one starting the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting empty or inverted intervals.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, DateRangeError> {
        if check_out <= check_in {
            return Err(DateRangeError::NotAfterCheckIn {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// The first night of the stay.
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// The day the stay ends (exclusive).
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights: whole days from check-in (inclusive) to check-out
    /// (exclusive). Always at least 1.
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }

    /// Half-open interval overlap test.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.check_in, self.check_out)
    }
}
