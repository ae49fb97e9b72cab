//! Derived booking status.

use chrono::NaiveDate;
use common::DateRange;
use serde::{Deserialize, Serialize};

/// Where a booking stands relative to a given day.
///
/// Status is a pure function of (day, check-in, check-out) evaluated at read
/// time — it is never stored, so it cannot drift from the dates. `Cancelled`
/// exists in the vocabulary but is never derived: there is no cancellation
/// path, bookings are immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// The stay has not ended yet.
    Upcoming,
    /// The stay is over.
    Completed,
    /// Reserved for a future cancellation path.
    Cancelled,
}

impl BookingStatus {
    /// Derives the status of a stay as seen on `today`.
    pub fn derive(dates: &DateRange, today: NaiveDate) -> Self {
        if today < dates.check_out() {
            BookingStatus::Upcoming
        } else {
            BookingStatus::Completed
        }
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Upcoming => "UPCOMING",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(check_in: &str, check_out: &str) -> DateRange {
        DateRange::new(check_in.parse().unwrap(), check_out.parse().unwrap()).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn future_stay_is_upcoming() {
        let dates = range("2024-06-10", "2024-06-12");
        assert_eq!(
            BookingStatus::derive(&dates, day("2024-06-01")),
            BookingStatus::Upcoming
        );
    }

    #[test]
    fn stay_in_progress_is_still_upcoming() {
        let dates = range("2024-06-10", "2024-06-12");
        assert_eq!(
            BookingStatus::derive(&dates, day("2024-06-11")),
            BookingStatus::Upcoming
        );
    }

    #[test]
    fn stay_completes_on_check_out_day() {
        let dates = range("2024-06-10", "2024-06-12");
        assert_eq!(
            BookingStatus::derive(&dates, day("2024-06-12")),
            BookingStatus::Completed
        );
        assert_eq!(
            BookingStatus::derive(&dates, day("2024-07-01")),
            BookingStatus::Completed
        );
    }

    #[test]
    fn wire_format_is_screaming() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Upcoming).unwrap(),
            "\"UPCOMING\""
        );
        assert_eq!(BookingStatus::Cancelled.to_string(), "CANCELLED");
    }
}
