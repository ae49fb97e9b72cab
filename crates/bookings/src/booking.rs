//! Booking records.

use chrono::NaiveDate;
use common::{BookingId, DateRange, ListingId, Money, UserId};
use federation::EntityRef;
use serde::{Deserialize, Serialize};

use crate::status::BookingStatus;

/// A booking record as owned by the Booking Store.
///
/// `listing_id` and `guest_id` are references; the records behind them are
/// owned elsewhere and only ever leave this service as stubs. `total_cost`
/// is the price quoted when the booking was created and never changes, even
/// if the listing is re-priced later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub listing_id: ListingId,
    pub guest_id: UserId,
    #[serde(flatten)]
    pub dates: DateRange,
    pub total_cost: Money,
}

impl Booking {
    /// The first night of the stay.
    pub fn check_in(&self) -> NaiveDate {
        self.dates.check_in()
    }

    /// The day the stay ends (exclusive).
    pub fn check_out(&self) -> NaiveDate {
        self.dates.check_out()
    }

    /// Status of this booking as seen on `today`.
    pub fn status_on(&self, today: NaiveDate) -> BookingStatus {
        BookingStatus::derive(&self.dates, today)
    }

    /// Stub for the listing this booking is for.
    pub fn listing_ref(&self) -> EntityRef {
        EntityRef::listing(&self.listing_id)
    }

    /// Stub for the guest who booked.
    pub fn guest_ref(&self) -> EntityRef {
        EntityRef::guest(&self.guest_id)
    }
}

/// Input to booking creation.
///
/// The cost arrives already quoted; the store snapshots it verbatim. Date
/// validity (`check_in < check_out`) is guaranteed by the [`DateRange`] type
/// before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub listing_id: ListingId,
    pub guest_id: UserId,
    pub dates: DateRange,
    pub total_cost: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Booking {
        Booking {
            id: BookingId::new("booking-1"),
            listing_id: ListingId::new("listing-1"),
            guest_id: UserId::new("user-2"),
            dates: DateRange::new(
                "2024-06-10".parse().unwrap(),
                "2024-06-12".parse().unwrap(),
            )
            .unwrap(),
            total_cost: Money::from_credits(80),
        }
    }

    #[test]
    fn refs_point_at_foreign_owners() {
        let b = booking();
        assert_eq!(b.listing_ref().id, "listing-1");
        assert_eq!(b.listing_ref().entity_type.as_str(), "Listing");
        assert_eq!(b.guest_ref().id, "user-2");
        assert_eq!(b.guest_ref().entity_type.as_str(), "Guest");
    }

    #[test]
    fn dates_flatten_onto_the_record() {
        let json = serde_json::to_value(booking()).unwrap();
        assert_eq!(json["check_in"], "2024-06-10");
        assert_eq!(json["check_out"], "2024-06-12");
        assert_eq!(json["total_cost"], 80);
    }

    #[test]
    fn status_tracks_the_calendar() {
        let b = booking();
        assert_eq!(
            b.status_on("2024-06-01".parse().unwrap()),
            BookingStatus::Upcoming
        );
        assert_eq!(
            b.status_on("2024-06-12".parse().unwrap()),
            BookingStatus::Completed
        );
    }
}
