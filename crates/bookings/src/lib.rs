//! Booking Store service.
//!
//! Owns booking records. A booking references its listing and guest by id
//! only; the records behind those ids belong to other services. Availability
//! for a listing is computed here by scanning its existing bookings, and
//! booking creation performs the same overlap check atomically with the
//! insert so that two conflicting bookings cannot both land.

pub mod booking;
pub mod dates;
pub mod error;
pub mod status;
pub mod store;

pub use booking::{Booking, CreateBooking};
pub use dates::human_readable_date;
pub use error::BookingError;
pub use status::BookingStatus;
pub use store::{BookingStore, InMemoryBookingStore};
