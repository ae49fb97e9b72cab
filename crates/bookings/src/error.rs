//! Booking Store error types.

use common::{BookingId, ListingId};
use thiserror::Error;

/// Errors that can occur during booking operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    /// No booking exists with the id.
    #[error("booking {0} not found")]
    NotFound(BookingId),

    /// The requested dates collide with an existing booking. Raised by the
    /// conditional insert, so it is authoritative — not just advisory.
    #[error("listing {listing_id} is unavailable for the requested dates")]
    ListingUnavailable { listing_id: ListingId },

    /// The store itself could not be reached.
    #[error("booking store unavailable: {0}")]
    Unavailable(String),
}
