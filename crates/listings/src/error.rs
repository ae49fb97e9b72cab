//! Listing Directory error types.

use common::{ListingId, UserId};
use thiserror::Error;

/// Errors that can occur during listing operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    /// No listing exists with the id.
    #[error("listing {0} not found")]
    NotFound(ListingId),

    /// A mutation targeted a listing the requesting host does not own.
    #[error("listing {listing_id} does not belong to host {host_id}")]
    NotOwnedByHost {
        listing_id: ListingId,
        host_id: UserId,
    },

    /// An amenity id outside the directory's catalog was requested.
    #[error("unknown amenity {0}")]
    UnknownAmenity(String),

    /// The directory itself could not be reached.
    #[error("listing directory unavailable: {0}")]
    Unavailable(String),
}
