//! Review Store error types.

use common::BookingId;
use thiserror::Error;

use crate::review::ReviewTarget;

/// Errors that can occur during review operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// A review already exists for this booking and target.
    #[error("booking {booking_id} already has a {target_type} review")]
    DuplicateReview {
        booking_id: BookingId,
        target_type: ReviewTarget,
    },

    /// Ratings run from 1 to 5.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}
