//! Review Store service.
//!
//! Owns reviews, keyed by the booking they follow and what they review: the
//! guest, the host, or the listing itself. A booking gets at most one review
//! per target, and who wrote a review is derived from the target rather than
//! stored — a review of the guest can only have been written by the host,
//! and reviews of the host or the listing by the guest.

pub mod error;
pub mod review;
pub mod store;

pub use error::ReviewError;
pub use review::{NewReview, Review, ReviewTarget};
pub use store::{InMemoryReviewStore, ReviewStore};
