//! Store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{BookingId, ListingId, ReviewId, UserId};
use federation::{EntityRef, EntityType, FederationError, ReferenceResolver};

use crate::error::ReviewError;
use crate::review::{NewReview, Review, ReviewTarget};

/// The Review Store's operation surface.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Records the host's review of the guest on a booking.
    async fn create_review_for_guest(
        &self,
        booking_id: &BookingId,
        guest_id: &UserId,
        author_id: &UserId,
        review: NewReview,
    ) -> Result<Review, ReviewError>;

    /// Records the guest's review of the host on a booking.
    async fn create_review_for_host(
        &self,
        booking_id: &BookingId,
        host_id: &UserId,
        author_id: &UserId,
        review: NewReview,
    ) -> Result<Review, ReviewError>;

    /// Records the guest's review of the listing on a booking.
    async fn create_review_for_listing(
        &self,
        booking_id: &BookingId,
        listing_id: &ListingId,
        author_id: &UserId,
        review: NewReview,
    ) -> Result<Review, ReviewError>;

    /// The review of the given target on a booking, if one exists.
    async fn get_review_for_booking(
        &self,
        target_type: ReviewTarget,
        booking_id: &BookingId,
    ) -> Result<Option<Review>, ReviewError>;

    /// All reviews of a listing.
    async fn get_reviews_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Review>, ReviewError>;

    /// Mean rating across a host's reviews, if any exist.
    async fn get_overall_rating_for_host(
        &self,
        host_id: &UserId,
    ) -> Result<Option<f64>, ReviewError>;

    /// Mean rating across a listing's reviews, if any exist.
    async fn get_overall_rating_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Option<f64>, ReviewError>;
}

/// In-memory review store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewStore {
    reviews: Arc<RwLock<HashMap<ReviewId, Review>>>,
}

impl InMemoryReviewStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts under the one-review-per-(booking, target) constraint,
    /// checked and applied under a single write guard.
    fn insert(
        &self,
        booking_id: &BookingId,
        target_type: ReviewTarget,
        target_id: String,
        author_id: &UserId,
        review: NewReview,
    ) -> Result<Review, ReviewError> {
        if !(1..=5).contains(&review.rating) {
            return Err(ReviewError::InvalidRating(review.rating));
        }

        let mut reviews = self.reviews.write().unwrap();
        let duplicate = reviews
            .values()
            .any(|r| &r.booking_id == booking_id && r.target_type == target_type);
        if duplicate {
            return Err(ReviewError::DuplicateReview {
                booking_id: booking_id.clone(),
                target_type,
            });
        }

        let review = Review {
            id: ReviewId::generate(),
            booking_id: booking_id.clone(),
            target_type,
            target_id,
            author_id: author_id.clone(),
            rating: review.rating,
            text: review.text,
        };
        reviews.insert(review.id.clone(), review.clone());
        tracing::info!(review_id = %review.id, booking_id = %review.booking_id, target = %target_type, "review created");
        Ok(review)
    }

    fn mean_rating<F>(&self, matches: F) -> Option<f64>
    where
        F: Fn(&Review) -> bool,
    {
        let reviews = self.reviews.read().unwrap();
        let ratings: Vec<u8> = reviews
            .values()
            .filter(|r| matches(r))
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return None;
        }
        let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
        Some(f64::from(sum) / ratings.len() as f64)
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn create_review_for_guest(
        &self,
        booking_id: &BookingId,
        guest_id: &UserId,
        author_id: &UserId,
        review: NewReview,
    ) -> Result<Review, ReviewError> {
        self.insert(
            booking_id,
            ReviewTarget::Guest,
            guest_id.to_string(),
            author_id,
            review,
        )
    }

    async fn create_review_for_host(
        &self,
        booking_id: &BookingId,
        host_id: &UserId,
        author_id: &UserId,
        review: NewReview,
    ) -> Result<Review, ReviewError> {
        self.insert(
            booking_id,
            ReviewTarget::Host,
            host_id.to_string(),
            author_id,
            review,
        )
    }

    async fn create_review_for_listing(
        &self,
        booking_id: &BookingId,
        listing_id: &ListingId,
        author_id: &UserId,
        review: NewReview,
    ) -> Result<Review, ReviewError> {
        self.insert(
            booking_id,
            ReviewTarget::Listing,
            listing_id.to_string(),
            author_id,
            review,
        )
    }

    async fn get_review_for_booking(
        &self,
        target_type: ReviewTarget,
        booking_id: &BookingId,
    ) -> Result<Option<Review>, ReviewError> {
        let reviews = self.reviews.read().unwrap();
        Ok(reviews
            .values()
            .find(|r| &r.booking_id == booking_id && r.target_type == target_type)
            .cloned())
    }

    async fn get_reviews_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Review>, ReviewError> {
        let reviews = self.reviews.read().unwrap();
        let mut found: Vec<Review> = reviews
            .values()
            .filter(|r| r.target_type == ReviewTarget::Listing && r.target_id == listing_id.as_str())
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }

    async fn get_overall_rating_for_host(
        &self,
        host_id: &UserId,
    ) -> Result<Option<f64>, ReviewError> {
        Ok(self.mean_rating(|r| {
            r.target_type == ReviewTarget::Host && r.target_id == host_id.as_str()
        }))
    }

    async fn get_overall_rating_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Option<f64>, ReviewError> {
        Ok(self.mean_rating(|r| {
            r.target_type == ReviewTarget::Listing && r.target_id == listing_id.as_str()
        }))
    }
}

#[async_trait]
impl ReferenceResolver for InMemoryReviewStore {
    type Record = Review;

    fn owns(&self, entity_type: EntityType) -> bool {
        entity_type == EntityType::Review
    }

    async fn resolve_reference(
        &self,
        reference: &EntityRef,
    ) -> Result<Self::Record, FederationError> {
        self.ensure_owned(reference)?;
        let reviews = self.reviews.read().unwrap();
        reviews
            .get(&ReviewId::new(reference.id.as_str()))
            .cloned()
            .ok_or_else(|| FederationError::not_found(EntityType::Review, reference.id.clone()))
    }
}
