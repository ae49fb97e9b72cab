//! Review submission and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::{BookingId, ListingId};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::context::Caller;
use crate::error::ApiError;
use crate::views::ReviewView;
use bookings::BookingStore;
use listings::ListingDirectory;
use reviews::{NewReview, ReviewStore};

// -- Request types --

#[derive(Deserialize)]
pub struct ReviewInput {
    pub rating: u8,
    pub text: String,
}

impl From<ReviewInput> for NewReview {
    fn from(input: ReviewInput) -> Self {
        NewReview {
            rating: input.rating,
            text: input.text,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitGuestReviewRequest {
    pub booking_id: String,
    pub guest_review: ReviewInput,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStayReviewsRequest {
    pub booking_id: String,
    pub host_review: ReviewInput,
    pub location_review: ReviewInput,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestReviewResponse {
    pub code: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_review: Option<ReviewView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayReviewsResponse {
    pub code: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_review: Option<ReviewView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_review: Option<ReviewView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingReviewsResponse {
    pub reviews: Vec<ReviewView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReviewsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_review: Option<ReviewView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_review: Option<ReviewView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_review: Option<ReviewView>,
}

// -- Handlers --

/// POST /reviews/guest — the host reviews the guest of a booking.
#[tracing::instrument(skip(state, ctx, req))]
pub async fn submit_guest_review(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Json(req): Json<SubmitGuestReviewRequest>,
) -> Result<Json<GuestReviewResponse>, ApiError> {
    let author = ctx.require_user()?;
    let booking_id = BookingId::new(req.booking_id);

    let guest_id = state.bookings.get_guest_id_for_booking(&booking_id).await?;

    let response = match state
        .reviews
        .create_review_for_guest(&booking_id, &guest_id, &author.id, req.guest_review.into())
        .await
    {
        Ok(review) => GuestReviewResponse {
            code: 200,
            success: true,
            message: "Successfully submitted review for guest".to_string(),
            guest_review: Some(ReviewView::from(review)),
        },
        Err(e) => GuestReviewResponse {
            code: 400,
            success: false,
            message: e.to_string(),
            guest_review: None,
        },
    };
    Ok(Json(response))
}

/// POST /reviews/stay — the guest reviews both the listing and its host.
///
/// Two reviews land on the same booking: one targeting the listing and one
/// targeting the host behind it (looked up through the Listing Directory).
#[tracing::instrument(skip(state, ctx, req))]
pub async fn submit_stay_reviews(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Json(req): Json<SubmitStayReviewsRequest>,
) -> Result<Json<StayReviewsResponse>, ApiError> {
    let author = ctx.require_user()?;
    let booking_id = BookingId::new(req.booking_id);

    let listing_id = state
        .bookings
        .get_listing_id_for_booking(&booking_id)
        .await?;

    let location_review = match state
        .reviews
        .create_review_for_listing(
            &booking_id,
            &listing_id,
            &author.id,
            req.location_review.into(),
        )
        .await
    {
        Ok(review) => review,
        Err(e) => {
            return Ok(Json(StayReviewsResponse {
                code: 400,
                success: false,
                message: e.to_string(),
                host_review: None,
                location_review: None,
            }));
        }
    };

    let host_id = state.listings.get_listing(&listing_id).await?.host_id;
    let response = match state
        .reviews
        .create_review_for_host(&booking_id, &host_id, &author.id, req.host_review.into())
        .await
    {
        Ok(host_review) => StayReviewsResponse {
            code: 200,
            success: true,
            message: "Successfully submitted review for host and location".to_string(),
            host_review: Some(ReviewView::from(host_review)),
            location_review: Some(ReviewView::from(location_review)),
        },
        Err(e) => StayReviewsResponse {
            code: 400,
            success: false,
            message: e.to_string(),
            host_review: None,
            location_review: Some(ReviewView::from(location_review)),
        },
    };
    Ok(Json(response))
}

/// GET /bookings/{id}/reviews — the up-to-three reviews following a stay.
#[tracing::instrument(skip(state))]
pub async fn reviews_for_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingReviewsResponse>, ApiError> {
    let booking_id = BookingId::new(id);
    // Confirm the booking exists before reporting an empty review set.
    state.bookings.get_booking(&booking_id).await?;

    let guest_review = state
        .reviews
        .get_review_for_booking(reviews::ReviewTarget::Guest, &booking_id)
        .await?;
    let host_review = state
        .reviews
        .get_review_for_booking(reviews::ReviewTarget::Host, &booking_id)
        .await?;
    let location_review = state
        .reviews
        .get_review_for_booking(reviews::ReviewTarget::Listing, &booking_id)
        .await?;

    Ok(Json(BookingReviewsResponse {
        guest_review: guest_review.map(ReviewView::from),
        host_review: host_review.map(ReviewView::from),
        location_review: location_review.map(ReviewView::from),
    }))
}

/// GET /listings/{id}/reviews — a listing's reviews and overall rating.
#[tracing::instrument(skip(state))]
pub async fn reviews_for_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ListingReviewsResponse>, ApiError> {
    let listing_id = ListingId::new(id);
    let reviews = state.reviews.get_reviews_for_listing(&listing_id).await?;
    let overall_rating = state
        .reviews
        .get_overall_rating_for_listing(&listing_id)
        .await?;

    Ok(Json(ListingReviewsResponse {
        reviews: reviews.into_iter().map(ReviewView::from).collect(),
        overall_rating,
    }))
}
