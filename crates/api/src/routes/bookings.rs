//! Booking query endpoints and the booking-creation mutation.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use common::{DateRange, ListingId, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::context::Caller;
use crate::error::ApiError;
use crate::views::BookingView;
use bookings::{BookingStatus, BookingStore};
use listings::ListingDirectory;
use saga::SagaId;

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub listing_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub status: Option<BookingStatus>,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub code: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saga_id: Option<SagaId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SagaStatusResponse {
    pub saga_id: String,
    pub saga_type: String,
    pub state: String,
    pub is_terminal: bool,
    pub completed_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation_error: Option<String>,
}

// -- Handlers --

/// POST /bookings — create a booking through the saga.
///
/// Requires an authenticated user (hard failure); everything after that is
/// reported in the structured response body, including domain failures.
/// Invalid date ranges are rejected here, before the saga and therefore
/// before any funds can move.
#[tracing::instrument(skip(state, ctx, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, ApiError> {
    let user = ctx.require_user()?;

    let dates = match DateRange::new(req.check_in_date, req.check_out_date) {
        Ok(dates) => dates,
        Err(e) => {
            return Ok(Json(CreateBookingResponse {
                code: 400,
                success: false,
                message: e.to_string(),
                booking: None,
                saga_id: None,
            }));
        }
    };

    let outcome = state
        .saga
        .execute(user.id.clone(), ListingId::new(req.listing_id), dates)
        .await?;

    Ok(Json(CreateBookingResponse {
        code: outcome.code,
        success: outcome.success,
        message: outcome.message,
        booking: outcome.booking.map(BookingView::from),
        saga_id: Some(outcome.saga_id),
    }))
}

/// GET /sagas/{id} — saga execution state, rebuilt from the journal.
#[tracing::instrument(skip(state))]
pub async fn saga_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SagaStatusResponse>, ApiError> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|e| ApiError::BadRequest(format!("invalid saga id: {e}")))?;
    let saga_id = SagaId::from_uuid(uuid);

    let saga = state
        .saga
        .get_saga(saga_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("saga {id} not found")))?;

    Ok(Json(SagaStatusResponse {
        saga_id: saga_id.to_string(),
        saga_type: saga.saga_type().to_string(),
        state: saga.state().to_string(),
        is_terminal: saga.state().is_terminal(),
        completed_steps: saga.completed_steps().to_vec(),
        booking_id: saga.booking_id().map(ToString::to_string),
        failure_reason: saga.failure_reason().map(String::from),
        compensation_error: saga.compensation_error().map(String::from),
    }))
}

/// GET /trips — the authenticated guest's bookings.
#[tracing::instrument(skip(state, ctx))]
pub async fn guest_bookings(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    guest_bookings_with_status(state, ctx, None).await
}

/// GET /trips/upcoming — bookings that have not completed.
#[tracing::instrument(skip(state, ctx))]
pub async fn upcoming_guest_bookings(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    guest_bookings_with_status(state, ctx, Some(BookingStatus::Upcoming)).await
}

/// GET /trips/past — completed bookings.
#[tracing::instrument(skip(state, ctx))]
pub async fn past_guest_bookings(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    guest_bookings_with_status(state, ctx, Some(BookingStatus::Completed)).await
}

async fn guest_bookings_with_status(
    state: Arc<AppState>,
    ctx: common::AuthContext,
    status: Option<BookingStatus>,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let guest = ctx.require_role(Role::Guest, "Only guests have access to trips")?;
    let bookings = state
        .bookings
        .get_bookings_for_user(&guest.id, status)
        .await?;
    Ok(Json(bookings.into_iter().map(BookingView::from).collect()))
}

/// GET /listings/{id}/bookings — bookings for one of the host's listings.
///
/// Hosts only, and the listing must actually belong to the requesting host.
#[tracing::instrument(skip(state, ctx, query))]
pub async fn bookings_for_listing(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let host = ctx.require_role(Role::Host, "Only hosts have access to listing bookings")?;
    let listing_id = ListingId::new(id);

    let owned = state.listings.get_listings_for_user(&host.id).await?;
    if !owned.iter().any(|l| l.id == listing_id) {
        return Err(ApiError::Forbidden(
            "Listing does not belong to host".to_string(),
        ));
    }

    let bookings = state
        .bookings
        .get_bookings_for_listing(&listing_id, query.status)
        .await?;
    Ok(Json(bookings.into_iter().map(BookingView::from).collect()))
}
