//! Listing query and mutation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use common::{DateRange, ListingId, Money, Role};
use listings::{
    Amenity, CreateListingInput, ListingDirectory, SortOrder, UpdateListingInput,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::context::Caller;
use crate::error::ApiError;
use crate::views::ListingView;
use bookings::{BookingStatus, BookingStore};

/// How many listings the landing page features.
const FEATURED_LISTING_LIMIT: usize = 3;

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListingsQuery {
    pub num_of_beds: Option<u32>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<SortOrder>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCostQuery {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub photo_thumbnail: Option<String>,
    pub num_of_beds: u32,
    pub cost_per_night: Money,
    pub location_type: listings::LocationType,
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub photo_thumbnail: Option<String>,
    pub num_of_beds: Option<u32>,
    pub cost_per_night: Option<Money>,
    pub location_type: Option<listings::LocationType>,
    pub amenity_ids: Option<Vec<String>>,
}

// -- Response types --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedDatesView {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetailResponse {
    #[serde(flatten)]
    pub listing: ListingView,
    pub number_of_upcoming_bookings: usize,
    pub currently_booked_dates: Vec<BookedDatesView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCostResponse {
    pub total_cost: Money,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingMutationResponse {
    pub code: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<ListingView>,
}

// -- Handlers --

/// GET /listings/featured — a few hand-picked listings for the landing page.
#[tracing::instrument(skip(state))]
pub async fn featured(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ListingView>>, ApiError> {
    let featured = state
        .listings
        .get_featured_listings(FEATURED_LISTING_LIMIT)
        .await?;
    Ok(Json(featured.into_iter().map(ListingView::from).collect()))
}

/// GET /listings/search — filter, sort, and paginate, then drop listings
/// that are unavailable for the requested dates.
///
/// The availability filter only runs when a date range was requested; a
/// search without dates returns the paginated results as-is. The per-listing
/// check is advisory (the authoritative one guards booking creation).
#[tracing::instrument(skip(state, query))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchListingsQuery>,
) -> Result<Json<Vec<ListingView>>, ApiError> {
    let dates = match (query.check_in_date, query.check_out_date) {
        (Some(check_in), Some(check_out)) => Some(
            DateRange::new(check_in, check_out)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "checkInDate and checkOutDate must be given together".to_string(),
            ));
        }
    };

    let listings = state
        .listings
        .get_listings(listings::ListingCriteria {
            num_of_beds: query.num_of_beds,
            page: query.page,
            limit: query.limit,
            sort_by: query.sort_by,
        })
        .await?;

    let mut available = Vec::with_capacity(listings.len());
    for listing in listings {
        let free = match &dates {
            Some(dates) => {
                state
                    .bookings
                    .is_listing_available(&listing.id, dates)
                    .await?
            }
            None => true,
        };
        if free {
            available.push(ListingView::from(listing));
        }
    }

    Ok(Json(available))
}

/// GET /listings/amenities — the full amenity catalog.
#[tracing::instrument(skip(state))]
pub async fn amenities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Amenity>>, ApiError> {
    Ok(Json(state.listings.get_all_amenities().await?))
}

/// GET /listings/{id} — a listing with booking-derived extras.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ListingDetailResponse>, ApiError> {
    let listing_id = ListingId::new(id);
    let listing = state.listings.get_listing(&listing_id).await?;

    let upcoming = state
        .bookings
        .get_bookings_for_listing(&listing_id, Some(BookingStatus::Upcoming))
        .await?;
    let booked_dates = state
        .bookings
        .get_currently_booked_date_ranges(&listing_id)
        .await?;

    Ok(Json(ListingDetailResponse {
        listing: ListingView::from(listing),
        number_of_upcoming_bookings: upcoming.len(),
        currently_booked_dates: booked_dates
            .into_iter()
            .map(|r| BookedDatesView {
                check_in_date: r.check_in(),
                check_out_date: r.check_out(),
            })
            .collect(),
    }))
}

/// GET /listings/{id}/coordinates — geographic position.
#[tracing::instrument(skip(state))]
pub async fn coordinates(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<listings::ListingCoordinates>>, ApiError> {
    let listing_id = ListingId::new(id);
    Ok(Json(
        state.listings.get_listing_coordinates(&listing_id).await?,
    ))
}

/// GET /listings/{id}/total-cost — point-in-time quote for a stay.
#[tracing::instrument(skip(state, query))]
pub async fn total_cost(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<TotalCostQuery>,
) -> Result<Json<TotalCostResponse>, ApiError> {
    let dates = DateRange::new(query.check_in_date, query.check_out_date)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let total_cost = state
        .listings
        .get_total_cost(&ListingId::new(id), &dates)
        .await?;
    Ok(Json(TotalCostResponse { total_cost }))
}

/// GET /host/listings — the authenticated host's own listings.
#[tracing::instrument(skip(state, ctx))]
pub async fn host_listings(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
) -> Result<Json<Vec<ListingView>>, ApiError> {
    let host = ctx.require_role(Role::Host, "Only hosts have access to listings.")?;
    let listings = state.listings.get_listings_for_user(&host.id).await?;
    Ok(Json(listings.into_iter().map(ListingView::from).collect()))
}

/// POST /listings — create a listing (hosts only).
#[tracing::instrument(skip(state, ctx, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Json(req): Json<CreateListingRequest>,
) -> Result<Json<ListingMutationResponse>, ApiError> {
    let user = ctx.require_user()?;
    if user.role != Role::Host {
        return Ok(Json(ListingMutationResponse {
            code: 400,
            success: false,
            message: "Only hosts can create new listings".to_string(),
            listing: None,
        }));
    }
    let host_id = user.id.clone();

    let input = CreateListingInput {
        title: req.title,
        description: req.description,
        photo_thumbnail: req.photo_thumbnail,
        num_of_beds: req.num_of_beds,
        cost_per_night: req.cost_per_night,
        location_type: req.location_type,
        amenity_ids: req.amenity_ids,
    };

    let response = match state.listings.create_listing(&host_id, input).await {
        Ok(listing) => ListingMutationResponse {
            code: 200,
            success: true,
            message: "Listing successfully created!".to_string(),
            listing: Some(ListingView::from(listing)),
        },
        Err(e) => ListingMutationResponse {
            code: 400,
            success: false,
            message: e.to_string(),
            listing: None,
        },
    };
    Ok(Json(response))
}

/// PATCH /listings/{id} — partial update of an owned listing.
#[tracing::instrument(skip(state, ctx, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
    Json(req): Json<UpdateListingRequest>,
) -> Result<Json<ListingMutationResponse>, ApiError> {
    let user = ctx.require_user()?;
    let listing_id = ListingId::new(id);

    let input = UpdateListingInput {
        title: req.title,
        description: req.description,
        photo_thumbnail: req.photo_thumbnail,
        num_of_beds: req.num_of_beds,
        cost_per_night: req.cost_per_night,
        location_type: req.location_type,
        amenity_ids: req.amenity_ids,
    };

    let response = match state
        .listings
        .update_listing(&user.id, &listing_id, input)
        .await
    {
        Ok(listing) => ListingMutationResponse {
            code: 200,
            success: true,
            message: "Listing successfully updated!".to_string(),
            listing: Some(ListingView::from(listing)),
        },
        Err(e) => ListingMutationResponse {
            code: 400,
            success: false,
            message: e.to_string(),
            listing: None,
        },
    };
    Ok(Json(response))
}
