//! The gateway's reference-resolution endpoint.
//!
//! This is the dispatch half of the federation protocol: a stub
//! `{__typename, id}` posted here is routed to the service that owns the
//! type, and the response is that service's fully populated record — with
//! any of *its* foreign fields reduced to stubs in turn.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::UserId;

use crate::AppState;
use crate::context::Caller;
use crate::error::ApiError;
use crate::views::{BookingView, Entity, GuestView, HostView, ListingView, ReviewView};
use accounts::wallet_funds;
use federation::{EntityRef, EntityType, ReferenceResolver};
use reviews::ReviewStore;

/// POST /entities/resolve — resolve a stub against its owning service.
///
/// Resolution itself needs no authentication; the caller identity is only
/// consulted for the guarded guest `funds` field, which is filled in solely
/// when the resolved guest *is* the caller.
#[tracing::instrument(skip(state, ctx, reference))]
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Caller(ctx): Caller,
    Json(reference): Json<EntityRef>,
) -> Result<Json<Entity>, ApiError> {
    let entity = match reference.entity_type {
        EntityType::Listing => {
            let listing = state.listings.resolve_reference(&reference).await?;
            Entity::Listing(ListingView::from(listing))
        }
        EntityType::Booking => {
            let booking = state.bookings.resolve_reference(&reference).await?;
            Entity::Booking(BookingView::from(booking))
        }
        EntityType::Guest => {
            let user = state.accounts.resolve_reference(&reference).await?;
            let user_id = UserId::new(reference.id.as_str());
            // Only the guest themselves sees their balance; for anyone else
            // the field is absent rather than the whole resolution failing.
            let funds = wallet_funds(&state.payments, &user_id, &ctx).await.ok();
            Entity::Guest(GuestView {
                id: user.id.to_string(),
                name: user.name,
                funds,
            })
        }
        EntityType::Host => {
            let user = state.accounts.resolve_reference(&reference).await?;
            let overall_rating = state.reviews.get_overall_rating_for_host(&user.id).await?;
            Entity::Host(HostView {
                id: user.id.to_string(),
                name: user.name,
                overall_rating,
            })
        }
        EntityType::Review => {
            let review = state.reviews.resolve_reference(&reference).await?;
            Entity::Review(ReviewView::from(review))
        }
    };

    Ok(Json(entity))
}
