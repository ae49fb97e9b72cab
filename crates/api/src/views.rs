//! Gateway-side entity views.
//!
//! Each view is a service's record as the gateway hands it out: locally
//! owned fields populated, foreign fields reduced to stubs for the caller
//! (or the gateway's own dispatch) to resolve against the owning service.

use bookings::{Booking, BookingStatus, human_readable_date};
use chrono::Utc;
use common::Money;
use federation::EntityRef;
use listings::{Amenity, Listing, ListingCoordinates, LocationType};
use reviews::{Review, ReviewTarget};
use serde::Serialize;

/// A listing with its host reduced to a stub.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub photo_thumbnail: Option<String>,
    pub num_of_beds: u32,
    pub cost_per_night: Money,
    pub location_type: LocationType,
    pub is_featured: bool,
    pub host: EntityRef,
    pub amenities: Vec<Amenity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<ListingCoordinates>,
}

impl From<Listing> for ListingView {
    fn from(listing: Listing) -> Self {
        let host = listing.host_ref();
        Self {
            id: listing.id.to_string(),
            title: listing.title,
            description: listing.description,
            photo_thumbnail: listing.photo_thumbnail,
            num_of_beds: listing.num_of_beds,
            cost_per_night: listing.cost_per_night,
            location_type: listing.location_type,
            is_featured: listing.is_featured,
            host,
            amenities: listing.amenities,
            coordinates: listing.coordinates,
        }
    }
}

/// A booking with listing and guest reduced to stubs and dates formatted
/// for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: String,
    pub listing: EntityRef,
    pub guest: EntityRef,
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: BookingStatus,
    pub total_cost: Money,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        let today = Utc::now().date_naive();
        Self {
            id: booking.id.to_string(),
            listing: booking.listing_ref(),
            guest: booking.guest_ref(),
            check_in_date: human_readable_date(booking.check_in()),
            check_out_date: human_readable_date(booking.check_out()),
            status: booking.status_on(today),
            total_cost: booking.total_cost,
        }
    }
}

/// A user seen as a guest. `funds` is populated only when the caller is the
/// guest themselves; everyone else gets the profile without it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds: Option<Money>,
}

/// A user seen as a host, with their aggregate rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<f64>,
}

/// A review with its author reduced to a role-typed stub.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: String,
    pub booking_id: String,
    pub target_type: ReviewTarget,
    pub author: EntityRef,
    pub rating: u8,
    pub text: String,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        let author = review.author_ref();
        Self {
            id: review.id.to_string(),
            booking_id: review.booking_id.to_string(),
            target_type: review.target_type,
            author,
            rating: review.rating,
            text: review.text,
        }
    }
}

/// A resolved entity, tagged with the type that owns it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "__typename")]
pub enum Entity {
    Listing(ListingView),
    Booking(BookingView),
    Guest(GuestView),
    Host(HostView),
    Review(ReviewView),
}
