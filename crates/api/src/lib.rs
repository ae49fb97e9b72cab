//! HTTP gateway for the federated stay-booking services.
//!
//! Each leaf service (listings, payments, bookings, reviews, accounts) owns
//! its own records; the gateway builds the per-request caller context,
//! exposes each service's query/mutation roots as routes, runs the booking
//! saga on the one mutation that spans two owners, and dispatches entity
//! stubs to their owning service.

pub mod config;
pub mod context;
pub mod error;
pub mod routes;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use accounts::{InMemoryAccounts, UserProfile};
use bookings::InMemoryBookingStore;
use common::{Money, Role};
use listings::{
    Amenity, AmenityCategory, InMemoryListingDirectory, Listing, ListingCoordinates, LocationType,
};
use payments::InMemoryPaymentsLedger;
use reviews::InMemoryReviewStore;
use saga::{BookingSagaCoordinator, InMemorySagaJournal};

/// The coordinator as wired for the in-memory backends.
pub type Coordinator = BookingSagaCoordinator<
    InMemoryListingDirectory,
    InMemoryPaymentsLedger,
    InMemoryBookingStore,
    InMemorySagaJournal,
>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub accounts: InMemoryAccounts,
    pub listings: InMemoryListingDirectory,
    pub payments: InMemoryPaymentsLedger,
    pub bookings: InMemoryBookingStore,
    pub reviews: InMemoryReviewStore,
    pub saga: Coordinator,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        // Listing Directory
        .route("/listings/featured", get(routes::listings::featured))
        .route("/listings/search", get(routes::listings::search))
        .route("/listings/amenities", get(routes::listings::amenities))
        .route("/listings/{id}", get(routes::listings::get))
        .route(
            "/listings/{id}/coordinates",
            get(routes::listings::coordinates),
        )
        .route(
            "/listings/{id}/total-cost",
            get(routes::listings::total_cost),
        )
        .route("/listings", post(routes::listings::create))
        .route("/listings/{id}", patch(routes::listings::update))
        .route("/host/listings", get(routes::listings::host_listings))
        // Booking Store
        .route(
            "/listings/{id}/bookings",
            get(routes::bookings::bookings_for_listing),
        )
        .route("/trips", get(routes::bookings::guest_bookings))
        .route(
            "/trips/upcoming",
            get(routes::bookings::upcoming_guest_bookings),
        )
        .route("/trips/past", get(routes::bookings::past_guest_bookings))
        .route("/bookings", post(routes::bookings::create))
        .route("/sagas/{id}", get(routes::bookings::saga_status))
        // Payments Ledger
        .route("/wallet", get(routes::wallet::get))
        .route("/wallet/funds", post(routes::wallet::add_funds))
        // Review Store
        .route(
            "/reviews/guest",
            post(routes::reviews::submit_guest_review),
        )
        .route("/reviews/stay", post(routes::reviews::submit_stay_reviews))
        .route(
            "/listings/{id}/reviews",
            get(routes::reviews::reviews_for_listing),
        )
        .route(
            "/bookings/{id}/reviews",
            get(routes::reviews::reviews_for_booking),
        )
        // Reference resolution
        .route("/entities/resolve", post(routes::entities::resolve))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over empty in-memory services.
pub fn create_state() -> Arc<AppState> {
    let accounts = InMemoryAccounts::new();
    let listings = InMemoryListingDirectory::new();
    let payments = InMemoryPaymentsLedger::new();
    let bookings = InMemoryBookingStore::new();
    let reviews = InMemoryReviewStore::new();
    let journal = InMemorySagaJournal::new();

    let saga = BookingSagaCoordinator::new(
        listings.clone(),
        payments.clone(),
        bookings.clone(),
        journal,
    );

    Arc::new(AppState {
        accounts,
        listings,
        payments,
        bookings,
        reviews,
        saga,
    })
}

/// Creates application state seeded with demo users, wallets, and listings.
pub fn create_demo_state() -> Arc<AppState> {
    let state = create_state();

    state
        .accounts
        .add_user(UserProfile::new("user-1", "Ridley", Role::Host));
    state
        .accounts
        .add_user(UserProfile::new("user-2", "Amal", Role::Guest));
    state
        .accounts
        .add_user(UserProfile::new("user-3", "Kelle", Role::Guest));

    state.payments.open_wallet("user-2", Money::from_credits(100));
    state.payments.open_wallet("user-3", Money::from_credits(250));

    let wifi = Amenity::new(
        "am-1",
        AmenityCategory::AccommodationDetails,
        "Interdimensional wifi",
    );
    let oxygen = Amenity::new("am-2", AmenityCategory::SpaceSurvival, "Oxygen");
    let pool = Amenity::new("am-3", AmenityCategory::Outdoors, "Meteor shower view deck");
    for amenity in [&wifi, &oxygen, &pool] {
        state.listings.add_amenity(amenity.clone());
    }

    state.listings.add_listing(Listing {
        id: "listing-1".into(),
        host_id: "user-1".into(),
        title: "The Cave of a Lifetime".to_string(),
        description: "A cozy cavern with a view of the crystal falls.".to_string(),
        photo_thumbnail: None,
        num_of_beds: 2,
        cost_per_night: Money::from_credits(40),
        location_type: LocationType::Campsite,
        is_featured: true,
        coordinates: Some(ListingCoordinates {
            latitude: 4.0,
            longitude: 104.0,
        }),
        amenities: vec![wifi.clone(), oxygen.clone()],
    });
    state.listings.add_listing(Listing {
        id: "listing-2".into(),
        host_id: "user-1".into(),
        title: "Orbital Oasis".to_string(),
        description: "Low gravity, high comfort.".to_string(),
        photo_thumbnail: None,
        num_of_beds: 4,
        cost_per_night: Money::from_credits(100),
        location_type: LocationType::Spaceship,
        is_featured: true,
        coordinates: Some(ListingCoordinates {
            latitude: 0.0,
            longitude: 0.0,
        }),
        amenities: vec![wifi, oxygen.clone(), pool],
    });
    state.listings.add_listing(Listing {
        id: "listing-3".into(),
        host_id: "user-1".into(),
        title: "Crater Bunkhouse".to_string(),
        description: "Budget beds at the rim of an ancient impact site.".to_string(),
        photo_thumbnail: None,
        num_of_beds: 2,
        cost_per_night: Money::from_credits(30),
        location_type: LocationType::Room,
        is_featured: false,
        coordinates: None,
        amenities: vec![oxygen],
    });

    state
}
