//! Store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use common::{BookingId, DateRange, ListingId, UserId};
use federation::{EntityRef, EntityType, FederationError, ReferenceResolver};

use crate::booking::{Booking, CreateBooking};
use crate::error::BookingError;
use crate::status::BookingStatus;

/// The Booking Store's operation surface.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Looks up a booking by id.
    async fn get_booking(&self, id: &BookingId) -> Result<Booking, BookingError>;

    /// Bookings made by a guest, optionally filtered by derived status.
    async fn get_bookings_for_user(
        &self,
        user_id: &UserId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError>;

    /// Bookings for a listing, optionally filtered by derived status.
    async fn get_bookings_for_listing(
        &self,
        listing_id: &ListingId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError>;

    /// Advisory availability check: true when no existing booking for the
    /// listing overlaps the requested dates. The authoritative check lives
    /// inside [`create_booking`](Self::create_booking).
    async fn is_listing_available(
        &self,
        listing_id: &ListingId,
        dates: &DateRange,
    ) -> Result<bool, BookingError>;

    /// Creates a booking, re-running the overlap check atomically with the
    /// insert. Fails with [`BookingError::ListingUnavailable`] on conflict.
    async fn create_booking(&self, input: CreateBooking) -> Result<Booking, BookingError>;

    /// The guest who made a booking.
    async fn get_guest_id_for_booking(&self, id: &BookingId) -> Result<UserId, BookingError>;

    /// The listing a booking is for.
    async fn get_listing_id_for_booking(&self, id: &BookingId) -> Result<ListingId, BookingError>;

    /// Date ranges of a listing's bookings that have not completed yet.
    async fn get_currently_booked_date_ranges(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<DateRange>, BookingError>;
}

#[derive(Debug, Default)]
struct StoreState {
    bookings: HashMap<BookingId, Booking>,
    fail_on_create: bool,
}

/// In-memory booking store.
///
/// One write guard covers the whole conditional insert, so the overlap check
/// and the insert happen atomically with respect to every other creation:
/// of two concurrent conflicting bookings, exactly one lands.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryBookingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the store being unreachable for creations.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Returns the total number of bookings.
    pub fn booking_count(&self) -> usize {
        self.state.read().unwrap().bookings.len()
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn matches_status(booking: &Booking, status: Option<BookingStatus>, today: NaiveDate) -> bool {
        match status {
            Some(wanted) => booking.status_on(today) == wanted,
            None => true,
        }
    }

    fn conflicts(state: &StoreState, listing_id: &ListingId, dates: &DateRange) -> bool {
        state
            .bookings
            .values()
            .filter(|b| &b.listing_id == listing_id)
            .any(|b| b.dates.overlaps(dates))
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn get_booking(&self, id: &BookingId) -> Result<Booking, BookingError> {
        self.state
            .read()
            .unwrap()
            .bookings
            .get(id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(id.clone()))
    }

    async fn get_bookings_for_user(
        &self,
        user_id: &UserId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError> {
        let today = Self::today();
        let state = self.state.read().unwrap();
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| &b.guest_id == user_id)
            .filter(|b| Self::matches_status(b, status, today))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.check_in(), b.id.clone()));
        Ok(bookings)
    }

    async fn get_bookings_for_listing(
        &self,
        listing_id: &ListingId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError> {
        let today = Self::today();
        let state = self.state.read().unwrap();
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| &b.listing_id == listing_id)
            .filter(|b| Self::matches_status(b, status, today))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.check_in(), b.id.clone()));
        Ok(bookings)
    }

    async fn is_listing_available(
        &self,
        listing_id: &ListingId,
        dates: &DateRange,
    ) -> Result<bool, BookingError> {
        let state = self.state.read().unwrap();
        Ok(!Self::conflicts(&state, listing_id, dates))
    }

    async fn create_booking(&self, input: CreateBooking) -> Result<Booking, BookingError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(BookingError::Unavailable("insert refused".to_string()));
        }

        // Conditional insert: the conflict re-check happens under the same
        // write guard as the insert itself.
        if Self::conflicts(&state, &input.listing_id, &input.dates) {
            return Err(BookingError::ListingUnavailable {
                listing_id: input.listing_id,
            });
        }

        let booking = Booking {
            id: BookingId::generate(),
            listing_id: input.listing_id,
            guest_id: input.guest_id,
            dates: input.dates,
            total_cost: input.total_cost,
        };
        state.bookings.insert(booking.id.clone(), booking.clone());
        tracing::info!(
            booking_id = %booking.id,
            listing_id = %booking.listing_id,
            guest_id = %booking.guest_id,
            "booking created"
        );
        Ok(booking)
    }

    async fn get_guest_id_for_booking(&self, id: &BookingId) -> Result<UserId, BookingError> {
        Ok(self.get_booking(id).await?.guest_id)
    }

    async fn get_listing_id_for_booking(&self, id: &BookingId) -> Result<ListingId, BookingError> {
        Ok(self.get_booking(id).await?.listing_id)
    }

    async fn get_currently_booked_date_ranges(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<DateRange>, BookingError> {
        let today = Self::today();
        let state = self.state.read().unwrap();
        let mut ranges: Vec<DateRange> = state
            .bookings
            .values()
            .filter(|b| &b.listing_id == listing_id)
            .filter(|b| b.status_on(today) != BookingStatus::Completed)
            .map(|b| b.dates)
            .collect();
        ranges.sort_by_key(|r| r.check_in());
        Ok(ranges)
    }
}

#[async_trait]
impl ReferenceResolver for InMemoryBookingStore {
    type Record = Booking;

    fn owns(&self, entity_type: EntityType) -> bool {
        entity_type == EntityType::Booking
    }

    async fn resolve_reference(
        &self,
        reference: &EntityRef,
    ) -> Result<Self::Record, FederationError> {
        self.ensure_owned(reference)?;
        self.get_booking(&BookingId::new(reference.id.as_str()))
            .await
            .map_err(|_| FederationError::not_found(EntityType::Booking, reference.id.clone()))
    }
}
