//! Integration tests for the booking saga.

use bookings::{BookingStore, InMemoryBookingStore};
use common::{DateRange, ListingId, Money, UserId};
use listings::{InMemoryListingDirectory, Listing, ListingDirectory, LocationType};
use payments::{InMemoryPaymentsLedger, PaymentsLedger};
use saga::{BookingSagaCoordinator, InMemorySagaJournal, SagaState};

type TestCoordinator = BookingSagaCoordinator<
    InMemoryListingDirectory,
    InMemoryPaymentsLedger,
    InMemoryBookingStore,
    InMemorySagaJournal,
>;

struct TestHarness {
    coordinator: TestCoordinator,
    listings: InMemoryListingDirectory,
    payments: InMemoryPaymentsLedger,
    bookings: InMemoryBookingStore,
}

impl TestHarness {
    fn new() -> Self {
        let listings = InMemoryListingDirectory::new();
        listings.add_listing(Self::listing("listing-1", 40));
        listings.add_listing(Self::listing("listing-2", 30));

        let payments = InMemoryPaymentsLedger::new();
        payments.open_wallet("user-2", Money::from_credits(100));

        let bookings = InMemoryBookingStore::new();
        let journal = InMemorySagaJournal::new();

        let coordinator = BookingSagaCoordinator::new(
            listings.clone(),
            payments.clone(),
            bookings.clone(),
            journal,
        );

        Self {
            coordinator,
            listings,
            payments,
            bookings,
        }
    }

    fn listing(id: &str, cost_per_night: i64) -> Listing {
        Listing {
            id: ListingId::new(id),
            host_id: UserId::new("user-1"),
            title: format!("Listing {id}"),
            description: String::new(),
            photo_thumbnail: None,
            num_of_beds: 2,
            cost_per_night: Money::from_credits(cost_per_night),
            location_type: LocationType::Spaceship,
            is_featured: false,
            coordinates: None,
            amenities: vec![],
        }
    }

    fn dates(check_in: &str, check_out: &str) -> DateRange {
        DateRange::new(check_in.parse().unwrap(), check_out.parse().unwrap()).unwrap()
    }

    async fn balance(&self, user: &str) -> Money {
        self.payments
            .get_wallet_amount(&UserId::new(user))
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn guest_books_two_nights_and_pays_eighty() {
    let h = TestHarness::new();

    let outcome = h
        .coordinator
        .execute(
            UserId::new("user-2"),
            ListingId::new("listing-1"),
            TestHarness::dates("2999-01-10", "2999-01-12"),
        )
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.code, 200);

    let booking = outcome.booking.expect("booking should exist");
    assert_eq!(booking.total_cost, Money::from_credits(80));
    assert_eq!(h.balance("user-2").await, Money::from_credits(20));

    // Exactly one booking record, with the frozen cost.
    let stored = h.bookings.get_booking(&booking.id).await.unwrap();
    assert_eq!(stored.total_cost, Money::from_credits(80));
    assert_eq!(h.bookings.booking_count(), 1);
}

#[tokio::test]
async fn frozen_cost_survives_a_later_price_change() {
    let h = TestHarness::new();

    let outcome = h
        .coordinator
        .execute(
            UserId::new("user-2"),
            ListingId::new("listing-1"),
            TestHarness::dates("2999-01-10", "2999-01-12"),
        )
        .await
        .unwrap();
    let booking = outcome.booking.unwrap();

    // Host re-prices the listing afterwards.
    h.listings
        .update_listing(
            &UserId::new("user-1"),
            &ListingId::new("listing-1"),
            listings::UpdateListingInput {
                cost_per_night: Some(Money::from_credits(999)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored = h.bookings.get_booking(&booking.id).await.unwrap();
    assert_eq!(stored.total_cost, Money::from_credits(80));
}

#[tokio::test]
async fn second_booking_beyond_the_balance_fails_cleanly() {
    let h = TestHarness::new();
    let guest = UserId::new("user-2");

    let first = h
        .coordinator
        .execute(
            guest.clone(),
            ListingId::new("listing-1"),
            TestHarness::dates("2999-01-10", "2999-01-12"),
        )
        .await
        .unwrap();
    assert!(first.success);
    assert_eq!(h.balance("user-2").await, Money::from_credits(20));

    // One night at 30 against a 20-credit balance.
    let second = h
        .coordinator
        .execute(
            guest,
            ListingId::new("listing-2"),
            TestHarness::dates("2999-02-01", "2999-02-02"),
        )
        .await
        .unwrap();

    assert!(!second.success);
    assert_eq!(second.code, 400);
    assert_eq!(h.balance("user-2").await, Money::from_credits(20));
    assert_eq!(h.bookings.booking_count(), 1);
}

#[tokio::test]
async fn store_rejection_restores_the_balance_exactly() {
    let h = TestHarness::new();
    h.bookings.set_fail_on_create(true);

    let outcome = h
        .coordinator
        .execute(
            UserId::new("user-2"),
            ListingId::new("listing-1"),
            TestHarness::dates("2999-01-10", "2999-01-12"),
        )
        .await
        .unwrap();

    assert!(!outcome.success);
    assert!(outcome.booking.is_none());
    assert_eq!(h.balance("user-2").await, Money::from_credits(100));
    assert_eq!(h.bookings.booking_count(), 0);

    let saga = h
        .coordinator
        .get_saga(outcome.saga_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saga.state(), SagaState::Failed);
    assert_eq!(saga.completed_steps().len(), 2);
}

#[tokio::test]
async fn double_booking_attempt_is_compensated() {
    let h = TestHarness::new();
    let winner = h
        .coordinator
        .execute(
            UserId::new("user-2"),
            ListingId::new("listing-1"),
            TestHarness::dates("2999-01-10", "2999-01-12"),
        )
        .await
        .unwrap();
    assert!(winner.success);

    // Same listing, overlapping dates, another wallet.
    h.payments.open_wallet("user-3", Money::from_credits(100));
    let loser = h
        .coordinator
        .execute(
            UserId::new("user-3"),
            ListingId::new("listing-1"),
            TestHarness::dates("2999-01-11", "2999-01-13"),
        )
        .await
        .unwrap();

    assert!(!loser.success);
    assert_eq!(loser.code, 400);
    assert!(loser.message.contains("unavailable"));
    // The conditional insert rejected the conflict and the debit came back.
    assert_eq!(h.balance("user-3").await, Money::from_credits(100));
    assert_eq!(h.bookings.booking_count(), 1);
}

#[tokio::test]
async fn concurrent_conflicting_sagas_book_exactly_once() {
    let h = TestHarness::new();
    h.payments.open_wallet("user-3", Money::from_credits(100));

    let a = h.coordinator.execute(
        UserId::new("user-2"),
        ListingId::new("listing-1"),
        TestHarness::dates("2999-01-10", "2999-01-12"),
    );
    let b = h.coordinator.execute(
        UserId::new("user-3"),
        ListingId::new("listing-1"),
        TestHarness::dates("2999-01-11", "2999-01-13"),
    );

    let (a, b) = tokio::join!(a, b);
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(
        [a.success, b.success].iter().filter(|s| **s).count(),
        1,
        "exactly one of two conflicting bookings may land"
    );
    assert_eq!(h.bookings.booking_count(), 1);

    // Whoever lost got their debit back.
    let total = h.balance("user-2").await + h.balance("user-3").await;
    assert_eq!(total, Money::from_credits(200) - Money::from_credits(80));
}

#[tokio::test]
async fn journal_tells_the_whole_story() {
    let h = TestHarness::new();
    h.bookings.set_fail_on_create(true);
    h.payments.set_fail_on_add(true);

    let outcome = h
        .coordinator
        .execute(
            UserId::new("user-2"),
            ListingId::new("listing-1"),
            TestHarness::dates("2999-01-10", "2999-01-12"),
        )
        .await
        .unwrap();

    // Refund failed: stranded debit reported, not swallowed.
    assert_eq!(outcome.code, 500);
    assert_eq!(h.balance("user-2").await, Money::from_credits(20));

    let saga = h
        .coordinator
        .get_saga(outcome.saga_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saga.state(), SagaState::Failed);
    assert_eq!(saga.total_cost(), Some(Money::from_credits(80)));
    assert!(saga.compensation_error().is_some());
    assert_eq!(saga.guest_id(), Some(&UserId::new("user-2")));
    assert_eq!(saga.listing_id(), Some(&ListingId::new("listing-1")));
}
