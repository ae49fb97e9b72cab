//! Saga coordinator for booking creation.

use bookings::{BookingStore, CreateBooking};
use common::{DateRange, ListingId, Money, UserId};
use listings::{ListingDirectory, ListingError};
use payments::{LedgerError, PaymentsLedger};

use crate::booking_flow;
use crate::error::SagaError;
use crate::events::SagaEvent;
use crate::execution::SagaExecution;
use crate::ids::SagaId;
use crate::journal::SagaJournal;
use crate::outcome::BookingOutcome;

/// Message returned when the guest's wallet cannot cover the stay.
const INSUFFICIENT_FUNDS_MESSAGE: &str =
    "We couldn't complete your request because your funds are insufficient.";

/// Orchestrates booking creation across the Listing Directory, the Payments
/// Ledger, and the Booking Store.
///
/// The three steps run strictly in order: quote, then debit, then persist.
/// The single compensating action (crediting the debit back) runs only after
/// a failed persistence. The debit is atomic at the ledger, so an abort
/// before it leaves no state behind and needs no compensation.
///
/// The coordinator provides no idempotency: executing the same request twice
/// debits twice and books twice. Callers must not retry blindly.
pub struct BookingSagaCoordinator<L, P, B, J>
where
    L: ListingDirectory,
    P: PaymentsLedger,
    B: BookingStore,
    J: SagaJournal,
{
    listings: L,
    payments: P,
    bookings: B,
    journal: J,
}

impl<L, P, B, J> BookingSagaCoordinator<L, P, B, J>
where
    L: ListingDirectory,
    P: PaymentsLedger,
    B: BookingStore,
    J: SagaJournal,
{
    /// Creates a new coordinator.
    pub fn new(listings: L, payments: P, bookings: B, journal: J) -> Self {
        Self {
            listings,
            payments,
            bookings,
            journal,
        }
    }

    /// Executes the booking saga for an authenticated guest.
    ///
    /// The caller's identity is established before this runs; `dates` is
    /// already a valid range (`check_in < check_out`) by construction, so no
    /// funds can move for a malformed request. Every domain outcome, success
    /// or failure, is returned as a [`BookingOutcome`]; `Err` is reserved
    /// for journal failures.
    #[tracing::instrument(skip(self), fields(saga_type = booking_flow::SAGA_TYPE))]
    pub async fn execute(
        &self,
        guest_id: UserId,
        listing_id: ListingId,
        dates: DateRange,
    ) -> Result<BookingOutcome, SagaError> {
        metrics::counter!("booking_saga_executions_total").increment(1);
        let saga_start = std::time::Instant::now();

        let saga_id = SagaId::new();
        let mut saga = SagaExecution::default();
        self.record(
            &mut saga,
            saga_id,
            SagaEvent::saga_started(
                saga_id,
                listing_id.clone(),
                guest_id.clone(),
                booking_flow::SAGA_TYPE,
            ),
        )
        .await?;

        // Step 1: quote. Nothing has changed anywhere yet, so a failure
        // aborts without compensation.
        tracing::info!(step = booking_flow::STEP_QUOTE, "saga step started");
        self.record(
            &mut saga,
            saga_id,
            SagaEvent::step_started(booking_flow::STEP_QUOTE),
        )
        .await?;

        let total_cost = match self.listings.get_total_cost(&listing_id, &dates).await {
            Ok(cost) => {
                self.record(
                    &mut saga,
                    saga_id,
                    SagaEvent::step_completed(booking_flow::STEP_QUOTE, Some(cost), None),
                )
                .await?;
                cost
            }
            Err(e) => {
                let code = match e {
                    ListingError::NotFound(_) => 404,
                    _ => 500,
                };
                return self
                    .abort(
                        &mut saga,
                        saga_id,
                        booking_flow::STEP_QUOTE,
                        code,
                        e.to_string(),
                        saga_start,
                    )
                    .await;
            }
        };

        // Step 2: reserve funds. Atomic at the ledger — either the full
        // debit lands or nothing does.
        tracing::info!(step = booking_flow::STEP_DEBIT, "saga step started");
        self.record(
            &mut saga,
            saga_id,
            SagaEvent::step_started(booking_flow::STEP_DEBIT),
        )
        .await?;

        match self.payments.subtract_funds(&guest_id, total_cost).await {
            Ok(_) => {
                self.record(
                    &mut saga,
                    saga_id,
                    SagaEvent::step_completed(booking_flow::STEP_DEBIT, None, None),
                )
                .await?;
            }
            Err(e) => {
                let (code, message) = match &e {
                    LedgerError::InsufficientFunds { .. } => {
                        (400, INSUFFICIENT_FUNDS_MESSAGE.to_string())
                    }
                    _ => (500, e.to_string()),
                };
                return self
                    .abort(
                        &mut saga,
                        saga_id,
                        booking_flow::STEP_DEBIT,
                        code,
                        message,
                        saga_start,
                    )
                    .await;
            }
        }

        // Step 3: persist the booking. From here on the guest's funds are
        // held, so a failure must be compensated.
        tracing::info!(step = booking_flow::STEP_PERSIST, "saga step started");
        self.record(
            &mut saga,
            saga_id,
            SagaEvent::step_started(booking_flow::STEP_PERSIST),
        )
        .await?;

        let create = CreateBooking {
            listing_id: listing_id.clone(),
            guest_id: guest_id.clone(),
            dates,
            total_cost,
        };
        match self.bookings.create_booking(create).await {
            Ok(booking) => {
                self.record(
                    &mut saga,
                    saga_id,
                    SagaEvent::step_completed(
                        booking_flow::STEP_PERSIST,
                        None,
                        Some(booking.id.clone()),
                    ),
                )
                .await?;
                self.record(&mut saga, saga_id, SagaEvent::saga_completed())
                    .await?;

                let duration = saga_start.elapsed().as_secs_f64();
                metrics::histogram!("booking_saga_duration_seconds").record(duration);
                metrics::counter!("booking_saga_completed").increment(1);
                tracing::info!(%saga_id, booking_id = %booking.id, duration, "booking saga completed");

                Ok(BookingOutcome::succeeded(saga_id, booking))
            }
            Err(e) => {
                self.record(
                    &mut saga,
                    saga_id,
                    SagaEvent::step_failed(booking_flow::STEP_PERSIST, e.to_string()),
                )
                .await?;
                self.compensate(&mut saga, saga_id, &guest_id, total_cost, e.to_string())
                    .await
                    .inspect(|_| {
                        metrics::histogram!("booking_saga_duration_seconds")
                            .record(saga_start.elapsed().as_secs_f64());
                    })
            }
        }
    }

    /// Aborts a saga whose failed step changed no state: records the
    /// failure and returns the structured result, no compensation.
    async fn abort(
        &self,
        saga: &mut SagaExecution,
        saga_id: SagaId,
        step: &str,
        code: u16,
        message: String,
        saga_start: std::time::Instant,
    ) -> Result<BookingOutcome, SagaError> {
        self.record(saga, saga_id, SagaEvent::step_failed(step, message.clone()))
            .await?;
        self.record(saga, saga_id, SagaEvent::saga_failed(message.clone()))
            .await?;

        metrics::histogram!("booking_saga_duration_seconds")
            .record(saga_start.elapsed().as_secs_f64());
        metrics::counter!("booking_saga_failed").increment(1);
        tracing::warn!(%saga_id, step, reason = %message, "booking saga aborted");

        Ok(BookingOutcome::failed(saga_id, code, message))
    }

    /// Credits the held funds back after a failed persistence.
    ///
    /// If the credit itself fails the debit is stranded: the failure is
    /// journaled and the outcome says so explicitly, because nothing else in
    /// the system will notice on its own.
    #[tracing::instrument(skip(self, saga, reason))]
    async fn compensate(
        &self,
        saga: &mut SagaExecution,
        saga_id: SagaId,
        guest_id: &UserId,
        amount: Money,
        reason: String,
    ) -> Result<BookingOutcome, SagaError> {
        self.record(
            saga,
            saga_id,
            SagaEvent::compensation_started(booking_flow::STEP_PERSIST),
        )
        .await?;
        metrics::counter!("booking_saga_compensations_total").increment(1);

        let outcome = match self.payments.add_funds(guest_id, amount).await {
            Ok(_) => {
                self.record(
                    saga,
                    saga_id,
                    SagaEvent::compensation_step_completed(booking_flow::STEP_DEBIT),
                )
                .await?;
                tracing::warn!(%saga_id, %guest_id, %amount, reason = %reason, "booking saga compensated");
                BookingOutcome::failed(saga_id, 400, reason.clone())
            }
            Err(credit_err) => {
                self.record(
                    saga,
                    saga_id,
                    SagaEvent::compensation_step_failed(
                        booking_flow::STEP_DEBIT,
                        credit_err.to_string(),
                    ),
                )
                .await?;
                metrics::counter!("booking_saga_compensation_failures").increment(1);
                tracing::error!(
                    %saga_id, %guest_id, %amount, error = %credit_err,
                    "compensating credit failed; funds remain debited without a booking"
                );
                BookingOutcome::failed(
                    saga_id,
                    500,
                    format!(
                        "Booking failed and the refund could not be completed; \
                         {amount} credits remain debited from your wallet. ({credit_err})"
                    ),
                )
            }
        };

        self.record(saga, saga_id, SagaEvent::saga_failed(reason))
            .await?;
        metrics::counter!("booking_saga_failed").increment(1);
        Ok(outcome)
    }

    /// Journals an event and folds it into the in-flight execution state.
    async fn record(
        &self,
        saga: &mut SagaExecution,
        saga_id: SagaId,
        event: SagaEvent,
    ) -> Result<(), SagaError> {
        self.journal.append(saga_id, event.clone()).await?;
        saga.apply(event);
        Ok(())
    }

    /// Loads a saga execution by replaying its journal.
    pub async fn get_saga(&self, saga_id: SagaId) -> Result<Option<SagaExecution>, SagaError> {
        let events = self.journal.events_for(saga_id).await?;
        if events.is_empty() {
            return Ok(None);
        }
        Ok(Some(SagaExecution::replay(events)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::InMemorySagaJournal;
    use crate::state::SagaState;
    use bookings::InMemoryBookingStore;
    use common::Money;
    use listings::{InMemoryListingDirectory, Listing, ListingCoordinates, LocationType};
    use payments::InMemoryPaymentsLedger;

    type TestCoordinator = BookingSagaCoordinator<
        InMemoryListingDirectory,
        InMemoryPaymentsLedger,
        InMemoryBookingStore,
        InMemorySagaJournal,
    >;

    fn listing(id: &str, cost: i64) -> Listing {
        Listing {
            id: ListingId::new(id),
            host_id: UserId::new("user-1"),
            title: format!("Listing {id}"),
            description: String::new(),
            photo_thumbnail: None,
            num_of_beds: 2,
            cost_per_night: Money::from_credits(cost),
            location_type: LocationType::Campsite,
            is_featured: false,
            coordinates: Some(ListingCoordinates {
                latitude: 1.0,
                longitude: 2.0,
            }),
            amenities: vec![],
        }
    }

    fn setup() -> (
        TestCoordinator,
        InMemoryPaymentsLedger,
        InMemoryBookingStore,
    ) {
        let listings = InMemoryListingDirectory::new();
        listings.add_listing(listing("listing-1", 40));
        listings.add_listing(listing("listing-2", 30));

        let payments = InMemoryPaymentsLedger::new();
        payments.open_wallet("user-2", Money::from_credits(100));

        let bookings = InMemoryBookingStore::new();
        let journal = InMemorySagaJournal::new();

        let coordinator = BookingSagaCoordinator::new(
            listings,
            payments.clone(),
            bookings.clone(),
            journal,
        );
        (coordinator, payments, bookings)
    }

    fn dates(check_in: &str, check_out: &str) -> DateRange {
        DateRange::new(check_in.parse().unwrap(), check_out.parse().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn happy_path_debits_and_books() {
        let (coordinator, payments, bookings) = setup();

        let outcome = coordinator
            .execute(
                UserId::new("user-2"),
                ListingId::new("listing-1"),
                dates("2999-01-10", "2999-01-12"),
            )
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.code, 200);
        assert_eq!(outcome.message, "Successfully booked!");
        let booking = outcome.booking.expect("booking should be present");
        assert_eq!(booking.total_cost, Money::from_credits(80));

        // Wallet: 100 - 2 nights * 40.
        assert_eq!(
            payments
                .get_wallet_amount(&UserId::new("user-2"))
                .await
                .unwrap(),
            Money::from_credits(20)
        );
        assert_eq!(bookings.booking_count(), 1);

        let saga = coordinator
            .get_saga(outcome.saga_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saga.state(), SagaState::Completed);
        assert_eq!(
            saga.completed_steps(),
            &[
                booking_flow::STEP_QUOTE,
                booking_flow::STEP_DEBIT,
                booking_flow::STEP_PERSIST,
            ]
        );
        assert_eq!(saga.booking_id(), Some(&booking.id));
    }

    #[tokio::test]
    async fn insufficient_funds_aborts_before_any_booking() {
        let (coordinator, payments, bookings) = setup();
        let guest = UserId::new("user-2");

        // First booking drains the wallet: 100 - 80 = 20.
        let first = coordinator
            .execute(
                guest.clone(),
                ListingId::new("listing-1"),
                dates("2999-01-10", "2999-01-12"),
            )
            .await
            .unwrap();
        assert!(first.success);

        // A 30-credit night against a 20-credit balance: the debit fails
        // and nothing else runs.
        let outcome = coordinator
            .execute(
                guest.clone(),
                ListingId::new("listing-2"),
                dates("2999-03-01", "2999-03-02"),
            )
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.code, 400);
        assert_eq!(
            outcome.message,
            "We couldn't complete your request because your funds are insufficient."
        );
        assert!(outcome.booking.is_none());

        // Balance untouched by the failed attempt, no second booking.
        assert_eq!(
            payments.get_wallet_amount(&guest).await.unwrap(),
            Money::from_credits(20)
        );
        assert_eq!(bookings.booking_count(), 1);

        let saga = coordinator
            .get_saga(outcome.saga_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saga.state(), SagaState::Failed);
        assert_eq!(saga.completed_steps(), &[booking_flow::STEP_QUOTE]);
    }

    #[tokio::test]
    async fn quote_failure_for_unknown_listing() {
        let (coordinator, payments, bookings) = setup();

        let outcome = coordinator
            .execute(
                UserId::new("user-2"),
                ListingId::new("listing-404"),
                dates("2999-01-10", "2999-01-12"),
            )
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.code, 404);
        assert_eq!(
            payments
                .get_wallet_amount(&UserId::new("user-2"))
                .await
                .unwrap(),
            Money::from_credits(100)
        );
        assert_eq!(bookings.booking_count(), 0);
    }

    #[tokio::test]
    async fn persist_failure_refunds_the_debit() {
        let (coordinator, payments, bookings) = setup();
        bookings.set_fail_on_create(true);

        let outcome = coordinator
            .execute(
                UserId::new("user-2"),
                ListingId::new("listing-1"),
                dates("2999-01-10", "2999-01-12"),
            )
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.code, 400);
        assert!(outcome.booking.is_none());
        // Compensation restored the balance exactly.
        assert_eq!(
            payments
                .get_wallet_amount(&UserId::new("user-2"))
                .await
                .unwrap(),
            Money::from_credits(100)
        );
        assert_eq!(bookings.booking_count(), 0);

        let saga = coordinator
            .get_saga(outcome.saga_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saga.state(), SagaState::Failed);
        assert!(saga.compensation_error().is_none());
    }

    #[tokio::test]
    async fn failed_refund_is_reported_not_swallowed() {
        let (coordinator, payments, bookings) = setup();
        bookings.set_fail_on_create(true);
        payments.set_fail_on_add(true);

        let outcome = coordinator
            .execute(
                UserId::new("user-2"),
                ListingId::new("listing-1"),
                dates("2999-01-10", "2999-01-12"),
            )
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.code, 500);
        assert!(outcome.message.contains("80 credits remain debited"));

        // The debit really is stranded.
        assert_eq!(
            payments
                .get_wallet_amount(&UserId::new("user-2"))
                .await
                .unwrap(),
            Money::from_credits(20)
        );

        let saga = coordinator
            .get_saga(outcome.saga_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saga.state(), SagaState::Failed);
        assert!(saga.compensation_error().is_some());
    }

    #[tokio::test]
    async fn unknown_saga_is_none() {
        let (coordinator, _, _) = setup();
        assert!(coordinator.get_saga(SagaId::new()).await.unwrap().is_none());
    }
}
