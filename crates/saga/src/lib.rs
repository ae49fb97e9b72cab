//! Booking transaction orchestration.
//!
//! Creating a booking spans two independently-owned stores: the Payments
//! Ledger (the guest's wallet) and the Booking Store (the booking record).
//! There is no shared database and no two-phase commit, so the operation
//! runs as a saga:
//!
//! 1. Quote the total cost from the Listing Directory.
//! 2. Debit the guest's wallet (atomic at the ledger).
//! 3. Persist the booking.
//!
//! A debit failure aborts the saga with nothing to undo. A persistence
//! failure triggers the single compensating action (crediting the debit
//! back) before the failure is reported. Between steps 2 and 3 there is a
//! window where funds are held without a booking; every execution is
//! journaled so that window is observable, but no automatic recovery runs.

pub mod booking_flow;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod execution;
pub mod ids;
pub mod journal;
pub mod outcome;
pub mod state;

pub use coordinator::BookingSagaCoordinator;
pub use error::SagaError;
pub use events::SagaEvent;
pub use execution::SagaExecution;
pub use ids::SagaId;
pub use journal::{InMemorySagaJournal, SagaJournal};
pub use outcome::BookingOutcome;
pub use state::SagaState;
