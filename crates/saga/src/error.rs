//! Saga error types.

use thiserror::Error;

/// Hard failures of the orchestrator itself.
///
/// Domain outcomes (insufficient funds, an unavailable listing, a store
/// rejection) are not errors here: they come back to the caller as a
/// structured [`BookingOutcome`](crate::outcome::BookingOutcome). This type
/// only covers the machinery around them.
#[derive(Debug, Error)]
pub enum SagaError {
    /// The saga journal rejected an append or a read.
    #[error("saga journal error: {0}")]
    Journal(String),
}
