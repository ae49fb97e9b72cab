//! Replayable saga execution state.

use common::{BookingId, ListingId, Money, UserId};
use serde::{Deserialize, Serialize};

use crate::events::SagaEvent;
use crate::ids::SagaId;
use crate::state::SagaState;

/// The state of one saga execution, rebuilt by replaying journal events.
///
/// Carries the context accumulated along the way: the quoted cost after the
/// quote step, the booking id after persistence, and the failure reason if
/// the saga did not complete. An execution whose state is `Compensating` (or
/// `Failed` with a compensation failure recorded) marks funds that were
/// debited without a matching booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SagaExecution {
    id: Option<SagaId>,
    saga_type: String,
    listing_id: Option<ListingId>,
    guest_id: Option<UserId>,
    state: SagaState,
    completed_steps: Vec<String>,
    total_cost: Option<Money>,
    booking_id: Option<BookingId>,
    failure_reason: Option<String>,
    compensation_error: Option<String>,
}

impl SagaExecution {
    /// Rebuilds an execution from its journal events.
    pub fn replay(events: impl IntoIterator<Item = SagaEvent>) -> Self {
        let mut execution = Self::default();
        for event in events {
            execution.apply(event);
        }
        execution
    }

    /// Applies a single event. Pure state bookkeeping, no side effects.
    pub fn apply(&mut self, event: SagaEvent) {
        match event {
            SagaEvent::SagaStarted(data) => {
                self.id = Some(data.saga_id);
                self.saga_type = data.saga_type;
                self.listing_id = Some(data.listing_id);
                self.guest_id = Some(data.guest_id);
                self.state = SagaState::Running;
            }
            SagaEvent::StepStarted(_) => {}
            SagaEvent::StepCompleted(data) => {
                self.completed_steps.push(data.step_name);
                if let Some(cost) = data.total_cost {
                    self.total_cost = Some(cost);
                }
                if let Some(id) = data.booking_id {
                    self.booking_id = Some(id);
                }
            }
            SagaEvent::StepFailed(data) => {
                self.failure_reason = Some(data.error);
            }
            SagaEvent::CompensationStarted(_) => {
                self.state = SagaState::Compensating;
            }
            SagaEvent::CompensationStepCompleted(_) => {}
            SagaEvent::CompensationStepFailed(data) => {
                self.compensation_error = Some(data.error);
            }
            SagaEvent::SagaCompleted(_) => {
                self.state = SagaState::Completed;
            }
            SagaEvent::SagaFailed(data) => {
                self.state = SagaState::Failed;
                self.failure_reason = Some(data.reason);
            }
        }
    }

    /// Returns the saga id.
    pub fn id(&self) -> Option<SagaId> {
        self.id
    }

    /// Returns the saga type.
    pub fn saga_type(&self) -> &str {
        &self.saga_type
    }

    /// Returns the listing being booked.
    pub fn listing_id(&self) -> Option<&ListingId> {
        self.listing_id.as_ref()
    }

    /// Returns the guest booking it.
    pub fn guest_id(&self) -> Option<&UserId> {
        self.guest_id.as_ref()
    }

    /// Returns the saga state.
    pub fn state(&self) -> SagaState {
        self.state
    }

    /// Returns the names of completed steps, in order.
    pub fn completed_steps(&self) -> &[String] {
        &self.completed_steps
    }

    /// Returns the quoted cost, if the quote step completed.
    pub fn total_cost(&self) -> Option<Money> {
        self.total_cost
    }

    /// Returns the created booking, if persistence completed.
    pub fn booking_id(&self) -> Option<&BookingId> {
        self.booking_id.as_ref()
    }

    /// Returns the failure reason, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Returns the compensation failure, if the refund itself failed.
    pub fn compensation_error(&self) -> Option<&str> {
        self.compensation_error.as_deref()
    }
}
