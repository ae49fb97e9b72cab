//! Saga journal events.

use chrono::{DateTime, Utc};
use common::{BookingId, ListingId, Money, UserId};
use serde::{Deserialize, Serialize};

use crate::ids::SagaId;

/// Events recorded while a booking saga executes.
///
/// The journal is the only durable trace of a saga: replaying these events
/// rebuilds the execution, including a debit that was never matched by a
/// booking or a refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SagaEvent {
    /// Saga execution started.
    SagaStarted(SagaStartedData),

    /// A saga step started execution.
    StepStarted(StepData),

    /// A saga step completed successfully.
    StepCompleted(StepCompletedData),

    /// A saga step failed.
    StepFailed(StepFailedData),

    /// Compensation started after a step failure.
    CompensationStarted(CompensationData),

    /// The compensating credit was applied.
    CompensationStepCompleted(StepData),

    /// The compensating credit itself failed: funds remain debited without
    /// a booking. Surfaced to the caller, never silently accepted.
    CompensationStepFailed(StepFailedData),

    /// Saga completed successfully.
    SagaCompleted(SagaCompletedData),

    /// Saga finished without producing a booking.
    SagaFailed(SagaFailedData),
}

impl SagaEvent {
    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            SagaEvent::SagaStarted(_) => "SagaStarted",
            SagaEvent::StepStarted(_) => "StepStarted",
            SagaEvent::StepCompleted(_) => "StepCompleted",
            SagaEvent::StepFailed(_) => "StepFailed",
            SagaEvent::CompensationStarted(_) => "CompensationStarted",
            SagaEvent::CompensationStepCompleted(_) => "CompensationStepCompleted",
            SagaEvent::CompensationStepFailed(_) => "CompensationStepFailed",
            SagaEvent::SagaCompleted(_) => "SagaCompleted",
            SagaEvent::SagaFailed(_) => "SagaFailed",
        }
    }
}

/// Data for SagaStarted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaStartedData {
    pub saga_id: SagaId,
    pub listing_id: ListingId,
    pub guest_id: UserId,
    pub saga_type: String,
    pub started_at: DateTime<Utc>,
}

/// Data for events that carry only a step name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepData {
    pub step_name: String,
}

/// Data for StepCompleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepCompletedData {
    pub step_name: String,
    /// Quoted cost (set after the quote step).
    pub total_cost: Option<Money>,
    /// Created booking (set after the persist step).
    pub booking_id: Option<BookingId>,
}

/// Data for StepFailed and CompensationStepFailed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepFailedData {
    pub step_name: String,
    pub error: String,
}

/// Data for CompensationStarted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationData {
    /// The step whose failure triggered compensation.
    pub from_step: String,
}

/// Data for SagaCompleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaCompletedData {
    pub completed_at: DateTime<Utc>,
}

/// Data for SagaFailed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaFailedData {
    pub reason: String,
    pub failed_at: DateTime<Utc>,
}

// Convenience constructors
impl SagaEvent {
    /// Creates a SagaStarted event.
    pub fn saga_started(
        saga_id: SagaId,
        listing_id: ListingId,
        guest_id: UserId,
        saga_type: impl Into<String>,
    ) -> Self {
        SagaEvent::SagaStarted(SagaStartedData {
            saga_id,
            listing_id,
            guest_id,
            saga_type: saga_type.into(),
            started_at: Utc::now(),
        })
    }

    /// Creates a StepStarted event.
    pub fn step_started(step_name: impl Into<String>) -> Self {
        SagaEvent::StepStarted(StepData {
            step_name: step_name.into(),
        })
    }

    /// Creates a StepCompleted event.
    pub fn step_completed(
        step_name: impl Into<String>,
        total_cost: Option<Money>,
        booking_id: Option<BookingId>,
    ) -> Self {
        SagaEvent::StepCompleted(StepCompletedData {
            step_name: step_name.into(),
            total_cost,
            booking_id,
        })
    }

    /// Creates a StepFailed event.
    pub fn step_failed(step_name: impl Into<String>, error: impl Into<String>) -> Self {
        SagaEvent::StepFailed(StepFailedData {
            step_name: step_name.into(),
            error: error.into(),
        })
    }

    /// Creates a CompensationStarted event.
    pub fn compensation_started(from_step: impl Into<String>) -> Self {
        SagaEvent::CompensationStarted(CompensationData {
            from_step: from_step.into(),
        })
    }

    /// Creates a CompensationStepCompleted event.
    pub fn compensation_step_completed(step_name: impl Into<String>) -> Self {
        SagaEvent::CompensationStepCompleted(StepData {
            step_name: step_name.into(),
        })
    }

    /// Creates a CompensationStepFailed event.
    pub fn compensation_step_failed(
        step_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        SagaEvent::CompensationStepFailed(StepFailedData {
            step_name: step_name.into(),
            error: error.into(),
        })
    }

    /// Creates a SagaCompleted event.
    pub fn saga_completed() -> Self {
        SagaEvent::SagaCompleted(SagaCompletedData {
            completed_at: Utc::now(),
        })
    }

    /// Creates a SagaFailed event.
    pub fn saga_failed(reason: impl Into<String>) -> Self {
        SagaEvent::SagaFailed(SagaFailedData {
            reason: reason.into(),
            failed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking_flow;

    #[test]
    fn event_types() {
        let saga_id = SagaId::new();
        let listing = ListingId::new("listing-1");
        let guest = UserId::new("user-2");

        assert_eq!(
            SagaEvent::saga_started(saga_id, listing, guest, booking_flow::SAGA_TYPE).event_type(),
            "SagaStarted"
        );
        assert_eq!(
            SagaEvent::step_started(booking_flow::STEP_QUOTE).event_type(),
            "StepStarted"
        );
        assert_eq!(
            SagaEvent::step_completed(
                booking_flow::STEP_QUOTE,
                Some(Money::from_credits(80)),
                None
            )
            .event_type(),
            "StepCompleted"
        );
        assert_eq!(
            SagaEvent::step_failed(booking_flow::STEP_DEBIT, "insufficient funds").event_type(),
            "StepFailed"
        );
        assert_eq!(
            SagaEvent::compensation_started(booking_flow::STEP_PERSIST).event_type(),
            "CompensationStarted"
        );
        assert_eq!(
            SagaEvent::compensation_step_completed(booking_flow::STEP_DEBIT).event_type(),
            "CompensationStepCompleted"
        );
        assert_eq!(
            SagaEvent::compensation_step_failed(booking_flow::STEP_DEBIT, "ledger down")
                .event_type(),
            "CompensationStepFailed"
        );
        assert_eq!(SagaEvent::saga_completed().event_type(), "SagaCompleted");
        assert_eq!(
            SagaEvent::saga_failed("persist failed").event_type(),
            "SagaFailed"
        );
    }

    #[test]
    fn serialization_roundtrip_keeps_event_type() {
        let events = vec![
            SagaEvent::saga_started(
                SagaId::new(),
                ListingId::new("listing-1"),
                UserId::new("user-2"),
                booking_flow::SAGA_TYPE,
            ),
            SagaEvent::step_completed(
                booking_flow::STEP_PERSIST,
                None,
                Some(BookingId::new("booking-1")),
            ),
            SagaEvent::compensation_step_failed(booking_flow::STEP_DEBIT, "timeout"),
        ];

        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: SagaEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event.event_type(), back.event_type());
        }
    }

    #[test]
    fn step_completed_carries_booking_id() {
        let event = SagaEvent::step_completed(
            booking_flow::STEP_PERSIST,
            None,
            Some(BookingId::new("booking-7")),
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: SagaEvent = serde_json::from_str(&json).unwrap();

        if let SagaEvent::StepCompleted(data) = back {
            assert_eq!(data.step_name, booking_flow::STEP_PERSIST);
            assert_eq!(data.booking_id, Some(BookingId::new("booking-7")));
            assert!(data.total_cost.is_none());
        } else {
            panic!("expected StepCompleted");
        }
    }
}
