//! Structured saga results.

use bookings::Booking;
use serde::Serialize;

use crate::ids::SagaId;

/// What a `createBooking` call produced.
///
/// Domain failures are a normal response shape, not an exception: the caller
/// always gets a code, a success flag, and a human-readable message, plus
/// the booking when one was created. Only a missing authenticated user is
/// surfaced as a hard error — before the saga ever starts.
#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    /// The saga execution behind this outcome, for journal lookups.
    pub saga_id: SagaId,
    /// HTTP-flavored status code (200, 400, 404, 500).
    pub code: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

impl BookingOutcome {
    /// A successful booking.
    pub fn succeeded(saga_id: SagaId, booking: Booking) -> Self {
        Self {
            saga_id,
            code: 200,
            success: true,
            message: "Successfully booked!".to_string(),
            booking: Some(booking),
        }
    }

    /// A failed booking with no record created.
    pub fn failed(saga_id: SagaId, code: u16, message: impl Into<String>) -> Self {
        Self {
            saga_id,
            code,
            success: false,
            message: message.into(),
            booking: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_omits_booking_field() {
        let outcome = BookingOutcome::failed(SagaId::new(), 400, "no funds");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["code"], 400);
        assert_eq!(json["success"], false);
        assert!(json.get("booking").is_none());
    }
}
