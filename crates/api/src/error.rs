//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookings::BookingError;
use common::AuthError;
use federation::FederationError;
use listings::ListingError;
use payments::LedgerError;
use saga::SagaError;

/// API-level error type that maps to HTTP responses.
///
/// Authentication, authorization, and not-found failures terminate the
/// request; domain violations on mutation paths never reach this type —
/// those come back inside structured response bodies.
#[derive(Debug)]
pub enum ApiError {
    /// No resolvable user identity.
    Unauthenticated,
    /// Authenticated but not allowed.
    Forbidden(String),
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Internal or upstream failure.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "authentication required".to_string())
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => ApiError::Unauthenticated,
            AuthError::Forbidden(msg) => ApiError::Forbidden(msg),
        }
    }
}

impl From<FederationError> for ApiError {
    fn from(err: FederationError) -> Self {
        match &err {
            FederationError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            FederationError::WrongType { .. } => ApiError::BadRequest(err.to_string()),
            FederationError::Forbidden(msg) => ApiError::Forbidden(msg.clone()),
            FederationError::Upstream(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        match &err {
            ListingError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ListingError::NotOwnedByHost { .. } => ApiError::Forbidden(err.to_string()),
            ListingError::UnknownAmenity(_) => ApiError::BadRequest(err.to_string()),
            ListingError::Unavailable(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::NotFound(_) => ApiError::NotFound(err.to_string()),
            // Availability conflicts on query paths are client errors; the
            // booking mutation reports them in its structured body instead.
            BookingError::ListingUnavailable { .. } => ApiError::BadRequest(err.to_string()),
            BookingError::Unavailable(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::WalletNotFound(_) => ApiError::NotFound(err.to_string()),
            LedgerError::InsufficientFunds { .. } | LedgerError::NonPositiveAmount(_) => {
                ApiError::BadRequest(err.to_string())
            }
            LedgerError::Unavailable(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<accounts::AccountError> for ApiError {
    fn from(err: accounts::AccountError) -> Self {
        match err {
            accounts::AccountError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            accounts::AccountError::Auth(auth) => auth.into(),
            accounts::AccountError::Ledger(ledger) => ledger.into(),
        }
    }
}

impl From<SagaError> for ApiError {
    fn from(err: SagaError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<reviews::ReviewError> for ApiError {
    fn from(err: reviews::ReviewError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
