//! Accounts error types.

use common::{AuthError, UserId};
use payments::LedgerError;
use thiserror::Error;

/// Errors that can occur during accounts operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// No user record exists for the id.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// The caller failed an authentication or authorization guard.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The Payments Ledger call failed.
    #[error("payments ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
