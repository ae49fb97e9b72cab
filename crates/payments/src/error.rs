//! Ledger error types.

use common::{Money, UserId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No wallet exists for the user.
    #[error("no wallet found for user {0}")]
    WalletNotFound(UserId),

    /// A debit would take the balance below zero. No funds move.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Money,
        available: Money,
    },

    /// Amounts moved through the ledger must be positive.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    /// The ledger itself could not be reached.
    #[error("payments ledger unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_message_names_both_amounts() {
        let err = LedgerError::InsufficientFunds {
            requested: Money::from_credits(30),
            available: Money::from_credits(20),
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: requested 30, available 20"
        );
    }
}
