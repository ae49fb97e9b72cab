//! Payments Ledger service.
//!
//! Owns per-user wallet balances. Balances change only through the ledger's
//! debit/credit operations, each atomic per wallet, and can never go
//! negative. Nothing else about a user lives here.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{InMemoryPaymentsLedger, PaymentsLedger, Wallet};
