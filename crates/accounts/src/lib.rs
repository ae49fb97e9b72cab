//! Accounts service.
//!
//! Owns user records and resolves bearer tokens to identities. Also hosts
//! the one deliberately guarded resolution path in the system: a guest's
//! wallet balance, which is fetched from the Payments Ledger on behalf of
//! the owning caller only.

pub mod directory;
pub mod error;
pub mod funds;
pub mod identity;

pub use directory::{AccountsDirectory, InMemoryAccounts, UserProfile};
pub use error::AccountError;
pub use funds::wallet_funds;
pub use identity::IdentityProvider;
