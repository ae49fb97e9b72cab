//! Ledger trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{Money, UserId};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// A user's wallet. Exactly one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// The owning user.
    pub user_id: UserId,
    /// Current balance. Never negative.
    pub amount: Money,
}

/// Atomic wallet operations.
///
/// Each call touches exactly one wallet, so no cross-wallet coordination is
/// needed; the implementation must make every individual debit/credit atomic
/// (no partial debit can ever be observed).
#[async_trait]
pub trait PaymentsLedger: Send + Sync {
    /// Returns the current balance for a user's wallet.
    async fn get_wallet_amount(&self, user_id: &UserId) -> Result<Money, LedgerError>;

    /// Debits the wallet, failing without moving funds if the balance is
    /// short. Returns the new balance.
    async fn subtract_funds(&self, user_id: &UserId, amount: Money) -> Result<Money, LedgerError>;

    /// Credits the wallet. Returns the updated wallet.
    async fn add_funds(&self, user_id: &UserId, amount: Money) -> Result<Wallet, LedgerError>;
}

#[derive(Debug, Default)]
struct LedgerState {
    wallets: HashMap<UserId, Money>,
    fail_on_subtract: bool,
    fail_on_add: bool,
}

/// In-memory ledger.
///
/// A single write guard around the wallet map makes each debit/credit atomic.
/// The `set_fail_on_*` switches simulate an unreachable ledger for
/// failure-path tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentsLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryPaymentsLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a wallet with a starting balance, replacing any existing one.
    pub fn open_wallet(&self, user_id: impl Into<UserId>, opening_balance: Money) {
        self.state
            .write()
            .unwrap()
            .wallets
            .insert(user_id.into(), opening_balance);
    }

    /// Simulates the ledger being unreachable for debits.
    pub fn set_fail_on_subtract(&self, fail: bool) {
        self.state.write().unwrap().fail_on_subtract = fail;
    }

    /// Simulates the ledger being unreachable for credits.
    pub fn set_fail_on_add(&self, fail: bool) {
        self.state.write().unwrap().fail_on_add = fail;
    }
}

#[async_trait]
impl PaymentsLedger for InMemoryPaymentsLedger {
    async fn get_wallet_amount(&self, user_id: &UserId) -> Result<Money, LedgerError> {
        let state = self.state.read().unwrap();
        state
            .wallets
            .get(user_id)
            .copied()
            .ok_or_else(|| LedgerError::WalletNotFound(user_id.clone()))
    }

    async fn subtract_funds(&self, user_id: &UserId, amount: Money) -> Result<Money, LedgerError> {
        if amount.is_negative() || amount.is_zero() {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        let mut state = self.state.write().unwrap();
        if state.fail_on_subtract {
            return Err(LedgerError::Unavailable("debit refused".to_string()));
        }

        let balance = state
            .wallets
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::WalletNotFound(user_id.clone()))?;

        if *balance < amount {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: *balance,
            });
        }

        *balance -= amount;
        tracing::debug!(%user_id, %amount, new_balance = %balance, "wallet debited");
        Ok(*balance)
    }

    async fn add_funds(&self, user_id: &UserId, amount: Money) -> Result<Wallet, LedgerError> {
        if amount.is_negative() || amount.is_zero() {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        let mut state = self.state.write().unwrap();
        if state.fail_on_add {
            return Err(LedgerError::Unavailable("credit refused".to_string()));
        }

        let balance = state
            .wallets
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::WalletNotFound(user_id.clone()))?;

        *balance += amount;
        tracing::debug!(%user_id, %amount, new_balance = %balance, "wallet credited");
        Ok(Wallet {
            user_id: user_id.clone(),
            amount: *balance,
        })
    }
}
