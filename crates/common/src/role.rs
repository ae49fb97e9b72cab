//! User roles.

use serde::{Deserialize, Serialize};

/// The role a user acts in.
///
/// Guests and hosts are the same underlying user entity distinguished by a
/// role tag; role-specific capabilities (a guest's wallet, a host's rating)
/// live in the services that own them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A traveller who books stays and holds a wallet.
    Guest,
    /// A user who owns listings and receives bookings.
    Host,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "Guest",
            Role::Host => "Host",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
