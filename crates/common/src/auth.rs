//! Caller identity and authorization guards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::UserId;
use crate::role::Role;

/// Authorization failures.
///
/// Both variants are hard failures: the request terminates instead of
/// returning partial data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No resolvable user identity for an operation that requires one.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated, but the wrong role (or the wrong user) for the operation.
    #[error("{0}")]
    Forbidden(String),
}

/// The identity the Identity Provider resolved a bearer token to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// The user's id, shared across all services.
    pub id: UserId,
    /// The role the user acts in.
    pub role: Role,
}

impl UserIdentity {
    /// Creates an identity.
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// Per-request caller context.
///
/// An unresolvable or absent token yields an anonymous context rather than an
/// error; individual operations decide whether they require authentication.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Option<UserIdentity>,
}

impl AuthContext {
    /// Context with no authenticated user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated user.
    pub fn for_user(user: UserIdentity) -> Self {
        Self { user: Some(user) }
    }

    /// Returns the authenticated user, if any.
    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// Requires an authenticated user.
    pub fn require_user(&self) -> Result<&UserIdentity, AuthError> {
        self.user.as_ref().ok_or(AuthError::Unauthenticated)
    }

    /// Requires an authenticated user with the given role.
    ///
    /// `denied` becomes the forbidden message for a role mismatch, e.g.
    /// "Only hosts have access to listings."
    pub fn require_role(&self, role: Role, denied: &str) -> Result<&UserIdentity, AuthError> {
        let user = self.require_user()?;
        if user.role == role {
            Ok(user)
        } else {
            Err(AuthError::Forbidden(denied.to_string()))
        }
    }

    /// Requires that the authenticated user is exactly `owner`.
    pub fn require_self(&self, owner: &UserId) -> Result<&UserIdentity, AuthError> {
        let user = self.require_user()?;
        if &user.id == owner {
            Ok(user)
        } else {
            Err(AuthError::Forbidden(
                "Cannot access another user's data".to_string(),
            ))
        }
    }
}
