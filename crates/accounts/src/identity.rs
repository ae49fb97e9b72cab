//! Token-to-identity resolution.

use async_trait::async_trait;
use common::UserIdentity;

/// Resolves a bearer token to a user identity.
///
/// An unknown or missing token is not an error here: it yields `None`, and
/// the gateway builds an unauthenticated context from it. Operations that
/// need a user reject the context later, at the field level.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the identity the token belongs to, if any.
    async fn identity_for_token(&self, token: &str) -> Option<UserIdentity>;
}
