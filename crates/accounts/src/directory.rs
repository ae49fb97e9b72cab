//! User records and their reference resolution.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{Role, UserId, UserIdentity};
use federation::{EntityRef, EntityType, FederationError, ReferenceResolver};
use serde::{Deserialize, Serialize};

use crate::error::AccountError;
use crate::identity::IdentityProvider;

/// A user record as owned by the Accounts service.
///
/// One entity covers both roles; role-specific data (wallet, host rating)
/// lives in the services that own those capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub profile_picture: Option<String>,
}

impl UserProfile {
    /// Creates a profile.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            profile_picture: None,
        }
    }

    /// The identity this profile resolves tokens to.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.id.clone(), self.role)
    }
}

/// Read access to user records.
#[async_trait]
pub trait AccountsDirectory: Send + Sync {
    /// Looks up a user by id.
    async fn get_user(&self, user_id: &UserId) -> Result<UserProfile, AccountError>;
}

/// In-memory accounts store.
///
/// Tokens are opaque strings mapped straight to user ids; token issuance is
/// out of scope, so a seeded token equals the id it authenticates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccounts {
    users: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryAccounts {
    /// Creates an empty accounts store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a user record.
    pub fn add_user(&self, profile: UserProfile) {
        self.users
            .write()
            .unwrap()
            .insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl AccountsDirectory for InMemoryAccounts {
    async fn get_user(&self, user_id: &UserId) -> Result<UserProfile, AccountError> {
        self.users
            .read()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| AccountError::UserNotFound(user_id.clone()))
    }
}

#[async_trait]
impl IdentityProvider for InMemoryAccounts {
    async fn identity_for_token(&self, token: &str) -> Option<UserIdentity> {
        self.users
            .read()
            .unwrap()
            .get(&UserId::new(token))
            .map(UserProfile::identity)
    }
}

#[async_trait]
impl ReferenceResolver for InMemoryAccounts {
    type Record = UserProfile;

    fn owns(&self, entity_type: EntityType) -> bool {
        matches!(entity_type, EntityType::Guest | EntityType::Host)
    }

    async fn resolve_reference(
        &self,
        reference: &EntityRef,
    ) -> Result<Self::Record, FederationError> {
        self.ensure_owned(reference)?;
        let user_id = UserId::new(reference.id.as_str());
        self.get_user(&user_id)
            .await
            .map_err(|_| FederationError::not_found(reference.entity_type, reference.id.clone()))
    }
}
