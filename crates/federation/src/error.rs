//! Reference resolution failures.

use thiserror::Error;

use crate::reference::EntityType;

/// Errors surfaced by a service's reference-resolution entry point.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FederationError {
    /// A stub of a type this service does not own reached its resolver.
    /// This is a routing bug in the caller, not a data miss.
    #[error("cannot resolve a {actual} reference here: this service does not own {actual}")]
    WrongType { actual: EntityType },

    /// The referenced id does not exist in the owning service.
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: EntityType, id: String },

    /// The caller is not allowed to see the resolved data.
    #[error("{0}")]
    Forbidden(String),

    /// A dependency call failed for reasons outside domain logic.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl FederationError {
    /// Not-found for a typed id.
    pub fn not_found(entity_type: EntityType, id: impl Into<String>) -> Self {
        FederationError::NotFound {
            entity_type,
            id: id.into(),
        }
    }
}
