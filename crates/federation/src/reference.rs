//! Typed entity stubs exchanged between services.

use common::{BookingId, ListingId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// The federated entity types, each owned by exactly one service.
///
/// `Guest` and `Host` are distinct types on the wire even though both
/// resolve to the same underlying user record: the type carries the role a
/// reference was made in (a review's author, a listing's host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Listing,
    Booking,
    Guest,
    Host,
    Review,
}

impl EntityType {
    /// Returns the type name as it appears in `__typename`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Listing => "Listing",
            EntityType::Booking => "Booking",
            EntityType::Guest => "Guest",
            EntityType::Host => "Host",
            EntityType::Review => "Review",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference stub: the identity of an entity owned by another service.
///
/// Stubs exist only in transit. They carry no fields beyond identity and are
/// never persisted; persisting one would copy foreign state and break the
/// single-owner rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// The owning type of the referenced entity.
    #[serde(rename = "__typename")]
    pub entity_type: EntityType,
    /// The referenced entity's id.
    pub id: String,
}

impl EntityRef {
    /// Creates a stub for an arbitrary type and id.
    pub fn new(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: id.into(),
        }
    }

    /// Stub for a listing.
    pub fn listing(id: &ListingId) -> Self {
        Self::new(EntityType::Listing, id.as_str())
    }

    /// Stub for a booking.
    pub fn booking(id: &BookingId) -> Self {
        Self::new(EntityType::Booking, id.as_str())
    }

    /// Stub for a user acting as guest.
    pub fn guest(id: &UserId) -> Self {
        Self::new(EntityType::Guest, id.as_str())
    }

    /// Stub for a user acting as host.
    pub fn host(id: &UserId) -> Self {
        Self::new(EntityType::Host, id.as_str())
    }

    /// Stub for a review.
    pub fn review(id: &ReviewId) -> Self {
        Self::new(EntityType::Review, id.as_str())
    }
}
