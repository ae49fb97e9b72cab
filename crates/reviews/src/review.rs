//! Review records and authorship attribution.

use common::{BookingId, ReviewId, Role, UserId};
use federation::EntityRef;
use serde::{Deserialize, Serialize};

/// What a review is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewTarget {
    Guest,
    Host,
    Listing,
}

impl ReviewTarget {
    /// The role that authored a review of this target.
    ///
    /// Pure mapping: only the host reviews the guest, and only the guest
    /// reviews the host or the listing.
    pub fn author_role(&self) -> Role {
        match self {
            ReviewTarget::Guest => Role::Host,
            ReviewTarget::Host | ReviewTarget::Listing => Role::Guest,
        }
    }

    /// Returns the target name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewTarget::Guest => "GUEST",
            ReviewTarget::Host => "HOST",
            ReviewTarget::Listing => "LISTING",
        }
    }
}

impl std::fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A review record as owned by the Review Store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub booking_id: BookingId,
    pub target_type: ReviewTarget,
    /// Id of the reviewed entity: a user id for guest/host targets, a
    /// listing id for listing targets.
    pub target_id: String,
    pub author_id: UserId,
    /// 1 through 5.
    pub rating: u8,
    pub text: String,
}

impl Review {
    /// Stub for the review's author, typed by the derived role.
    pub fn author_ref(&self) -> EntityRef {
        match self.target_type.author_role() {
            Role::Host => EntityRef::host(&self.author_id),
            Role::Guest => EntityRef::guest(&self.author_id),
        }
    }
}

/// Rating and text submitted for a new review.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub rating: u8,
    pub text: String,
}
