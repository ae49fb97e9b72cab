//! Listing records and owned sub-entities.

use common::{ListingId, Money, UserId};
use federation::EntityRef;
use serde::{Deserialize, Serialize};

/// What kind of place a listing is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Spaceship,
    House,
    Campsite,
    Apartment,
    Room,
}

/// Grouping for amenities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmenityCategory {
    AccommodationDetails,
    SpaceSurvival,
    Outdoors,
}

impl AmenityCategory {
    /// Human-readable category label.
    pub fn display_name(&self) -> &'static str {
        match self {
            AmenityCategory::AccommodationDetails => "Accommodation Details",
            AmenityCategory::SpaceSurvival => "Space Survival",
            AmenityCategory::Outdoors => "Outdoors",
        }
    }
}

/// An amenity from the directory's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: String,
    pub category: AmenityCategory,
    pub name: String,
}

impl Amenity {
    pub fn new(
        id: impl Into<String>,
        category: AmenityCategory,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
        }
    }
}

/// Geographic position of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListingCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A listing record as owned by the Listing Directory.
///
/// `host_id` is a reference: the user record behind it belongs to Accounts
/// and is only ever exposed to other services as a stub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub host_id: UserId,
    pub title: String,
    pub description: String,
    pub photo_thumbnail: Option<String>,
    pub num_of_beds: u32,
    /// Nightly price. Quotes multiply this by the night count at quote time;
    /// already-created bookings keep their frozen cost when this changes.
    pub cost_per_night: Money,
    pub location_type: LocationType,
    pub is_featured: bool,
    pub coordinates: Option<ListingCoordinates>,
    pub amenities: Vec<Amenity>,
}

impl Listing {
    /// Stub for the host who owns this listing.
    pub fn host_ref(&self) -> EntityRef {
        EntityRef::host(&self.host_id)
    }
}
