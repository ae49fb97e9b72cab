//! Listing Directory service.
//!
//! Owns listing records, their amenities, and pricing quotes. Availability is
//! *not* owned here: it is derived from the Booking Store's records, and the
//! gateway composes the two during search.

pub mod directory;
pub mod error;
pub mod model;

pub use directory::{
    CreateListingInput, InMemoryListingDirectory, ListingCriteria, ListingDirectory, SortOrder,
    UpdateListingInput,
};
pub use error::ListingError;
pub use model::{Amenity, AmenityCategory, Listing, ListingCoordinates, LocationType};
