//! Directory trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{DateRange, ListingId, Money, UserId};
use federation::{EntityRef, EntityType, FederationError, ReferenceResolver};
use serde::{Deserialize, Serialize};

use crate::error::ListingError;
use crate::model::{Amenity, Listing, ListingCoordinates, LocationType};

/// Sort order for listing search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    CostAsc,
    CostDesc,
}

/// Search criteria for [`ListingDirectory::get_listings`].
///
/// Only directory-owned attributes appear here; date-range availability is a
/// Booking Store concern composed by the gateway on top of these results.
#[derive(Debug, Clone, Default)]
pub struct ListingCriteria {
    /// Exact bed count to match, if given.
    pub num_of_beds: Option<u32>,
    /// 1-based page, defaults to 1.
    pub page: Option<u32>,
    /// Page size, defaults to 5.
    pub limit: Option<u32>,
    pub sort_by: Option<SortOrder>,
}

/// Fields for a new listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListingInput {
    pub title: String,
    pub description: String,
    pub photo_thumbnail: Option<String>,
    pub num_of_beds: u32,
    pub cost_per_night: Money,
    pub location_type: LocationType,
    /// Ids from the amenity catalog.
    pub amenity_ids: Vec<String>,
}

/// Partial update for an existing listing. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListingInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub photo_thumbnail: Option<String>,
    pub num_of_beds: Option<u32>,
    pub cost_per_night: Option<Money>,
    pub location_type: Option<LocationType>,
    pub amenity_ids: Option<Vec<String>>,
}

/// The Listing Directory's operation surface.
#[async_trait]
pub trait ListingDirectory: Send + Sync {
    /// Looks up a listing by id.
    async fn get_listing(&self, id: &ListingId) -> Result<Listing, ListingError>;

    /// All listings owned by a host.
    async fn get_listings_for_user(&self, user_id: &UserId) -> Result<Vec<Listing>, ListingError>;

    /// Filtered, sorted, paginated listings.
    async fn get_listings(&self, criteria: ListingCriteria) -> Result<Vec<Listing>, ListingError>;

    /// Up to `limit` featured listings.
    async fn get_featured_listings(&self, limit: usize) -> Result<Vec<Listing>, ListingError>;

    /// Quotes the total cost of a stay: nightly cost times number of nights.
    ///
    /// The quote reflects the listing's price at call time; it is the
    /// caller's job to freeze it (bookings snapshot the quoted cost).
    async fn get_total_cost(
        &self,
        id: &ListingId,
        dates: &DateRange,
    ) -> Result<Money, ListingError>;

    /// Geographic position of a listing, if recorded.
    async fn get_listing_coordinates(
        &self,
        id: &ListingId,
    ) -> Result<Option<ListingCoordinates>, ListingError>;

    /// The directory's amenity catalog.
    async fn get_all_amenities(&self) -> Result<Vec<Amenity>, ListingError>;

    /// Creates a listing owned by `host_id`.
    async fn create_listing(
        &self,
        host_id: &UserId,
        input: CreateListingInput,
    ) -> Result<Listing, ListingError>;

    /// Updates a listing. Fails unless `host_id` owns it.
    async fn update_listing(
        &self,
        host_id: &UserId,
        listing_id: &ListingId,
        input: UpdateListingInput,
    ) -> Result<Listing, ListingError>;
}

#[derive(Debug, Default)]
struct DirectoryState {
    listings: HashMap<ListingId, Listing>,
    amenities: Vec<Amenity>,
}

/// In-memory listing directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryListingDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an amenity to the catalog.
    pub fn add_amenity(&self, amenity: Amenity) {
        self.state.write().unwrap().amenities.push(amenity);
    }

    /// Adds (or replaces) a listing record directly, bypassing the create
    /// path. Intended for seeding.
    pub fn add_listing(&self, listing: Listing) {
        self.state
            .write()
            .unwrap()
            .listings
            .insert(listing.id.clone(), listing);
    }

    fn amenities_for_ids(
        state: &DirectoryState,
        ids: &[String],
    ) -> Result<Vec<Amenity>, ListingError> {
        ids.iter()
            .map(|id| {
                state
                    .amenities
                    .iter()
                    .find(|a| &a.id == id)
                    .cloned()
                    .ok_or_else(|| ListingError::UnknownAmenity(id.clone()))
            })
            .collect()
    }
}

#[async_trait]
impl ListingDirectory for InMemoryListingDirectory {
    async fn get_listing(&self, id: &ListingId) -> Result<Listing, ListingError> {
        self.state
            .read()
            .unwrap()
            .listings
            .get(id)
            .cloned()
            .ok_or_else(|| ListingError::NotFound(id.clone()))
    }

    async fn get_listings_for_user(&self, user_id: &UserId) -> Result<Vec<Listing>, ListingError> {
        let state = self.state.read().unwrap();
        let mut listings: Vec<Listing> = state
            .listings
            .values()
            .filter(|l| &l.host_id == user_id)
            .cloned()
            .collect();
        listings.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listings)
    }

    async fn get_listings(&self, criteria: ListingCriteria) -> Result<Vec<Listing>, ListingError> {
        let state = self.state.read().unwrap();
        let mut listings: Vec<Listing> = state
            .listings
            .values()
            .filter(|l| match criteria.num_of_beds {
                Some(beds) => l.num_of_beds == beds,
                None => true,
            })
            .cloned()
            .collect();

        // Stable id order underneath the requested sort keeps pagination
        // deterministic when costs tie.
        listings.sort_by(|a, b| a.id.cmp(&b.id));
        match criteria.sort_by {
            Some(SortOrder::CostAsc) => {
                listings.sort_by_key(|l| l.cost_per_night);
            }
            Some(SortOrder::CostDesc) => {
                listings.sort_by_key(|l| std::cmp::Reverse(l.cost_per_night));
            }
            None => {}
        }

        let limit = criteria.limit.unwrap_or(5) as usize;
        let page = criteria.page.unwrap_or(1).max(1) as usize;
        let start = (page - 1) * limit;

        Ok(listings.into_iter().skip(start).take(limit).collect())
    }

    async fn get_featured_listings(&self, limit: usize) -> Result<Vec<Listing>, ListingError> {
        let state = self.state.read().unwrap();
        let mut featured: Vec<Listing> = state
            .listings
            .values()
            .filter(|l| l.is_featured)
            .cloned()
            .collect();
        featured.sort_by(|a, b| a.id.cmp(&b.id));
        featured.truncate(limit);
        Ok(featured)
    }

    async fn get_total_cost(
        &self,
        id: &ListingId,
        dates: &DateRange,
    ) -> Result<Money, ListingError> {
        let listing = self.get_listing(id).await?;
        Ok(listing.cost_per_night.multiply(dates.nights()))
    }

    async fn get_listing_coordinates(
        &self,
        id: &ListingId,
    ) -> Result<Option<ListingCoordinates>, ListingError> {
        Ok(self.get_listing(id).await?.coordinates)
    }

    async fn get_all_amenities(&self) -> Result<Vec<Amenity>, ListingError> {
        Ok(self.state.read().unwrap().amenities.clone())
    }

    async fn create_listing(
        &self,
        host_id: &UserId,
        input: CreateListingInput,
    ) -> Result<Listing, ListingError> {
        let mut state = self.state.write().unwrap();
        let amenities = Self::amenities_for_ids(&state, &input.amenity_ids)?;

        let listing = Listing {
            id: ListingId::generate(),
            host_id: host_id.clone(),
            title: input.title,
            description: input.description,
            photo_thumbnail: input.photo_thumbnail,
            num_of_beds: input.num_of_beds,
            cost_per_night: input.cost_per_night,
            location_type: input.location_type,
            is_featured: false,
            coordinates: None,
            amenities,
        };

        state.listings.insert(listing.id.clone(), listing.clone());
        tracing::info!(listing_id = %listing.id, %host_id, "listing created");
        Ok(listing)
    }

    async fn update_listing(
        &self,
        host_id: &UserId,
        listing_id: &ListingId,
        input: UpdateListingInput,
    ) -> Result<Listing, ListingError> {
        let mut state = self.state.write().unwrap();

        let amenities = match &input.amenity_ids {
            Some(ids) => Some(Self::amenities_for_ids(&state, ids)?),
            None => None,
        };

        let listing = state
            .listings
            .get_mut(listing_id)
            .ok_or_else(|| ListingError::NotFound(listing_id.clone()))?;

        if &listing.host_id != host_id {
            return Err(ListingError::NotOwnedByHost {
                listing_id: listing_id.clone(),
                host_id: host_id.clone(),
            });
        }

        if let Some(title) = input.title {
            listing.title = title;
        }
        if let Some(description) = input.description {
            listing.description = description;
        }
        if let Some(photo) = input.photo_thumbnail {
            listing.photo_thumbnail = Some(photo);
        }
        if let Some(beds) = input.num_of_beds {
            listing.num_of_beds = beds;
        }
        if let Some(cost) = input.cost_per_night {
            listing.cost_per_night = cost;
        }
        if let Some(location_type) = input.location_type {
            listing.location_type = location_type;
        }
        if let Some(amenities) = amenities {
            listing.amenities = amenities;
        }

        Ok(listing.clone())
    }
}

#[async_trait]
impl ReferenceResolver for InMemoryListingDirectory {
    type Record = Listing;

    fn owns(&self, entity_type: EntityType) -> bool {
        entity_type == EntityType::Listing
    }

    async fn resolve_reference(
        &self,
        reference: &EntityRef,
    ) -> Result<Self::Record, FederationError> {
        self.ensure_owned(reference)?;
        self.get_listing(&ListingId::new(reference.id.as_str()))
            .await
            .map_err(|_| FederationError::not_found(EntityType::Listing, reference.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AmenityCategory;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn listing(id: &str, host: &str, beds: u32, cost: i64, featured: bool) -> Listing {
        Listing {
            id: ListingId::new(id),
            host_id: UserId::new(host),
            title: format!("Listing {id}"),
            description: String::new(),
            photo_thumbnail: None,
            num_of_beds: beds,
            cost_per_night: Money::from_credits(cost),
            location_type: LocationType::Spaceship,
            is_featured: featured,
            coordinates: Some(ListingCoordinates {
                latitude: 4.0,
                longitude: 104.0,
            }),
            amenities: vec![],
        }
    }

    fn seeded() -> InMemoryListingDirectory {
        let directory = InMemoryListingDirectory::new();
        directory.add_amenity(Amenity::new(
            "am-1",
            AmenityCategory::SpaceSurvival,
            "Oxygen",
        ));
        directory.add_amenity(Amenity::new(
            "am-2",
            AmenityCategory::AccommodationDetails,
            "Interdimensional wifi",
        ));
        directory.add_listing(listing("listing-1", "user-1", 2, 40, true));
        directory.add_listing(listing("listing-2", "user-1", 4, 100, false));
        directory.add_listing(listing("listing-3", "user-9", 2, 25, true));
        directory
    }

    #[tokio::test]
    async fn get_listing_hits_and_misses() {
        let directory = seeded();
        let found = directory.get_listing(&ListingId::new("listing-2")).await;
        assert_eq!(found.unwrap().num_of_beds, 4);

        let missing = directory.get_listing(&ListingId::new("listing-404")).await;
        assert_eq!(
            missing.unwrap_err(),
            ListingError::NotFound(ListingId::new("listing-404"))
        );
    }

    #[tokio::test]
    async fn listings_for_user_only_returns_their_own() {
        let directory = seeded();
        let listings = directory
            .get_listings_for_user(&UserId::new("user-1"))
            .await
            .unwrap();
        assert_eq!(listings.len(), 2);
        assert!(listings.iter().all(|l| l.host_id == UserId::new("user-1")));
    }

    #[tokio::test]
    async fn search_filters_by_bed_count() {
        let directory = seeded();
        let listings = directory
            .get_listings(ListingCriteria {
                num_of_beds: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listings.len(), 2);
        assert!(listings.iter().all(|l| l.num_of_beds == 2));
    }

    #[tokio::test]
    async fn search_sorts_by_cost() {
        let directory = seeded();
        let asc = directory
            .get_listings(ListingCriteria {
                sort_by: Some(SortOrder::CostAsc),
                ..Default::default()
            })
            .await
            .unwrap();
        let costs: Vec<i64> = asc.iter().map(|l| l.cost_per_night.credits()).collect();
        assert_eq!(costs, vec![25, 40, 100]);

        let desc = directory
            .get_listings(ListingCriteria {
                sort_by: Some(SortOrder::CostDesc),
                ..Default::default()
            })
            .await
            .unwrap();
        let costs: Vec<i64> = desc.iter().map(|l| l.cost_per_night.credits()).collect();
        assert_eq!(costs, vec![100, 40, 25]);
    }

    #[tokio::test]
    async fn search_paginates() {
        let directory = seeded();
        let page1 = directory
            .get_listings(ListingCriteria {
                limit: Some(2),
                page: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page1.len(), 2);

        let page2 = directory
            .get_listings(ListingCriteria {
                limit: Some(2),
                page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page2.len(), 1);
        assert_ne!(page1[0].id, page2[0].id);
    }

    #[tokio::test]
    async fn featured_listings_respect_limit() {
        let directory = seeded();
        let featured = directory.get_featured_listings(3).await.unwrap();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|l| l.is_featured));

        let featured = directory.get_featured_listings(1).await.unwrap();
        assert_eq!(featured.len(), 1);
    }

    #[tokio::test]
    async fn total_cost_is_nights_times_nightly_cost() {
        let directory = seeded();
        let dates = DateRange::new(date("2024-01-10"), date("2024-01-12")).unwrap();
        let cost = directory
            .get_total_cost(&ListingId::new("listing-1"), &dates)
            .await
            .unwrap();
        assert_eq!(cost, Money::from_credits(80));
    }

    #[tokio::test]
    async fn create_listing_attaches_catalog_amenities() {
        let directory = seeded();
        let host = UserId::new("user-1");
        let created = directory
            .create_listing(
                &host,
                CreateListingInput {
                    title: "An Orbital Oasis".to_string(),
                    description: "Low gravity, high comfort".to_string(),
                    photo_thumbnail: None,
                    num_of_beds: 3,
                    cost_per_night: Money::from_credits(120),
                    location_type: LocationType::Spaceship,
                    amenity_ids: vec!["am-1".to_string(), "am-2".to_string()],
                },
            )
            .await
            .unwrap();

        assert_eq!(created.amenities.len(), 2);
        assert_eq!(created.host_id, host);
        assert!(!created.is_featured);

        let reread = directory.get_listing(&created.id).await.unwrap();
        assert_eq!(reread, created);
    }

    #[tokio::test]
    async fn create_listing_rejects_unknown_amenities() {
        let directory = seeded();
        let err = directory
            .create_listing(
                &UserId::new("user-1"),
                CreateListingInput {
                    title: "x".to_string(),
                    description: String::new(),
                    photo_thumbnail: None,
                    num_of_beds: 1,
                    cost_per_night: Money::from_credits(1),
                    location_type: LocationType::Room,
                    amenity_ids: vec!["am-404".to_string()],
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, ListingError::UnknownAmenity("am-404".to_string()));
    }

    #[tokio::test]
    async fn update_listing_enforces_ownership() {
        let directory = seeded();
        let err = directory
            .update_listing(
                &UserId::new("user-9"),
                &ListingId::new("listing-1"),
                UpdateListingInput {
                    title: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::NotOwnedByHost { .. }));

        let updated = directory
            .update_listing(
                &UserId::new("user-1"),
                &ListingId::new("listing-1"),
                UpdateListingInput {
                    cost_per_night: Some(Money::from_credits(55)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.cost_per_night, Money::from_credits(55));
        // Untouched fields survive the partial update.
        assert_eq!(updated.num_of_beds, 2);
    }

    #[tokio::test]
    async fn resolves_listing_stubs() {
        let directory = seeded();
        let record = directory
            .resolve_reference(&EntityRef::listing(&ListingId::new("listing-3")))
            .await
            .unwrap();
        assert_eq!(record.id, ListingId::new("listing-3"));

        let err = directory
            .resolve_reference(&EntityRef::new(EntityType::Guest, "user-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, FederationError::WrongType { .. }));
    }
}
