//! Typed entity identifiers.
//!
//! Ids are string-backed: they travel between services as opaque strings and
//! must stay globally unique and stable regardless of which service minted
//! them. Wrapping them prevents mixing up, say, a listing id with a user id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mints a fresh, globally unique id.
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "-{}"), Uuid::new_v4()))
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Unique identifier for a listing, owned by the Listing Directory.
    ListingId, "listing"
}

string_id! {
    /// Unique identifier for a booking, owned by the Booking Store.
    BookingId, "booking"
}

string_id! {
    /// Unique identifier for a user (guest or host), owned by Accounts.
    UserId, "user"
}

string_id! {
    /// Unique identifier for a review, owned by the Review Store.
    ReviewId, "review"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_conversion_preserves_value() {
        let id = ListingId::new("listing-1");
        assert_eq!(id.as_str(), "listing-1");

        let id2: UserId = "user-7".into();
        assert_eq!(id2.to_string(), "user-7");
    }

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let a = BookingId::generate();
        let b = BookingId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("booking-"));
    }

    #[test]
    fn ids_of_different_kinds_do_not_compare() {
        // Compile-time property: ListingId and BookingId are distinct types.
        let listing = ListingId::new("x-1");
        let booking = BookingId::new("x-1");
        assert_eq!(listing.as_str(), booking.as_str());
    }

    #[test]
    fn serialization_is_transparent() {
        let id = ReviewId::new("review-9");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"review-9\"");
        let back: ReviewId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
