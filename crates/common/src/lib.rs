//! Shared value types for the stay-booking platform.
//!
//! Every service crate depends on this one: typed entity identifiers,
//! monetary amounts, calendar date ranges, and the caller identity used for
//! authorization decisions at the gateway and inside resolvers.

pub mod auth;
pub mod dates;
pub mod ids;
pub mod money;
pub mod role;

pub use auth::{AuthContext, AuthError, UserIdentity};
pub use dates::{DateRange, DateRangeError};
pub use ids::{BookingId, ListingId, ReviewId, UserId};
pub use money::Money;
pub use role::Role;
