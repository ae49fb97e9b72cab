//! Cross-service reference resolution.
//!
//! Services own disjoint entity types and never share storage. When one
//! service's record points at another's (a booking's listing, a review's
//! author), the owning side of the field emits only a typed stub
//! `{__typename, id}`; the gateway re-dispatches the stub to the service
//! that owns the type, which resolves it into the full record.
//!
//! This crate defines the protocol: the [`EntityRef`] stub, the set of
//! federated [`EntityType`]s, and the [`ReferenceResolver`] contract each
//! owning service implements.

pub mod error;
pub mod reference;
pub mod resolver;

pub use error::FederationError;
pub use reference::{EntityRef, EntityType};
pub use resolver::ReferenceResolver;
