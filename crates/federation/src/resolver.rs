//! The per-service resolution contract.

use async_trait::async_trait;

use crate::error::FederationError;
use crate::reference::{EntityRef, EntityType};

/// Turns reference stubs into fully populated records.
///
/// Each service implements this for the entity types it owns. Resolution is
/// identity-based and deliberately unauthenticated: authorization is enforced
/// at the field that produced the reference, not at resolution time. The one
/// exception, sensitive derived fields such as a guest's wallet balance, is
/// resolved through an explicitly guarded path instead of this trait.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    /// The fully populated record type this service resolves stubs into.
    type Record;

    /// Returns true if this service owns records of the given type.
    fn owns(&self, entity_type: EntityType) -> bool;

    /// Resolves a stub into the owning service's full record.
    ///
    /// Fails with [`FederationError::NotFound`] when the id does not exist
    /// and [`FederationError::WrongType`] when the stub belongs to another
    /// service (use [`ensure_owned`](Self::ensure_owned) first).
    async fn resolve_reference(
        &self,
        reference: &EntityRef,
    ) -> Result<Self::Record, FederationError>;

    /// Rejects stubs this service does not own.
    fn ensure_owned(&self, reference: &EntityRef) -> Result<(), FederationError> {
        if self.owns(reference.entity_type) {
            Ok(())
        } else {
            Err(FederationError::WrongType {
                actual: reference.entity_type,
            })
        }
    }
}
