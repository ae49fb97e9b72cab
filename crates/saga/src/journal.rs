//! Saga journal.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::SagaError;
use crate::events::SagaEvent;
use crate::ids::SagaId;

/// Append-only log of saga events.
///
/// One saga has exactly one writer (its coordinator invocation), so the
/// journal needs no version checks — only ordered appends and replayable
/// reads. The journal is what makes the debit-without-booking window
/// observable after a crash.
#[async_trait]
pub trait SagaJournal: Send + Sync {
    /// Appends an event to a saga's log.
    async fn append(&self, saga_id: SagaId, event: SagaEvent) -> Result<(), SagaError>;

    /// All events recorded for a saga, in append order. Empty for unknown
    /// saga ids.
    async fn events_for(&self, saga_id: SagaId) -> Result<Vec<SagaEvent>, SagaError>;
}

/// In-memory saga journal.
#[derive(Debug, Clone, Default)]
pub struct InMemorySagaJournal {
    entries: Arc<RwLock<HashMap<SagaId, Vec<SagaEvent>>>>,
}

impl InMemorySagaJournal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of sagas with at least one event.
    pub fn saga_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

#[async_trait]
impl SagaJournal for InMemorySagaJournal {
    async fn append(&self, saga_id: SagaId, event: SagaEvent) -> Result<(), SagaError> {
        self.entries
            .write()
            .unwrap()
            .entry(saga_id)
            .or_default()
            .push(event);
        Ok(())
    }

    async fn events_for(&self, saga_id: SagaId) -> Result<Vec<SagaEvent>, SagaError> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .get(&saga_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking_flow;

    #[tokio::test]
    async fn append_preserves_order() {
        let journal = InMemorySagaJournal::new();
        let saga_id = SagaId::new();

        journal
            .append(saga_id, SagaEvent::step_started(booking_flow::STEP_QUOTE))
            .await
            .unwrap();
        journal
            .append(saga_id, SagaEvent::step_started(booking_flow::STEP_DEBIT))
            .await
            .unwrap();

        let events = journal.events_for(saga_id).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "StepStarted");
        if let SagaEvent::StepStarted(data) = &events[1] {
            assert_eq!(data.step_name, booking_flow::STEP_DEBIT);
        } else {
            panic!("expected StepStarted");
        }
    }

    #[tokio::test]
    async fn unknown_saga_yields_no_events() {
        let journal = InMemorySagaJournal::new();
        assert!(journal.events_for(SagaId::new()).await.unwrap().is_empty());
        assert_eq!(journal.saga_count(), 0);
    }

    #[tokio::test]
    async fn sagas_are_isolated() {
        let journal = InMemorySagaJournal::new();
        let a = SagaId::new();
        let b = SagaId::new();

        journal
            .append(a, SagaEvent::step_started(booking_flow::STEP_QUOTE))
            .await
            .unwrap();
        journal.append(b, SagaEvent::saga_completed()).await.unwrap();

        assert_eq!(journal.events_for(a).await.unwrap().len(), 1);
        assert_eq!(journal.events_for(b).await.unwrap().len(), 1);
        assert_eq!(journal.saga_count(), 2);
    }
}
