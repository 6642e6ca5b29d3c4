use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::domain::a001_event::Event;

use crate::domain::a001_event::repository;

/// Event persistence used by the import
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Non-deleted events starting on `start_date`
    async fn find_candidates(&self, start_date: NaiveDate) -> Result<Vec<Event>>;

    async fn insert(&self, event: &Event) -> Result<()>;

    async fn update(&self, event: &Event) -> Result<()>;
}

/// Store backed by the a001_event table
pub struct RepositoryEventStore;

#[async_trait]
impl EventStore for RepositoryEventStore {
    async fn find_candidates(&self, start_date: NaiveDate) -> Result<Vec<Event>> {
        repository::list_by_start_date(start_date).await
    }

    async fn insert(&self, event: &Event) -> Result<()> {
        repository::insert(event).await?;
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<()> {
        repository::update(event).await
    }
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryEventStore {
        pub events: Mutex<Vec<Event>>,
    }

    impl InMemoryEventStore {
        pub fn with_events(events: Vec<Event>) -> Self {
            Self {
                events: Mutex::new(events),
            }
        }

        pub fn snapshot(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventStore for InMemoryEventStore {
        async fn find_candidates(&self, start_date: NaiveDate) -> Result<Vec<Event>> {
            Ok(self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.start_date == start_date && !e.base.metadata.is_deleted)
                .cloned()
                .collect())
        }

        async fn insert(&self, event: &Event) -> Result<()> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn update(&self, event: &Event) -> Result<()> {
            let mut events = self.events.lock().unwrap();
            let slot = events
                .iter_mut()
                .find(|e| e.base.id == event.base.id)
                .ok_or_else(|| anyhow::anyhow!("event {} not found", event.to_string_id()))?;
            *slot = event.clone();
            Ok(())
        }
    }
}
