use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Fields shared by every aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    pub id: Id,
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// New aggregate with fresh metadata
    pub fn new(id: Id) -> Self {
        Self {
            id,
            metadata: EntityMetadata::new(),
        }
    }

    /// Aggregate loaded from the database
    pub fn with_metadata(id: Id, metadata: EntityMetadata) -> Self {
        Self { id, metadata }
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
