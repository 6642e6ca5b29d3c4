use super::EntityMetadata;

/// Root of an aggregate
///
/// Instance accessors plus the static names every aggregate publishes
/// (used for table names and log messages).
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Index of the aggregate in the system, e.g. "a001"
    fn aggregate_index() -> &'static str;

    /// Collection name, e.g. "event"
    fn collection_name() -> &'static str;

    /// Singular display name, e.g. "Event"
    fn element_name() -> &'static str;

    /// Plural display name, e.g. "Events"
    fn list_name() -> &'static str;

    /// Full name of the aggregate, e.g. "a001_event" (also the table name)
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
