pub mod csv_parser;
pub mod dedup;
pub mod event_store;
pub mod executor;
pub mod row_mapper;
pub mod similarity;

use contracts::usecases::common::UseCaseMetadata;

pub use event_store::{EventStore, RepositoryEventStore};
pub use executor::ImportExecutor;

pub struct ImportEventsCsv;

impl UseCaseMetadata for ImportEventsCsv {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_events_csv"
    }

    fn display_name() -> &'static str {
        "Import events from CSV"
    }

    fn description() -> &'static str {
        "Maps CSV columns onto event fields, detects duplicates and imports the rows"
    }
}
