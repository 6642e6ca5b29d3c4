//! CSV import of events: shared request/response types and the column mapper

pub mod column_mapping;
pub mod fields;
pub mod request;
pub mod response;

pub use column_mapping::{ColumnMapper, ColumnMapping, MappingError};
pub use fields::EventField;
pub use request::{DeduplicationMode, ImportRequest, ParseRequest, ParsedRow};
pub use response::{
    ImportDecision, ImportResult, ParseResponse, PreviewResponse, PreviewRow, RowOutcome,
    RowStatus,
};
