use super::column_mapping::ColumnMapping;
use super::fields::EventField;
use super::request::ParsedRow;
use serde::{Deserialize, Serialize};

/// Result of POST /api/u501/import/parse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResponse {
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
    /// Auto-mapped suggestion, one entry per header
    pub mappings: Vec<ColumnMapping>,
    pub unmapped_required: Vec<EventField>,
}

/// What happens to a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ImportDecision {
    Insert,
    Update {
        #[serde(rename = "existingId")]
        existing_id: String,
        #[serde(rename = "existingName")]
        existing_name: String,
    },
    Skip {
        reason: String,
    },
}

/// One row of POST /api/u501/import/preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRow {
    /// 1-based data row number
    pub row: usize,
    pub name: Option<String>,
    pub start_date: Option<String>,
    /// `None` when the row is invalid
    pub decision: Option<ImportDecision>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub rows: Vec<PreviewRow>,
    pub to_insert: usize,
    pub to_update: usize,
    pub to_skip: usize,
    pub invalid: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Imported,
    Updated,
    Skipped,
    Failed,
}

/// Per-row result of an executed import
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOutcome {
    pub row: usize,
    pub status: RowStatus,
    pub event_id: Option<String>,
    pub message: Option<String>,
}

/// Result of POST /api/u501/import/execute
///
/// The request succeeds even when every row failed; failures are listed in
/// `errors` and in `rows`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
    pub updated: usize,
    pub skipped: usize,
    pub duplicates: Vec<String>,
    pub errors: Vec<String>,
    pub rows: Vec<RowOutcome>,
}
