use super::fields::EventField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One CSV data line: header -> cell value
pub type ParsedRow = BTreeMap<String, String>;

/// How rows matching an existing event are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeduplicationMode {
    /// Leave the existing event alone
    #[default]
    Skip,
    /// Overwrite the existing event from the row
    Update,
    /// Insert the row as a new event anyway
    Import,
}

/// POST /api/u501/import/parse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    pub csv_text: String,
}

/// POST /api/u501/import/preview and /execute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub rows: Vec<ParsedRow>,
    /// destination field -> CSV column
    pub column_mapping: BTreeMap<EventField, String>,
    /// Values for destination fields without a CSV column
    #[serde(default)]
    pub default_values: BTreeMap<EventField, String>,
    #[serde(default)]
    pub deduplication_mode: DeduplicationMode,
}

impl ImportRequest {
    /// Required fields neither mapped to a column nor given a default
    pub fn missing_required(&self) -> Vec<EventField> {
        EventField::required()
            .filter(|f| {
                !self.column_mapping.contains_key(f)
                    && self
                        .default_values
                        .get(f)
                        .map_or(true, |v| v.trim().is_empty())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let json = r#"{
            "rows": [{"Event": "DevConf", "Start": "2025-06-12"}],
            "columnMapping": {"name": "Event", "start_date": "Start"},
            "defaultValues": {"end_date": "2025-06-14", "location": "Brno"},
            "deduplicationMode": "update"
        }"#;
        let request: ImportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.deduplication_mode, DeduplicationMode::Update);
        assert_eq!(
            request.column_mapping.get(&EventField::StartDate).map(String::as_str),
            Some("Start")
        );
        assert!(request.missing_required().is_empty());
    }

    #[test]
    fn test_missing_required_ignores_blank_defaults() {
        let json = r#"{
            "rows": [],
            "columnMapping": {"name": "Event"},
            "defaultValues": {"location": "  "}
        }"#;
        let request: ImportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.deduplication_mode, DeduplicationMode::Skip);
        assert_eq!(
            request.missing_required(),
            vec![EventField::StartDate, EventField::EndDate, EventField::Location]
        );
    }
}
