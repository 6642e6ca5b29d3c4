use super::fields::EventField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// User decision for one CSV column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub csv_column: String,
    pub destination: Option<EventField>,
    pub include: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("unknown CSV column '{0}'")]
    UnknownColumn(String),
}

/// Mapping step state: one entry per CSV header, in header order
///
/// Invariants:
/// - an excluded column never has a destination;
/// - a destination is bound to at most one column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnMapper {
    mappings: Vec<ColumnMapping>,
}

impl ColumnMapper {
    /// Every column included and unbound
    pub fn new(headers: &[String]) -> Self {
        Self {
            mappings: headers
                .iter()
                .map(|h| ColumnMapping {
                    csv_column: h.clone(),
                    destination: None,
                    include: true,
                })
                .collect(),
        }
    }

    pub fn with_auto_mapping(headers: &[String]) -> Self {
        let mut mapper = Self::new(headers);
        mapper.auto_map();
        mapper
    }

    /// Binds still-unbound included columns whose header looks like a destination field.
    /// The first matching column wins.
    pub fn auto_map(&mut self) {
        for idx in 0..self.mappings.len() {
            let mapping = &self.mappings[idx];
            if !mapping.include || mapping.destination.is_some() {
                continue;
            }
            if let Some(field) = EventField::match_header(&mapping.csv_column) {
                if self.column_for(field).is_none() {
                    self.mappings[idx].destination = Some(field);
                }
            }
        }
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn into_mappings(self) -> Vec<ColumnMapping> {
        self.mappings
    }

    fn position(&self, column: &str) -> Result<usize, MappingError> {
        self.mappings
            .iter()
            .position(|m| m.csv_column == column)
            .ok_or_else(|| MappingError::UnknownColumn(column.to_string()))
    }

    /// Includes or excludes a column. Excluding clears its destination.
    pub fn set_include(&mut self, column: &str, include: bool) -> Result<(), MappingError> {
        let idx = self.position(column)?;
        let mapping = &mut self.mappings[idx];
        mapping.include = include;
        if !include {
            mapping.destination = None;
        }
        Ok(())
    }

    /// Flips inclusion; returns the new state
    pub fn toggle_include(&mut self, column: &str) -> Result<bool, MappingError> {
        let idx = self.position(column)?;
        let include = !self.mappings[idx].include;
        self.set_include(column, include)?;
        Ok(include)
    }

    /// Binds a column to a destination field or clears it with `None`.
    ///
    /// Binding includes the column. If another column already holds the
    /// destination, that column loses it.
    pub fn bind(&mut self, column: &str, destination: Option<EventField>) -> Result<(), MappingError> {
        let idx = self.position(column)?;
        if let Some(field) = destination {
            for (other_idx, other) in self.mappings.iter_mut().enumerate() {
                if other_idx != idx && other.destination == Some(field) {
                    other.destination = None;
                }
            }
            self.mappings[idx].include = true;
        }
        self.mappings[idx].destination = destination;
        Ok(())
    }

    /// CSV column currently bound to a destination field
    pub fn column_for(&self, field: EventField) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.include && m.destination == Some(field))
            .map(|m| m.csv_column.as_str())
    }

    /// Required destination fields no included column is bound to
    pub fn unmapped_required(&self) -> Vec<EventField> {
        EventField::required()
            .filter(|f| self.column_for(*f).is_none())
            .collect()
    }

    /// Preview is blocked while a required field is unbound
    pub fn can_preview(&self) -> bool {
        self.unmapped_required().is_empty()
    }

    /// `destinationField -> csvColumn` map of the import request
    pub fn to_request_mapping(&self) -> BTreeMap<EventField, String> {
        self.mappings
            .iter()
            .filter(|m| m.include)
            .filter_map(|m| m.destination.map(|d| (d, m.csv_column.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_auto_map_binds_known_headers() {
        let mapper = ColumnMapper::with_auto_mapping(&headers(&[
            "Event Name",
            "Start Date",
            "End Date",
            "City",
            "Budget",
        ]));
        assert_eq!(mapper.column_for(EventField::Name), Some("Event Name"));
        assert_eq!(mapper.column_for(EventField::Location), Some("City"));
        assert!(mapper.mappings()[4].destination.is_none());
        assert!(mapper.can_preview());
    }

    #[test]
    fn test_auto_map_first_column_wins() {
        let mapper = ColumnMapper::with_auto_mapping(&headers(&["name", "Event Name"]));
        assert_eq!(mapper.column_for(EventField::Name), Some("name"));
        assert!(mapper.mappings()[1].destination.is_none());
    }

    #[test]
    fn test_excluding_clears_binding() {
        let mut mapper = ColumnMapper::with_auto_mapping(&headers(&["name", "notes"]));
        assert_eq!(mapper.column_for(EventField::Notes), Some("notes"));

        assert_eq!(mapper.toggle_include("notes").unwrap(), false);
        assert!(mapper.mappings()[1].destination.is_none());

        assert_eq!(mapper.toggle_include("notes").unwrap(), true);
        assert_eq!(mapper.toggle_include("notes").unwrap(), false);
        assert_eq!(mapper.toggle_include("notes").unwrap(), true);
        assert!(mapper.mappings()[1].include);
        assert!(mapper.mappings()[1].destination.is_none());
    }

    #[test]
    fn test_bind_moves_destination_between_columns() {
        let mut mapper = ColumnMapper::new(&headers(&["a", "b"]));
        mapper.bind("a", Some(EventField::Name)).unwrap();
        mapper.bind("b", Some(EventField::Name)).unwrap();

        assert_eq!(mapper.column_for(EventField::Name), Some("b"));
        assert!(mapper.mappings()[0].destination.is_none());
        assert_eq!(mapper.to_request_mapping().len(), 1);

        mapper.bind("b", None).unwrap();
        assert!(mapper.column_for(EventField::Name).is_none());
    }

    #[test]
    fn test_bind_reincludes_column() {
        let mut mapper = ColumnMapper::new(&headers(&["a"]));
        mapper.set_include("a", false).unwrap();
        mapper.bind("a", Some(EventField::Link)).unwrap();
        assert!(mapper.mappings()[0].include);
        assert_eq!(mapper.column_for(EventField::Link), Some("a"));
    }

    #[test]
    fn test_unmapped_required_blocks_preview() {
        let mut mapper = ColumnMapper::with_auto_mapping(&headers(&["name", "start_date"]));
        assert_eq!(
            mapper.unmapped_required(),
            vec![EventField::EndDate, EventField::Location]
        );
        assert!(!mapper.can_preview());

        mapper.set_include("name", false).unwrap();
        assert!(mapper.unmapped_required().contains(&EventField::Name));
    }

    #[test]
    fn test_unknown_column() {
        let mut mapper = ColumnMapper::new(&headers(&["a"]));
        assert_eq!(
            mapper.set_include("zzz", false).unwrap_err(),
            MappingError::UnknownColumn("zzz".into())
        );
    }
}
