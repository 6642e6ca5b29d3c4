use chrono::NaiveDate;
use contracts::domain::a001_event::{goal::parse_goals, Event};
use contracts::usecases::u501_import_events_csv::{EventField, ImportRequest, ParsedRow};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(field: EventField, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("invalid {} '{}', expected YYYY-MM-DD", field, value))
}

/// Turns CSV rows into events according to the column mapping and defaults
pub struct RowMapper<'a> {
    column_mapping: &'a BTreeMap<EventField, String>,
    default_values: &'a BTreeMap<EventField, String>,
}

impl<'a> RowMapper<'a> {
    pub fn new(request: &'a ImportRequest) -> Self {
        Self {
            column_mapping: &request.column_mapping,
            default_values: &request.default_values,
        }
    }

    /// Non-empty cell of the column mapped to `field`
    fn csv_value<'r>(&self, row: &'r ParsedRow, field: EventField) -> Option<&'r str> {
        let column = self.column_mapping.get(&field)?;
        row.get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// CSV cell for mapped fields, default value for unmapped ones
    fn value<'r>(&'r self, row: &'r ParsedRow, field: EventField) -> Option<&'r str> {
        if self.column_mapping.contains_key(&field) {
            self.csv_value(row, field)
        } else {
            self.default_values
                .get(&field)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        }
    }

    fn required<'r>(&'r self, row: &'r ParsedRow, field: EventField) -> Result<&'r str, String> {
        self.value(row, field)
            .ok_or_else(|| format!("missing {}", field))
    }

    /// New event from a row. The result is validated.
    pub fn new_event(&self, row: &ParsedRow) -> Result<Event, String> {
        let name = self.required(row, EventField::Name)?;
        let start_date = parse_date(EventField::StartDate, self.required(row, EventField::StartDate)?)?;
        let end_date = parse_date(EventField::EndDate, self.required(row, EventField::EndDate)?)?;
        let location = self.required(row, EventField::Location)?;

        let mut event =
            Event::new_for_insert(name.to_string(), start_date, end_date, location.to_string());
        for field in [
            EventField::Link,
            EventField::Priority,
            EventField::EventType,
            EventField::Goals,
            EventField::CfpDeadline,
            EventField::Status,
            EventField::Notes,
        ] {
            if let Some(value) = self.value(row, field) {
                apply_field(&mut event, field, value)?;
            }
        }

        event.validate()?;
        Ok(event)
    }

    /// Overwrites `event` from the row's non-empty mapped cells. Defaults are not applied.
    pub fn apply_update(&self, row: &ParsedRow, event: &mut Event) -> Result<(), String> {
        for field in EventField::ALL {
            if let Some(value) = self.csv_value(row, field) {
                apply_field(event, field, value)?;
            }
        }
        event.validate()
    }
}

fn apply_field(event: &mut Event, field: EventField, value: &str) -> Result<(), String> {
    match field {
        EventField::Name => event.name = value.to_string(),
        EventField::Link => event.link = Some(value.to_string()),
        EventField::StartDate => event.start_date = parse_date(field, value)?,
        EventField::EndDate => event.end_date = parse_date(field, value)?,
        EventField::Location => event.location = value.to_string(),
        EventField::Priority => event.priority = value.parse()?,
        EventField::EventType => event.event_type = value.parse()?,
        EventField::Goals => event.goals = parse_goals(value)?,
        EventField::CfpDeadline => event.cfp_deadline = Some(parse_date(field, value)?),
        EventField::Status => event.status = value.parse()?,
        EventField::Notes => event.notes = Some(value.to_string()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_event::{EventPriority, Goal};
    use contracts::usecases::u501_import_events_csv::DeduplicationMode;

    fn request(mapping: &[(EventField, &str)], defaults: &[(EventField, &str)]) -> ImportRequest {
        ImportRequest {
            rows: Vec::new(),
            column_mapping: mapping.iter().map(|(f, c)| (*f, c.to_string())).collect(),
            default_values: defaults.iter().map(|(f, v)| (*f, v.to_string())).collect(),
            deduplication_mode: DeduplicationMode::Skip,
        }
    }

    fn row(cells: &[(&str, &str)]) -> ParsedRow {
        cells.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_new_event_with_defaults_for_unmapped_fields() {
        let req = request(
            &[
                (EventField::Name, "Event"),
                (EventField::StartDate, "Start"),
                (EventField::EndDate, "End"),
                (EventField::Goals, "Goals"),
            ],
            &[(EventField::Location, "Online"), (EventField::Priority, "high")],
        );
        let mapper = RowMapper::new(&req);
        let event = mapper
            .new_event(&row(&[
                ("Event", " FOSDEM "),
                ("Start", "2025-02-01"),
                ("End", "2025-02-02"),
                ("Goals", "speaking, attending"),
            ]))
            .unwrap();
        assert_eq!(event.name, "FOSDEM");
        assert_eq!(event.location, "Online");
        assert_eq!(event.priority, EventPriority::High);
        assert_eq!(event.goals, vec![Goal::Speaking, Goal::Attending]);
    }

    #[test]
    fn test_default_ignored_for_mapped_field() {
        let req = request(
            &[
                (EventField::Name, "Event"),
                (EventField::StartDate, "Start"),
                (EventField::EndDate, "End"),
                (EventField::Location, "City"),
            ],
            &[(EventField::Location, "Online")],
        );
        let mapper = RowMapper::new(&req);
        let err = mapper
            .new_event(&row(&[
                ("Event", "FOSDEM"),
                ("Start", "2025-02-01"),
                ("End", "2025-02-02"),
                ("City", ""),
            ]))
            .unwrap_err();
        assert_eq!(err, "missing location");
    }

    #[test]
    fn test_invalid_date_is_reported() {
        let req = request(
            &[(EventField::Name, "n"), (EventField::StartDate, "s"), (EventField::EndDate, "e")],
            &[(EventField::Location, "Brno")],
        );
        let mapper = RowMapper::new(&req);
        let err = mapper
            .new_event(&row(&[("n", "DevConf"), ("s", "12/06/2025"), ("e", "2025-06-14")]))
            .unwrap_err();
        assert!(err.contains("invalid start_date '12/06/2025'"));
    }

    #[test]
    fn test_apply_update_only_touches_filled_cells() {
        let req = request(
            &[(EventField::Name, "n"), (EventField::Notes, "notes"), (EventField::Link, "url")],
            &[(EventField::Location, "Elsewhere")],
        );
        let mapper = RowMapper::new(&req);
        let mut event = Event::new_for_insert(
            "DevConf 2025".into(),
            NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            "Brno".into(),
        );
        mapper
            .apply_update(
                &row(&[("n", "DevConf 2025"), ("notes", "Booth 12"), ("url", "")]),
                &mut event,
            )
            .unwrap();
        assert_eq!(event.notes.as_deref(), Some("Booth 12"));
        assert_eq!(event.location, "Brno");
        assert!(event.link.is_none());
    }
}
