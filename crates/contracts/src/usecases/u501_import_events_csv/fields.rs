use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination field of an event a CSV column can be mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    Name,
    Link,
    StartDate,
    EndDate,
    Location,
    Priority,
    #[serde(rename = "type")]
    EventType,
    Goals,
    CfpDeadline,
    Status,
    Notes,
}

impl EventField {
    pub const ALL: [EventField; 11] = [
        EventField::Name,
        EventField::Link,
        EventField::StartDate,
        EventField::EndDate,
        EventField::Location,
        EventField::Priority,
        EventField::EventType,
        EventField::Goals,
        EventField::CfpDeadline,
        EventField::Status,
        EventField::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventField::Name => "name",
            EventField::Link => "link",
            EventField::StartDate => "start_date",
            EventField::EndDate => "end_date",
            EventField::Location => "location",
            EventField::Priority => "priority",
            EventField::EventType => "type",
            EventField::Goals => "goals",
            EventField::CfpDeadline => "cfp_deadline",
            EventField::Status => "status",
            EventField::Notes => "notes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventField::Name => "Event Name",
            EventField::Link => "Link",
            EventField::StartDate => "Start Date",
            EventField::EndDate => "End Date",
            EventField::Location => "Location",
            EventField::Priority => "Priority",
            EventField::EventType => "Event Type",
            EventField::Goals => "Goals",
            EventField::CfpDeadline => "CFP Deadline",
            EventField::Status => "Status",
            EventField::Notes => "Notes",
        }
    }

    /// Other header spellings recognised by auto-mapping
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            EventField::Name => &["event", "title", "eventtitle"],
            EventField::Link => &["url", "website"],
            EventField::StartDate => &["start", "from", "begins"],
            EventField::EndDate => &["end", "to", "ends"],
            EventField::Location => &["city", "venue", "place"],
            EventField::Priority => &[],
            EventField::EventType => &["kind", "category"],
            EventField::Goals => &["goal"],
            EventField::CfpDeadline => &["cfp", "cfpdate", "callforproposals"],
            EventField::Status => &["state"],
            EventField::Notes => &["note", "comments", "comment"],
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            EventField::Name | EventField::StartDate | EventField::EndDate | EventField::Location
        )
    }

    pub fn required() -> impl Iterator<Item = EventField> {
        Self::ALL.into_iter().filter(|f| f.is_required())
    }

    /// Field whose name, label or alias matches a CSV header
    /// (case, spaces and punctuation are ignored)
    pub fn match_header(header: &str) -> Option<EventField> {
        let key = normalize_header(header);
        if key.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|f| {
            normalize_header(f.as_str()) == key
                || normalize_header(f.label()) == key
                || f.aliases().iter().any(|a| *a == key)
        })
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize_header(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_header_variants() {
        assert_eq!(EventField::match_header("Event Name"), Some(EventField::Name));
        assert_eq!(EventField::match_header("start_date"), Some(EventField::StartDate));
        assert_eq!(EventField::match_header(" END-DATE "), Some(EventField::EndDate));
        assert_eq!(EventField::match_header("Goal"), Some(EventField::Goals));
        assert_eq!(EventField::match_header("type"), Some(EventField::EventType));
        assert_eq!(EventField::match_header("Budget"), None);
        assert_eq!(EventField::match_header(""), None);
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<EventField> = EventField::required().collect();
        assert_eq!(
            required,
            vec![
                EventField::Name,
                EventField::StartDate,
                EventField::EndDate,
                EventField::Location
            ]
        );
    }

    #[test]
    fn test_serde_key_for_type() {
        let json = serde_json::to_string(&EventField::EventType).unwrap();
        assert_eq!(json, "\"type\"");
    }
}
