use super::goal::{deserialize_goals, Goal};
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for EventId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EventId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl EventPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventPriority::High => "high",
            EventPriority::Medium => "medium",
            EventPriority::Low => "low",
        }
    }
}

impl FromStr for EventPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(EventPriority::High),
            "medium" => Ok(EventPriority::Medium),
            "low" => Ok(EventPriority::Low),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[default]
    Conference,
    Meetup,
    Webinar,
    Workshop,
    Hackathon,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Conference => "conference",
            EventType::Meetup => "meetup",
            EventType::Webinar => "webinar",
            EventType::Workshop => "workshop",
            EventType::Hackathon => "hackathon",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conference" => Ok(EventType::Conference),
            "meetup" => Ok(EventType::Meetup),
            "webinar" => Ok(EventType::Webinar),
            "workshop" => Ok(EventType::Workshop),
            "hackathon" => Ok(EventType::Hackathon),
            other => Err(format!("unknown event type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Planning,
    Confirmed,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planning => "planning",
            EventStatus::Confirmed => "confirmed",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planning" => Ok(EventStatus::Planning),
            "confirmed" => Ok(EventStatus::Confirmed),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" | "canceled" => Ok(EventStatus::Cancelled),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A conference, meetup or other event tracked by the OSPO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub base: BaseAggregate<EventId>,

    pub name: String,
    pub link: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    pub location: String,
    pub priority: EventPriority,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub goals: Vec<Goal>,
    #[serde(rename = "cfpDeadline")]
    pub cfp_deadline: Option<NaiveDate>,
    pub status: EventStatus,
    pub notes: Option<String>,
    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,
}

impl Event {
    /// New event ready for insertion; optional attributes start at their defaults
    pub fn new_for_insert(
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        location: String,
    ) -> Self {
        Self {
            base: BaseAggregate::new(EventId::new_v4()),
            name,
            link: None,
            start_date,
            end_date,
            location,
            priority: EventPriority::default(),
            event_type: EventType::default(),
            goals: Vec::new(),
            cfp_deadline: None,
            status: EventStatus::default(),
            notes: None,
            created_by: None,
        }
    }

    pub fn from_dto(dto: &EventDto) -> Self {
        let mut event = Self::new_for_insert(
            dto.name.clone(),
            dto.start_date,
            dto.end_date,
            dto.location.clone(),
        );
        event.update(dto);
        event
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &EventDto) {
        self.name = dto.name.clone();
        self.link = dto.link.clone().filter(|l| !l.trim().is_empty());
        self.start_date = dto.start_date;
        self.end_date = dto.end_date;
        self.location = dto.location.clone();
        self.priority = dto.priority;
        self.event_type = dto.event_type;
        self.goals = dto.goals.clone();
        self.cfp_deadline = dto.cfp_deadline;
        self.status = dto.status;
        self.notes = dto.notes.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Event name must not be empty".into());
        }
        if self.location.trim().is_empty() {
            return Err("Location must not be empty".into());
        }
        if self.end_date < self.start_date {
            return Err(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            ));
        }
        if let Some(link) = &self.link {
            if !(link.starts_with("http://") || link.starts_with("https://")) {
                return Err(format!("Link '{}' must be an http(s) URL", link));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Event {
    type Id = EventId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "event"
    }

    fn element_name() -> &'static str {
        "Event"
    }

    fn list_name() -> &'static str {
        "Events"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDto {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub priority: EventPriority,
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    #[serde(default, deserialize_with = "deserialize_goals")]
    pub goals: Vec<Goal>,
    #[serde(rename = "cfpDeadline", default)]
    pub cfp_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_date_order() {
        let event = Event::new_for_insert(
            "KubeCon".into(),
            date("2025-06-03"),
            date("2025-06-01"),
            "Paris".into(),
        );
        assert!(event.validate().unwrap_err().contains("before start date"));
    }

    #[test]
    fn test_validate_link_scheme() {
        let mut event = Event::new_for_insert(
            "FOSDEM".into(),
            date("2025-02-01"),
            date("2025-02-02"),
            "Brussels".into(),
        );
        event.link = Some("fosdem.org".into());
        assert!(event.validate().is_err());
        event.link = Some("https://fosdem.org".into());
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_dto_accepts_goal_text_and_type_alias() {
        let json = r#"{
            "id": null,
            "name": "DevConf 2025",
            "startDate": "2025-06-12",
            "endDate": "2025-06-14",
            "location": "Brno",
            "type": "conference",
            "goals": "speaking, networking"
        }"#;
        let dto: EventDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.goals, vec![Goal::Speaking, Goal::Networking]);
        assert_eq!(dto.priority, EventPriority::Medium);

        let event = Event::from_dto(&dto);
        assert_eq!(event.event_type, EventType::Conference);
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        assert_eq!("HIGH".parse::<EventPriority>().unwrap(), EventPriority::High);
        assert_eq!(" Meetup ".parse::<EventType>().unwrap(), EventType::Meetup);
        assert_eq!("canceled".parse::<EventStatus>().unwrap(), EventStatus::Cancelled);
        assert!("urgent".parse::<EventPriority>().is_err());
    }
}
