use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendeeId(pub Uuid);

impl AttendeeId {
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

impl AggregateId for AttendeeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(AttendeeId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Person from the organisation attending an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    #[serde(flatten)]
    pub base: BaseAggregate<AttendeeId>,

    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    /// Free text, e.g. "speaker", "booth staff"
    pub role: Option<String>,
    pub notes: Option<String>,
}

impl Attendee {
    pub fn new_for_insert(dto: &AttendeeDto) -> Self {
        Self {
            base: BaseAggregate::new(AttendeeId::new_v4()),
            event_id: dto.event_id,
            name: dto.name.clone(),
            email: dto.email.clone(),
            role: dto.role.clone(),
            notes: dto.notes.clone(),
        }
    }

    pub fn update(&mut self, dto: &AttendeeDto) {
        self.event_id = dto.event_id;
        self.name = dto.name.clone();
        self.email = dto.email.clone();
        self.role = dto.role.clone();
        self.notes = dto.notes.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Attendee name must not be empty".into());
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(format!("Invalid email '{}'", email));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Attendee {
    type Id = AttendeeId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "attendee"
    }

    fn element_name() -> &'static str {
        "Attendee"
    }

    fn list_name() -> &'static str {
        "Attendees"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeDto {
    pub id: Option<String>,
    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
