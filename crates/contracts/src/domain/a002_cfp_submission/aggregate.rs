use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CfpSubmissionId(pub Uuid);

impl CfpSubmissionId {
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

impl AggregateId for CfpSubmissionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CfpSubmissionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CfpStatus {
    Draft,
    #[default]
    Submitted,
    Accepted,
    Rejected,
    Withdrawn,
}

impl CfpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CfpStatus::Draft => "draft",
            CfpStatus::Submitted => "submitted",
            CfpStatus::Accepted => "accepted",
            CfpStatus::Rejected => "rejected",
            CfpStatus::Withdrawn => "withdrawn",
        }
    }
}

impl FromStr for CfpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(CfpStatus::Draft),
            "submitted" => Ok(CfpStatus::Submitted),
            "accepted" => Ok(CfpStatus::Accepted),
            "rejected" => Ok(CfpStatus::Rejected),
            "withdrawn" => Ok(CfpStatus::Withdrawn),
            other => Err(format!("unknown CFP status '{}'", other)),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Talk proposal submitted to an event's call for proposals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfpSubmission {
    #[serde(flatten)]
    pub base: BaseAggregate<CfpSubmissionId>,

    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(rename = "submitterName")]
    pub submitter_name: String,
    #[serde(rename = "submitterEmail")]
    pub submitter_email: Option<String>,
    #[serde(rename = "submissionDate")]
    pub submission_date: NaiveDate,
    pub status: CfpStatus,
}

impl CfpSubmission {
    pub fn new_for_insert(dto: &CfpSubmissionDto) -> Self {
        Self {
            base: BaseAggregate::new(CfpSubmissionId::new_v4()),
            event_id: dto.event_id,
            title: dto.title.clone(),
            abstract_text: dto.abstract_text.clone(),
            submitter_name: dto.submitter_name.clone(),
            submitter_email: dto.submitter_email.clone(),
            submission_date: dto.submission_date,
            status: dto.status,
        }
    }

    pub fn update(&mut self, dto: &CfpSubmissionDto) {
        self.event_id = dto.event_id;
        self.title = dto.title.clone();
        self.abstract_text = dto.abstract_text.clone();
        self.submitter_name = dto.submitter_name.clone();
        self.submitter_email = dto.submitter_email.clone();
        self.submission_date = dto.submission_date;
        self.status = dto.status;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title must not be empty".into());
        }
        if self.submitter_name.trim().is_empty() {
            return Err("Submitter name must not be empty".into());
        }
        if let Some(email) = &self.submitter_email {
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

impl AggregateRoot for CfpSubmission {
    type Id = CfpSubmissionId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "cfp_submission"
    }

    fn element_name() -> &'static str {
        "CFP submission"
    }

    fn list_name() -> &'static str {
        "CFP submissions"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfpSubmissionDto {
    pub id: Option<String>,
    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(rename = "submitterName")]
    pub submitter_name: String,
    #[serde(rename = "submitterEmail", default)]
    pub submitter_email: Option<String>,
    #[serde(rename = "submissionDate")]
    pub submission_date: NaiveDate,
    #[serde(default)]
    pub status: CfpStatus,
}
