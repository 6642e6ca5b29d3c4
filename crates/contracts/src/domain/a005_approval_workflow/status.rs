use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Status of an approval workflow
///
/// ```text
/// draft ──► pending ──► approved
///              │  ▲
///              │  └──── changes_requested
///              ▼
///           rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Rejected,
    ChangesRequested,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "draft",
            WorkflowStatus::Pending => "pending",
            WorkflowStatus::Approved => "approved",
            WorkflowStatus::Rejected => "rejected",
            WorkflowStatus::ChangesRequested => "changes_requested",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowStatus::Approved | WorkflowStatus::Rejected)
    }

    pub fn can_transition_to(&self, next: WorkflowStatus) -> bool {
        use WorkflowStatus::*;
        matches!(
            (self, next),
            (Draft, Pending)
                | (Pending, Approved)
                | (Pending, Rejected)
                | (Pending, ChangesRequested)
                | (ChangesRequested, Pending)
        )
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "draft" => Ok(WorkflowStatus::Draft),
            "pending" => Ok(WorkflowStatus::Pending),
            "approved" => Ok(WorkflowStatus::Approved),
            "rejected" => Ok(WorkflowStatus::Rejected),
            "changes_requested" => Ok(WorkflowStatus::ChangesRequested),
            other => Err(format!("unknown workflow status '{}'", other)),
        }
    }
}

/// Decision of a single reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerDecision {
    #[default]
    Pending,
    Approved,
    Rejected,
    ChangesRequested,
}

/// What kind of record a workflow asks approval for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Event,
    CfpSubmission,
    Sponsorship,
    Attendee,
    Asset,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Event => "event",
            ItemType::CfpSubmission => "cfp_submission",
            ItemType::Sponsorship => "sponsorship",
            ItemType::Attendee => "attendee",
            ItemType::Asset => "asset",
        }
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "event" => Ok(ItemType::Event),
            "cfp_submission" => Ok(ItemType::CfpSubmission),
            "sponsorship" => Ok(ItemType::Sponsorship),
            "attendee" => Ok(ItemType::Attendee),
            "asset" => Ok(ItemType::Asset),
            other => Err(format!("unknown item type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot move workflow from {from} to {to}")]
    Illegal {
        from: WorkflowStatus,
        to: WorkflowStatus,
    },

    #[error("workflow has no reviewers")]
    NoReviewers,

    #[error("'{0}' is not a reviewer of this workflow")]
    NotReviewer(String),

    #[error("a decision must be approved, rejected or changes_requested")]
    EmptyDecision,

    #[error("workflow is {0} and can no longer be edited")]
    Locked(WorkflowStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        use WorkflowStatus::*;
        assert!(Draft.can_transition_to(Pending));
        assert!(Pending.can_transition_to(ChangesRequested));
        assert!(ChangesRequested.can_transition_to(Pending));
        assert!(!Draft.can_transition_to(Approved));
        assert!(!Approved.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Pending));
        assert!(!ChangesRequested.can_transition_to(Approved));
    }

    #[test]
    fn test_item_type_round_trip_names() {
        assert_eq!("asset".parse::<ItemType>().unwrap(), ItemType::Asset);
        assert_eq!(ItemType::CfpSubmission.as_str(), "cfp_submission");
        assert!("invoice".parse::<ItemType>().is_err());
    }
}
