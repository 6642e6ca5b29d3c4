use super::status::{ItemType, ReviewerDecision, TransitionError, WorkflowStatus};
use crate::domain::a001_event::EventPriority;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalWorkflowId(pub Uuid);

impl ApprovalWorkflowId {
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

impl AggregateId for ApprovalWorkflowId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ApprovalWorkflowId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// One reviewer of a workflow and their current decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub decision: ReviewerDecision,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "decidedAt", default)]
    pub decided_at: Option<DateTime<Utc>>,
}

impl Reviewer {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            decision: ReviewerDecision::Pending,
            comment: None,
            decided_at: None,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Multi-reviewer approval request for an event, CFP, sponsorship or attendee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalWorkflow {
    #[serde(flatten)]
    pub base: BaseAggregate<ApprovalWorkflowId>,

    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "itemType")]
    pub item_type: ItemType,
    #[serde(rename = "itemId")]
    pub item_id: Uuid,
    pub priority: EventPriority,
    #[serde(rename = "dueDate")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "requesterId")]
    pub requester_id: String,
    pub reviewers: Vec<Reviewer>,
    pub status: WorkflowStatus,
}

impl ApprovalWorkflow {
    pub fn new_for_insert(dto: &ApprovalWorkflowDto, requester_id: String) -> Self {
        let mut item = Self {
            base: BaseAggregate::new(ApprovalWorkflowId::new_v4()),
            title: String::new(),
            description: None,
            item_type: dto.item_type,
            item_id: dto.item_id,
            priority: EventPriority::default(),
            due_date: None,
            requester_id,
            reviewers: Vec::new(),
            status: WorkflowStatus::Draft,
        };
        item.apply_dto(dto);
        item
    }

    /// Applies editable fields; refused once the workflow is pending or finished
    pub fn update(&mut self, dto: &ApprovalWorkflowDto) -> Result<(), TransitionError> {
        if !self.is_editable() {
            return Err(TransitionError::Locked(self.status));
        }
        self.apply_dto(dto);
        Ok(())
    }

    fn apply_dto(&mut self, dto: &ApprovalWorkflowDto) {
        self.title = dto.title.clone();
        self.description = dto.description.clone();
        self.item_type = dto.item_type;
        self.item_id = dto.item_id;
        self.priority = dto.priority;
        self.due_date = dto.due_date;

        let mut reviewers: Vec<Reviewer> = Vec::new();
        for user_id in dto.reviewer_ids.iter().map(|r| r.trim()).filter(|r| !r.is_empty()) {
            if reviewers.iter().any(|r| r.user_id == user_id) {
                continue;
            }
            // keep an earlier decision if the reviewer stays on the list
            let existing = self.reviewers.iter().find(|r| r.user_id == user_id).cloned();
            reviewers.push(existing.unwrap_or_else(|| Reviewer::new(user_id)));
        }
        self.reviewers = reviewers;
    }

    pub fn is_editable(&self) -> bool {
        matches!(
            self.status,
            WorkflowStatus::Draft | WorkflowStatus::ChangesRequested
        )
    }

    fn transition_to(&mut self, next: WorkflowStatus) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError::Illegal {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// draft -> pending
    pub fn submit(&mut self) -> Result<(), TransitionError> {
        if self.reviewers.is_empty() {
            return Err(TransitionError::NoReviewers);
        }
        self.transition_to(WorkflowStatus::Pending)
    }

    /// changes_requested -> pending; every reviewer has to decide again
    pub fn resubmit(&mut self) -> Result<(), TransitionError> {
        if self.reviewers.is_empty() {
            return Err(TransitionError::NoReviewers);
        }
        self.transition_to(WorkflowStatus::Pending)?;
        for reviewer in &mut self.reviewers {
            reviewer.decision = ReviewerDecision::Pending;
            reviewer.decided_at = None;
        }
        Ok(())
    }

    /// Records a reviewer decision and derives the workflow status from all of them
    pub fn record_decision(
        &mut self,
        reviewer_id: &str,
        decision: ReviewerDecision,
        comment: Option<String>,
    ) -> Result<WorkflowStatus, TransitionError> {
        if decision == ReviewerDecision::Pending {
            return Err(TransitionError::EmptyDecision);
        }
        if self.status != WorkflowStatus::Pending {
            let to = match decision {
                ReviewerDecision::Rejected => WorkflowStatus::Rejected,
                ReviewerDecision::ChangesRequested => WorkflowStatus::ChangesRequested,
                _ => WorkflowStatus::Approved,
            };
            return Err(TransitionError::Illegal {
                from: self.status,
                to,
            });
        }

        let reviewer = self
            .reviewers
            .iter_mut()
            .find(|r| r.user_id == reviewer_id)
            .ok_or_else(|| TransitionError::NotReviewer(reviewer_id.to_string()))?;
        reviewer.decision = decision;
        reviewer.comment = comment;
        reviewer.decided_at = Some(Utc::now());

        let decisions: Vec<ReviewerDecision> = self.reviewers.iter().map(|r| r.decision).collect();
        let next = if decisions.contains(&ReviewerDecision::Rejected) {
            WorkflowStatus::Rejected
        } else if decisions.contains(&ReviewerDecision::ChangesRequested) {
            WorkflowStatus::ChangesRequested
        } else if decisions.iter().all(|d| *d == ReviewerDecision::Approved) {
            WorkflowStatus::Approved
        } else {
            WorkflowStatus::Pending
        };

        if next != WorkflowStatus::Pending {
            self.transition_to(next)?;
        }
        Ok(self.status)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title must not be empty".into());
        }
        if self.requester_id.trim().is_empty() {
            return Err("Requester must be set".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for ApprovalWorkflow {
    type Id = ApprovalWorkflowId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "approval_workflow"
    }

    fn element_name() -> &'static str {
        "Approval workflow"
    }

    fn list_name() -> &'static str {
        "Approval workflows"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalWorkflowDto {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "itemType")]
    pub item_type: ItemType,
    #[serde(rename = "itemId")]
    pub item_id: Uuid,
    #[serde(default)]
    pub priority: EventPriority,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "reviewerIds", default)]
    pub reviewer_ids: Vec<String>,
    /// Submit for review right away instead of staying in draft
    #[serde(default)]
    pub submit: bool,
}

/// Body of POST /api/approval-workflows/:id/decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub decision: ReviewerDecision,
    #[serde(default)]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow(reviewers: &[&str]) -> ApprovalWorkflow {
        let dto = ApprovalWorkflowDto {
            id: None,
            title: "Sponsor KubeCon EU".into(),
            description: None,
            item_type: ItemType::Sponsorship,
            item_id: Uuid::new_v4(),
            priority: EventPriority::High,
            due_date: None,
            reviewer_ids: reviewers.iter().map(|r| r.to_string()).collect(),
            submit: false,
        };
        ApprovalWorkflow::new_for_insert(&dto, "requester".into())
    }

    #[test]
    fn test_all_reviewers_approve() {
        let mut wf = workflow(&["alice", "bob"]);
        wf.submit().unwrap();

        let status = wf
            .record_decision("alice", ReviewerDecision::Approved, None)
            .unwrap();
        assert_eq!(status, WorkflowStatus::Pending);

        let status = wf
            .record_decision("bob", ReviewerDecision::Approved, Some("ok".into()))
            .unwrap();
        assert_eq!(status, WorkflowStatus::Approved);
        assert!(wf.status.is_terminal());
    }

    #[test]
    fn test_single_rejection_rejects() {
        let mut wf = workflow(&["alice", "bob"]);
        wf.submit().unwrap();
        wf.record_decision("alice", ReviewerDecision::Approved, None)
            .unwrap();
        let status = wf
            .record_decision("bob", ReviewerDecision::Rejected, None)
            .unwrap();
        assert_eq!(status, WorkflowStatus::Rejected);

        let err = wf
            .record_decision("alice", ReviewerDecision::Approved, None)
            .unwrap_err();
        assert!(matches!(err, TransitionError::Illegal { .. }));
    }

    #[test]
    fn test_changes_requested_then_resubmit_resets_decisions() {
        let mut wf = workflow(&["alice", "bob"]);
        wf.submit().unwrap();
        wf.record_decision("alice", ReviewerDecision::Approved, None)
            .unwrap();
        wf.record_decision("bob", ReviewerDecision::ChangesRequested, Some("budget?".into()))
            .unwrap();
        assert_eq!(wf.status, WorkflowStatus::ChangesRequested);
        assert!(wf.is_editable());

        wf.resubmit().unwrap();
        assert_eq!(wf.status, WorkflowStatus::Pending);
        assert!(wf
            .reviewers
            .iter()
            .all(|r| r.decision == ReviewerDecision::Pending));
    }

    #[test]
    fn test_submit_requires_reviewers_and_draft() {
        let mut wf = workflow(&[]);
        assert_eq!(wf.submit().unwrap_err(), TransitionError::NoReviewers);

        let mut wf = workflow(&["alice"]);
        wf.submit().unwrap();
        assert!(matches!(
            wf.submit().unwrap_err(),
            TransitionError::Illegal { .. }
        ));
        assert!(matches!(
            wf.resubmit().unwrap_err(),
            TransitionError::Illegal { .. }
        ));
    }

    #[test]
    fn test_unknown_reviewer_and_locked_update() {
        let mut wf = workflow(&["alice"]);
        wf.submit().unwrap();
        assert_eq!(
            wf.record_decision("mallory", ReviewerDecision::Approved, None)
                .unwrap_err(),
            TransitionError::NotReviewer("mallory".into())
        );

        let dto = ApprovalWorkflowDto {
            id: None,
            title: "Renamed".into(),
            description: None,
            item_type: wf.item_type,
            item_id: wf.item_id,
            priority: wf.priority,
            due_date: None,
            reviewer_ids: vec!["alice".into()],
            submit: false,
        };
        assert_eq!(
            wf.update(&dto).unwrap_err(),
            TransitionError::Locked(WorkflowStatus::Pending)
        );
    }

    #[test]
    fn test_reviewer_list_is_deduplicated() {
        let wf = workflow(&["alice", " alice ", "", "bob"]);
        let ids: Vec<&str> = wf.reviewers.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob"]);
    }
}
