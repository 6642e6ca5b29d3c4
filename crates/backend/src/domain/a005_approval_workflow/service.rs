use super::repository;
use crate::domain::{
    a001_event, a002_cfp_submission, a003_attendee, a004_sponsorship, a006_asset,
};
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a005_approval_workflow::{
    ApprovalWorkflow, ApprovalWorkflowDto, DecisionRequest, ItemType, WorkflowStatus,
};
use contracts::system::auth::AuthUser;
use uuid::Uuid;

/// The item under review must exist
async fn ensure_item_exists(item_type: ItemType, item_id: Uuid) -> ServiceResult<()> {
    let exists = match item_type {
        ItemType::Event => a001_event::repository::get_by_id(item_id).await?.is_some(),
        ItemType::CfpSubmission => a002_cfp_submission::repository::get_by_id(item_id)
            .await?
            .is_some(),
        ItemType::Attendee => a003_attendee::repository::get_by_id(item_id).await?.is_some(),
        ItemType::Sponsorship => a004_sponsorship::repository::get_by_id(item_id)
            .await?
            .is_some(),
        ItemType::Asset => a006_asset::repository::get_by_id(item_id).await?.is_some(),
    };
    require_found(item_type, item_id, exists)
}

fn require_found(item_type: ItemType, item_id: Uuid, exists: bool) -> ServiceResult<()> {
    if exists {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!(
            "{} {}",
            item_type.as_str(),
            item_id
        )))
    }
}

async fn load(id: Uuid) -> ServiceResult<ApprovalWorkflow> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Approval workflow {}", id)))
}

async fn save(mut aggregate: ApprovalWorkflow) -> ServiceResult<ApprovalWorkflow> {
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();
    repository::update(&aggregate).await?;
    Ok(aggregate)
}

/// Only the requester or an admin may change, resubmit or delete a workflow
fn ensure_owner(aggregate: &ApprovalWorkflow, caller: &AuthUser) -> ServiceResult<()> {
    if aggregate.requester_id == caller.username || caller.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "'{}' did not request this workflow",
            caller.username
        )))
    }
}

/// Creates a draft; `dto.submit` sends it to the reviewers right away
pub async fn create(dto: ApprovalWorkflowDto, caller: &AuthUser) -> ServiceResult<Uuid> {
    ensure_item_exists(dto.item_type, dto.item_id).await?;

    let mut aggregate = ApprovalWorkflow::new_for_insert(&dto, caller.username.clone());
    if dto.submit {
        aggregate.submit()?;
    }

    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();

    Ok(repository::insert(&aggregate).await?)
}

pub async fn update(dto: ApprovalWorkflowDto, caller: &AuthUser) -> ServiceResult<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Invalid ID".into()))?;

    let mut aggregate = load(id).await?;
    ensure_owner(&aggregate, caller)?;

    if aggregate.item_type != dto.item_type || aggregate.item_id != dto.item_id {
        ensure_item_exists(dto.item_type, dto.item_id).await?;
    }

    aggregate.update(&dto)?;
    if dto.submit {
        match aggregate.status {
            WorkflowStatus::ChangesRequested => aggregate.resubmit()?,
            _ => aggregate.submit()?,
        }
    }

    save(aggregate).await?;
    Ok(())
}

pub async fn submit(id: Uuid, caller: &AuthUser) -> ServiceResult<ApprovalWorkflow> {
    let mut aggregate = load(id).await?;
    ensure_owner(&aggregate, caller)?;
    aggregate.submit()?;
    save(aggregate).await
}

pub async fn resubmit(id: Uuid, caller: &AuthUser) -> ServiceResult<ApprovalWorkflow> {
    let mut aggregate = load(id).await?;
    ensure_owner(&aggregate, caller)?;
    aggregate.resubmit()?;
    save(aggregate).await
}

/// Records the caller's decision; the caller must be one of the reviewers
pub async fn decide(
    id: Uuid,
    request: DecisionRequest,
    caller: &AuthUser,
) -> ServiceResult<ApprovalWorkflow> {
    let mut aggregate = load(id).await?;
    let status = aggregate.record_decision(&caller.username, request.decision, request.comment)?;
    tracing::info!(
        "Workflow {} decision by '{}': now {}",
        id,
        caller.username,
        status
    );
    save(aggregate).await
}

pub async fn delete(id: Uuid, caller: &AuthUser) -> ServiceResult<bool> {
    let aggregate = load(id).await?;
    ensure_owner(&aggregate, caller)?;
    Ok(repository::soft_delete(id).await?)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<ApprovalWorkflow>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<ApprovalWorkflow>> {
    Ok(repository::list_all().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_event::EventPriority;
    use contracts::system::auth::ADMIN_ROLE;

    fn user(username: &str, roles: &[&str]) -> AuthUser {
        AuthUser {
            subject: format!("sub-{}", username),
            username: username.into(),
            email: None,
            full_name: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn workflow(requester: &str) -> ApprovalWorkflow {
        let dto = ApprovalWorkflowDto {
            id: None,
            title: "Booth at FOSDEM".into(),
            description: None,
            item_type: ItemType::Event,
            item_id: Uuid::new_v4(),
            priority: EventPriority::Medium,
            due_date: None,
            reviewer_ids: vec!["bob".into()],
            submit: false,
        };
        ApprovalWorkflow::new_for_insert(&dto, requester.into())
    }

    #[test]
    fn test_requester_owns_workflow() {
        assert!(ensure_owner(&workflow("alice"), &user("alice", &[])).is_ok());
    }

    #[test]
    fn test_other_user_is_forbidden() {
        let err = ensure_owner(&workflow("alice"), &user("mallory", &["user"])).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn test_reviewer_cannot_delete_or_edit_workflow() {
        let mut wf = workflow("alice");
        wf.submit().unwrap();
        let err = ensure_owner(&wf, &user("bob", &[])).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_admin_passes_owner_check() {
        assert!(ensure_owner(&workflow("alice"), &user("carol", &[ADMIN_ROLE])).is_ok());
    }

    #[test]
    fn test_missing_item_is_not_found() {
        let id = Uuid::new_v4();
        let err = require_found(ItemType::Asset, id, false).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref msg) if msg.contains("asset")));
        assert!(require_found(ItemType::Sponsorship, id, true).is_ok());
    }
}
