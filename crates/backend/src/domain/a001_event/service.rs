use super::repository;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a001_event::{Event, EventDto};
use uuid::Uuid;

pub async fn create(dto: EventDto, created_by: Option<String>) -> ServiceResult<Uuid> {
    let mut aggregate = Event::from_dto(&dto);
    aggregate.created_by = created_by;

    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();

    Ok(repository::insert(&aggregate).await?)
}

pub async fn update(dto: EventDto) -> ServiceResult<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Event {}", id)))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();

    Ok(repository::update(&aggregate).await?)
}

pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    Ok(repository::soft_delete(id).await?)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Event>> {
    Ok(repository::get_by_id(id).await?)
}

/// Existing event or NotFound; used by the child aggregates
pub async fn require(id: Uuid) -> ServiceResult<Event> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Event {}", id)))
}

pub async fn list_all() -> ServiceResult<Vec<Event>> {
    Ok(repository::list_all().await?)
}
