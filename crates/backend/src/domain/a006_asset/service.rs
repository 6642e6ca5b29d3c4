use super::repository;
use crate::domain::a001_event::service as event_service;
use crate::shared::error::{ServiceError, ServiceResult};
use contracts::domain::a006_asset::{Asset, AssetDto};
use uuid::Uuid;

/// Records asset metadata; `uploaded_by` is the caller's username
pub async fn create(dto: AssetDto, uploaded_by: Option<String>) -> ServiceResult<Uuid> {
    event_service::require(dto.event_id).await?;

    let mut aggregate = Asset::new_for_insert(&dto, uploaded_by);

    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();

    Ok(repository::insert(&aggregate).await?)
}

pub async fn update(dto: AssetDto) -> ServiceResult<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Invalid ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Asset {}", id)))?;

    if aggregate.event_id != dto.event_id {
        event_service::require(dto.event_id).await?;
    }

    aggregate.update(&dto);

    aggregate.validate().map_err(ServiceError::Validation)?;

    aggregate.before_write();

    Ok(repository::update(&aggregate).await?)
}

pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    Ok(repository::soft_delete(id).await?)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Asset>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<Asset>> {
    Ok(repository::list_all().await?)
}

pub async fn list_by_event(event_id: Uuid) -> ServiceResult<Vec<Asset>> {
    event_service::require(event_id).await?;
    Ok(repository::list_by_event(event_id).await?)
}
