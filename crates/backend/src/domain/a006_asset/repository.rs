use chrono::Utc;
use contracts::domain::a006_asset::{Asset, AssetId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_asset")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub asset_type: String,
    /// URL or storage path
    pub location: String,
    pub description: Option<String>,
    pub uploaded_by: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Asset {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Asset {
            base: BaseAggregate::with_metadata(AssetId(uuid), metadata),
            event_id: Uuid::parse_str(&m.event_id).unwrap_or_default(),
            name: m.name,
            asset_type: m.asset_type.parse().unwrap_or_default(),
            location: m.location,
            description: m.description,
            uploaded_by: m.uploaded_by,
        }
    }
}

fn to_active(aggregate: &Asset) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        event_id: Set(aggregate.event_id.to_string()),
        name: Set(aggregate.name.clone()),
        asset_type: Set(aggregate.asset_type.as_str().to_string()),
        location: Set(aggregate.location.clone()),
        description: Set(aggregate.description.clone()),
        uploaded_by: Set(aggregate.uploaded_by.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Asset>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_event(event_id: Uuid) -> anyhow::Result<Vec<Asset>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::EventId.eq(event_id.to_string()))
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Asset>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Asset) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &Asset) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.uploaded_by = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_asset::AssetType;

    #[test]
    fn test_unknown_type_reads_as_other() {
        let model = Model {
            id: Uuid::new_v4().to_string(),
            event_id: Uuid::new_v4().to_string(),
            name: "Booth photos".into(),
            asset_type: "hologram".into(),
            location: "/shared/ospo/booth".into(),
            description: None,
            uploaded_by: Some("alice".into()),
            is_deleted: false,
            created_at: None,
            updated_at: None,
            version: 1,
        };
        let asset: Asset = model.into();
        assert_eq!(asset.asset_type, AssetType::Other);
        assert_eq!(asset.uploaded_by.as_deref(), Some("alice"));
    }
}
