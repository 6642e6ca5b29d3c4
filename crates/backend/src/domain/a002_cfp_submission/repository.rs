use chrono::{NaiveDate, Utc};
use contracts::domain::a002_cfp_submission::{CfpSubmission, CfpSubmissionId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_cfp_submission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub abstract_text: String,
    pub submitter_name: String,
    pub submitter_email: Option<String>,
    pub submission_date: String,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CfpSubmission {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        CfpSubmission {
            base: BaseAggregate::with_metadata(CfpSubmissionId(uuid), metadata),
            event_id: Uuid::parse_str(&m.event_id).unwrap_or_default(),
            title: m.title,
            abstract_text: m.abstract_text,
            submitter_name: m.submitter_name,
            submitter_email: m.submitter_email,
            submission_date: NaiveDate::parse_from_str(&m.submission_date, "%Y-%m-%d")
                .unwrap_or_default(),
            status: m.status.parse().unwrap_or_default(),
        }
    }
}

fn to_active(aggregate: &CfpSubmission) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        event_id: Set(aggregate.event_id.to_string()),
        title: Set(aggregate.title.clone()),
        abstract_text: Set(aggregate.abstract_text.clone()),
        submitter_name: Set(aggregate.submitter_name.clone()),
        submitter_email: Set(aggregate.submitter_email.clone()),
        submission_date: Set(aggregate.submission_date.to_string()),
        status: Set(aggregate.status.as_str().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<CfpSubmission>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::SubmissionDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_event(event_id: Uuid) -> anyhow::Result<Vec<CfpSubmission>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::EventId.eq(event_id.to_string()))
        .order_by_desc(Column::SubmissionDate)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<CfpSubmission>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &CfpSubmission) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &CfpSubmission) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
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
