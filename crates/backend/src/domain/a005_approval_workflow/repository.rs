use chrono::{NaiveDate, Utc};
use contracts::domain::a005_approval_workflow::{
    ApprovalWorkflow, ApprovalWorkflowId, ItemType, Reviewer,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_approval_workflow")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub item_type: String,
    pub item_id: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub requester_id: String,
    /// JSON array of reviewers with their decisions
    pub reviewers: String,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ApprovalWorkflow {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let reviewers: Vec<Reviewer> = serde_json::from_str(&m.reviewers).unwrap_or_else(|e| {
            tracing::warn!("Workflow {} has unreadable reviewers: {}", m.id, e);
            Vec::new()
        });

        ApprovalWorkflow {
            base: BaseAggregate::with_metadata(ApprovalWorkflowId(uuid), metadata),
            title: m.title,
            description: m.description,
            item_type: m.item_type.parse().unwrap_or(ItemType::Event),
            item_id: Uuid::parse_str(&m.item_id).unwrap_or_default(),
            priority: m.priority.parse().unwrap_or_default(),
            due_date: m
                .due_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            requester_id: m.requester_id,
            reviewers,
            status: m.status.parse().unwrap_or_default(),
        }
    }
}

fn to_active(aggregate: &ApprovalWorkflow) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        title: Set(aggregate.title.clone()),
        description: Set(aggregate.description.clone()),
        item_type: Set(aggregate.item_type.as_str().to_string()),
        item_id: Set(aggregate.item_id.to_string()),
        priority: Set(aggregate.priority.as_str().to_string()),
        due_date: Set(aggregate.due_date.map(|d| d.to_string())),
        requester_id: Set(aggregate.requester_id.clone()),
        reviewers: Set(serde_json::to_string(&aggregate.reviewers)?),
        status: Set(aggregate.status.as_str().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ApprovalWorkflow>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::UpdatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ApprovalWorkflow>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &ApprovalWorkflow) -> anyhow::Result<Uuid> {
    to_active(aggregate)?.insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &ApprovalWorkflow) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.requester_id = sea_orm::ActiveValue::NotSet;
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
