use chrono::{NaiveDate, Utc};
use contracts::domain::a001_event::{
    goal::{goals_to_json, parse_goals},
    Event, EventId,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub link: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub priority: String,
    pub event_type: String,
    /// JSON array of goal keys
    pub goals: String,
    pub cfp_deadline: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Stored dates are `YYYY-MM-DD`; a corrupt value is logged and read as the epoch
fn parse_date(id: &str, column: &str, value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|e| {
        tracing::warn!(
            "Event {}: invalid {} '{}' ({}), using default",
            id,
            column,
            value,
            e
        );
        NaiveDate::default()
    })
}

impl From<Model> for Event {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Event {
            base: BaseAggregate::with_metadata(EventId(uuid), metadata),
            name: m.name,
            link: m.link,
            start_date: parse_date(&m.id, "start_date", &m.start_date),
            end_date: parse_date(&m.id, "end_date", &m.end_date),
            location: m.location,
            priority: m.priority.parse().unwrap_or_default(),
            event_type: m.event_type.parse().unwrap_or_default(),
            goals: parse_goals(&m.goals).unwrap_or_default(),
            cfp_deadline: m
                .cfp_deadline
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            status: m.status.parse().unwrap_or_default(),
            notes: m.notes,
            created_by: m.created_by,
        }
    }
}

fn to_active(aggregate: &Event) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        name: Set(aggregate.name.clone()),
        link: Set(aggregate.link.clone()),
        start_date: Set(aggregate.start_date.to_string()),
        end_date: Set(aggregate.end_date.to_string()),
        location: Set(aggregate.location.clone()),
        priority: Set(aggregate.priority.as_str().to_string()),
        event_type: Set(aggregate.event_type.as_str().to_string()),
        goals: Set(goals_to_json(&aggregate.goals)),
        cfp_deadline: Set(aggregate.cfp_deadline.map(|d| d.to_string())),
        status: Set(aggregate.status.as_str().to_string()),
        notes: Set(aggregate.notes.clone()),
        created_by: Set(aggregate.created_by.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Non-deleted events, newest start date first
pub async fn list_all() -> anyhow::Result<Vec<Event>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::StartDate)
        .order_by_asc(Column::Name)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Event>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Event) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &Event) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.created_by = sea_orm::ActiveValue::NotSet;
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

/// Events sharing a start date; duplicate candidates for the CSV import
pub async fn list_by_start_date(start_date: NaiveDate) -> anyhow::Result<Vec<Event>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::StartDate.eq(start_date.to_string()))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(start_date: &str) -> Model {
        Model {
            id: Uuid::new_v4().to_string(),
            name: "All Things Open".into(),
            link: None,
            start_date: start_date.into(),
            end_date: "2025-10-14".into(),
            location: "Raleigh".into(),
            priority: "high".into(),
            event_type: "conference".into(),
            goals: r#"["speaking"]"#.into(),
            cfp_deadline: Some("not a date".into()),
            status: "confirmed".into(),
            notes: None,
            created_by: Some("alice".into()),
            is_deleted: false,
            created_at: None,
            updated_at: None,
            version: 3,
        }
    }

    #[test]
    fn test_model_to_event() {
        let event: Event = model("2025-10-12").into();
        assert_eq!(event.start_date, NaiveDate::from_ymd_opt(2025, 10, 12).unwrap());
        assert_eq!(event.end_date, NaiveDate::from_ymd_opt(2025, 10, 14).unwrap());
        assert!(event.cfp_deadline.is_none());
        assert_eq!(event.base.metadata.version, 3);
    }

    #[test]
    fn test_corrupt_stored_date_reads_as_default() {
        let event: Event = model("12/10/2025").into();
        assert_eq!(event.start_date, NaiveDate::default());
        assert_eq!(event.end_date, NaiveDate::from_ymd_opt(2025, 10, 14).unwrap());
    }
}
