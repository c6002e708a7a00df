use anyhow::Result;
use chrono::Utc;
use contracts::domain::a004_transaction::aggregate::SalesChannel;
use contracts::domain::a007_import_job::aggregate::{
    ImportJob, ImportJobId, JobCounters, JobStatus,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_import_job")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub company_ref: String,
    pub channel: Option<String>,
    pub file_name: String,
    pub counters_json: String,
    pub status: String,
    pub error_message: Option<String>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ImportJob {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let counters: JobCounters = serde_json::from_str(&m.counters_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize counters_json for id: {}", m.id));
        let status = JobStatus::parse(&m.status).unwrap_or(JobStatus::Error);
        let channel = m.channel.as_deref().and_then(SalesChannel::parse);

        ImportJob {
            base: BaseAggregate::with_metadata(
                ImportJobId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            company_ref: m.company_ref,
            channel,
            file_name: m.file_name,
            counters,
            status,
            error_message: m.error_message,
            finished_at: m.finished_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &ImportJob, is_update: bool) -> Result<ActiveModel> {
    let uuid = aggregate.base.id.value();
    Ok(ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        company_ref: Set(aggregate.company_ref.clone()),
        channel: Set(aggregate.channel.map(|c| c.as_str().to_string())),
        file_name: Set(aggregate.file_name.clone()),
        counters_json: Set(serde_json::to_string(&aggregate.counters)?),
        status: Set(aggregate.status.as_str().to_string()),
        error_message: Set(aggregate.error_message.clone()),
        finished_at: Set(aggregate.finished_at),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: if is_update {
            sea_orm::ActiveValue::NotSet
        } else {
            Set(Some(aggregate.base.metadata.created_at))
        },
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(if is_update {
            aggregate.base.metadata.version + 1
        } else {
            aggregate.base.metadata.version
        }),
    })
}

pub async fn get_by_id(id: Uuid) -> Result<Option<ImportJob>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_company(company_ref: &str, limit: u64) -> Result<Vec<ImportJob>> {
    let items: Vec<ImportJob> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref))
        .order_by_desc(Column::CreatedAt)
        .paginate(conn(), limit)
        .fetch_page(0)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn upsert(aggregate: &ImportJob) -> Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let existing = Entity::find_by_id(uuid.to_string()).one(conn()).await?;

    let active = to_active(aggregate, existing.is_some())?;
    if existing.is_some() {
        active.update(conn()).await?;
    } else {
        active.insert(conn()).await?;
    }
    Ok(uuid)
}
