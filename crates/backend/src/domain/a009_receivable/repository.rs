use anyhow::Result;
use chrono::{NaiveDate, Utc};
use contracts::domain::a008_payable::aggregate::SettlementStatus;
use contracts::domain::a009_receivable::aggregate::{Receivable, ReceivableId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a009_receivable")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub company_ref: String,
    pub client_name: String,
    pub amount: f64,
    pub due_date: String,
    pub received_date: Option<String>,
    pub status: String,
    pub category_ref: Option<String>,
    pub cost_center_ref: Option<String>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_date(raw: &str) -> NaiveDate {
    raw.parse()
        .unwrap_or_else(|_| panic!("Invalid date in a009_receivable: {}", raw))
}

impl From<Model> for Receivable {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let status = SettlementStatus::parse(&m.status).unwrap_or(SettlementStatus::Open);

        Receivable {
            base: BaseAggregate::with_metadata(
                ReceivableId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            company_ref: m.company_ref,
            client_name: m.client_name,
            amount: m.amount,
            due_date: parse_date(&m.due_date),
            received_date: m.received_date.as_deref().map(parse_date),
            status,
            category_ref: m.category_ref,
            cost_center_ref: m.cost_center_ref,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Receivable, is_update: bool) -> ActiveModel {
    let uuid = aggregate.base.id.value();
    ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        company_ref: Set(aggregate.company_ref.clone()),
        client_name: Set(aggregate.client_name.clone()),
        amount: Set(aggregate.amount),
        due_date: Set(aggregate.due_date.to_string()),
        received_date: Set(aggregate.received_date.map(|d| d.to_string())),
        status: Set(aggregate.status.as_str().to_string()),
        category_ref: Set(aggregate.category_ref.clone()),
        cost_center_ref: Set(aggregate.cost_center_ref.clone()),
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
    }
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Receivable>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_company(
    company_ref: &str,
    status: Option<SettlementStatus>,
) -> Result<Vec<Receivable>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref));
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    let items: Vec<Receivable> = query
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn upsert(aggregate: &Receivable) -> Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let existing = Entity::find_by_id(uuid.to_string()).one(conn()).await?;

    let active = to_active(aggregate, existing.is_some());
    if existing.is_some() {
        active.update(conn()).await?;
    } else {
        active.insert(conn()).await?;
    }
    Ok(uuid)
}

pub async fn soft_delete(id: Uuid) -> Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
