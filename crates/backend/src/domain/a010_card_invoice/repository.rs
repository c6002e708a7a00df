use anyhow::Result;
use chrono::{NaiveDate, Utc};
use contracts::domain::a010_card_invoice::aggregate::{
    CardInvoice, CardInvoiceId, CardInvoiceLine, InvoiceStatus,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a010_card_invoice")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub company_ref: String,
    pub card_name: String,
    pub reference_month: i32,
    pub reference_year: i32,
    pub due_date: String,
    pub paid_date: Option<String>,
    pub status: String,
    pub lines_json: String,
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
        .unwrap_or_else(|_| panic!("Invalid date in a010_card_invoice: {}", raw))
}

impl From<Model> for CardInvoice {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let lines: Vec<CardInvoiceLine> = serde_json::from_str(&m.lines_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize lines_json for id: {}", m.id));
        let status = if m.status == "paid" {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Open
        };

        CardInvoice {
            base: BaseAggregate::with_metadata(
                CardInvoiceId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            company_ref: m.company_ref,
            card_name: m.card_name,
            reference_month: m.reference_month as u32,
            reference_year: m.reference_year,
            due_date: parse_date(&m.due_date),
            paid_date: m.paid_date.as_deref().map(parse_date),
            status,
            lines,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &CardInvoice, is_update: bool) -> Result<ActiveModel> {
    let uuid = aggregate.base.id.value();
    let status = match aggregate.status {
        InvoiceStatus::Open => "open",
        InvoiceStatus::Paid => "paid",
    };
    Ok(ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        company_ref: Set(aggregate.company_ref.clone()),
        card_name: Set(aggregate.card_name.clone()),
        reference_month: Set(aggregate.reference_month as i32),
        reference_year: Set(aggregate.reference_year),
        due_date: Set(aggregate.due_date.to_string()),
        paid_date: Set(aggregate.paid_date.map(|d| d.to_string())),
        status: Set(status.to_string()),
        lines_json: Set(serde_json::to_string(&aggregate.lines)?),
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

pub async fn get_by_id(id: Uuid) -> Result<Option<CardInvoice>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_company(company_ref: &str) -> Result<Vec<CardInvoice>> {
    let items: Vec<CardInvoice> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn upsert(aggregate: &CardInvoice) -> Result<Uuid> {
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
