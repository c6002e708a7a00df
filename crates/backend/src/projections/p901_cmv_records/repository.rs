use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// Registro de CMV: um por item de transação custeado. item_ref é único -
/// é a guarda de idempotência que impede a dupla contagem quando um lote é
/// reexecutado.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "p901_cmv_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub company_ref: String,
    pub product_ref: String,
    pub record_date: String,
    pub channel: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub unit_price: Option<f64>,
    pub total_revenue: Option<f64>,
    pub gross_margin: Option<f64>,
    pub margin_percent: Option<f64>,
    pub registrator: String,
    pub item_ref: String,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Já existe CMV para este item? Consultado antes de todo insert.
pub async fn exists_for_item(item_ref: &str) -> Result<bool> {
    let count = Entity::find()
        .filter(Column::ItemRef.eq(item_ref))
        .count(conn())
        .await?;
    Ok(count > 0)
}

/// Insert com a guarda de idempotência no banco: violação de unicidade em
/// item_ref significa que outro lote custeou o item primeiro - não é erro.
pub async fn insert_entry(entry: &Model) -> Result<bool> {
    let active = ActiveModel {
        id: Set(entry.id.clone()),
        company_ref: Set(entry.company_ref.clone()),
        product_ref: Set(entry.product_ref.clone()),
        record_date: Set(entry.record_date.clone()),
        channel: Set(entry.channel.clone()),
        quantity: Set(entry.quantity),
        unit_cost: Set(entry.unit_cost),
        total_cost: Set(entry.total_cost),
        unit_price: Set(entry.unit_price),
        total_revenue: Set(entry.total_revenue),
        gross_margin: Set(entry.gross_margin),
        margin_percent: Set(entry.margin_percent),
        registrator: Set(entry.registrator.clone()),
        item_ref: Set(entry.item_ref.clone()),
        created_at: Set(Some(Utc::now().to_rfc3339())),
    };
    match active.insert(conn()).await {
        Ok(_) => Ok(true),
        Err(err) if err.to_string().to_uppercase().contains("UNIQUE") => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Remove os registros de CMV derivados de uma transação (reabertura)
pub async fn delete_by_registrator(registrator: &str) -> Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::Registrator.eq(registrator))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}

pub async fn list_by_period(
    company_ref: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Vec<Model>> {
    let rows = Entity::find()
        .filter(Column::CompanyRef.eq(company_ref))
        .filter(Column::RecordDate.gte(date_from.to_string()))
        .filter(Column::RecordDate.lte(date_to.to_string()))
        .all(conn())
        .await?;
    Ok(rows)
}

/// Soma do CMV do período (linha de CMV da DRE)
pub async fn total_cost_in_period(
    company_ref: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<f64> {
    let rows = list_by_period(company_ref, date_from, date_to).await?;
    Ok(rows.iter().map(|r| r.total_cost).sum())
}
