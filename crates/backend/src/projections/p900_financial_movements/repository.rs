use anyhow::Result;
use chrono::{NaiveDate, Utc};
use contracts::domain::common::Regime;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// Linha do hub de movimentos financeiros ("MEU"): um registro por evento
/// relevante de caixa ou competência, uniforme entre todas as origens.
/// O par (origin, external_ref) é a chave de upsert - qualquer módulo de
/// origem pode criar/atualizar/remover seu movimento de forma idempotente.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "p900_financial_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub company_ref: String,
    pub movement_date: String,
    pub direction: String,
    pub origin: String,
    pub description: String,
    pub amount: f64,
    pub external_ref: String,
    pub category_ref: Option<String>,
    pub category_name: Option<String>,
    pub cost_center_ref: Option<String>,
    pub responsible_ref: Option<String>,
    pub regime: String,
    pub registrator: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Upsert pela chave (origin, external_ref). O id do registro existente é
/// preservado; re-projetar o mesmo documento nunca duplica movimento.
pub async fn upsert_entry(entry: &Model) -> Result<()> {
    let existing = Entity::find()
        .filter(Column::Origin.eq(entry.origin.as_str()))
        .filter(Column::ExternalRef.eq(entry.external_ref.as_str()))
        .one(conn())
        .await?;

    match existing {
        Some(current) => {
            let active = ActiveModel {
                id: Set(current.id),
                company_ref: Set(entry.company_ref.clone()),
                movement_date: Set(entry.movement_date.clone()),
                direction: Set(entry.direction.clone()),
                origin: Set(entry.origin.clone()),
                description: Set(entry.description.clone()),
                amount: Set(entry.amount),
                external_ref: Set(entry.external_ref.clone()),
                category_ref: Set(entry.category_ref.clone()),
                category_name: Set(entry.category_name.clone()),
                cost_center_ref: Set(entry.cost_center_ref.clone()),
                responsible_ref: Set(entry.responsible_ref.clone()),
                regime: Set(entry.regime.clone()),
                registrator: Set(entry.registrator.clone()),
                created_at: sea_orm::ActiveValue::NotSet,
                updated_at: Set(Some(Utc::now().to_rfc3339())),
            };
            active.update(conn()).await?;
        }
        None => {
            let active = ActiveModel {
                id: Set(entry.id.clone()),
                company_ref: Set(entry.company_ref.clone()),
                movement_date: Set(entry.movement_date.clone()),
                direction: Set(entry.direction.clone()),
                origin: Set(entry.origin.clone()),
                description: Set(entry.description.clone()),
                amount: Set(entry.amount),
                external_ref: Set(entry.external_ref.clone()),
                category_ref: Set(entry.category_ref.clone()),
                category_name: Set(entry.category_name.clone()),
                cost_center_ref: Set(entry.cost_center_ref.clone()),
                responsible_ref: Set(entry.responsible_ref.clone()),
                regime: Set(entry.regime.clone()),
                registrator: Set(entry.registrator.clone()),
                created_at: Set(Some(Utc::now().to_rfc3339())),
                updated_at: Set(Some(Utc::now().to_rfc3339())),
            };
            active.insert(conn()).await?;
        }
    }

    Ok(())
}

/// Remove todos os movimentos derivados de um documento (reabertura/undo)
pub async fn delete_by_registrator(registrator: &str) -> Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::Registrator.eq(registrator))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}

pub async fn get_by_origin_external_ref(
    origin: &str,
    external_ref: &str,
) -> Result<Option<Model>> {
    let result = Entity::find()
        .filter(Column::Origin.eq(origin))
        .filter(Column::ExternalRef.eq(external_ref))
        .one(conn())
        .await?;
    Ok(result)
}

/// Movimentos de um período, opcionalmente filtrados por regime. O fluxo
/// de caixa consome só regime caixa; a DRE, só competência.
pub async fn list_by_period(
    company_ref: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
    regime: Option<Regime>,
) -> Result<Vec<Model>> {
    let mut query = Entity::find()
        .filter(Column::CompanyRef.eq(company_ref))
        .filter(Column::MovementDate.gte(date_from.to_string()))
        .filter(Column::MovementDate.lte(date_to.to_string()));
    if let Some(regime) = regime {
        query = query.filter(Column::Regime.eq(regime.as_str()));
    }
    let rows = query
        .order_by_asc(Column::MovementDate)
        .all(conn())
        .await?;
    Ok(rows)
}
