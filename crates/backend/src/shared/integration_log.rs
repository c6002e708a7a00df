use anyhow::Result;
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

/// Log de integração com os canais. Falhas de API/webhook são registradas
/// aqui em vez de propagadas ao chamador externo - o webhook sempre
/// confirma o recebimento.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "integration_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub channel: String,
    pub operation: String,
    pub status: String,
    pub message: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn log_success(channel: &str, operation: &str, message: &str) -> Result<()> {
    write_entry(channel, operation, "success", Some(message)).await
}

pub async fn log_failure(channel: &str, operation: &str, message: &str) -> Result<()> {
    write_entry(channel, operation, "failure", Some(message)).await
}

async fn write_entry(
    channel: &str,
    operation: &str,
    status: &str,
    message: Option<&str>,
) -> Result<()> {
    let active = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        channel: Set(channel.to_string()),
        operation: Set(operation.to_string()),
        status: Set(status.to_string()),
        message: Set(message.map(|m| m.to_string())),
        created_at: Set(Utc::now().to_rfc3339()),
    };
    active.insert(conn()).await?;
    Ok(())
}

/// Últimos registros de um canal, mais recentes primeiro
pub async fn list_by_channel(channel: &str, limit: u64) -> Result<Vec<Model>> {
    let rows = Entity::find()
        .filter(Column::Channel.eq(channel))
        .order_by_desc(Column::CreatedAt)
        .paginate(conn(), limit)
        .fetch_page(0)
        .await?;
    Ok(rows)
}
