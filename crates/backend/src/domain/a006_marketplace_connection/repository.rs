use anyhow::Result;
use chrono::Utc;
use contracts::domain::a004_transaction::aggregate::SalesChannel;
use contracts::domain::a006_marketplace_connection::aggregate::{
    ConnectionStatus, MarketplaceConnection, MarketplaceConnectionId, OAuthTokens,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_marketplace_connection")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub company_ref: String,
    pub channel: String,
    pub seller_id: Option<String>,
    pub tokens_json: Option<String>,
    pub status: String,
    pub last_sync_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_status(raw: &str) -> ConnectionStatus {
    match raw {
        "active" => ConnectionStatus::Active,
        "expired" => ConnectionStatus::Expired,
        _ => ConnectionStatus::Pending,
    }
}

fn status_str(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Pending => "pending",
        ConnectionStatus::Active => "active",
        ConnectionStatus::Expired => "expired",
    }
}

impl From<Model> for MarketplaceConnection {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let channel = SalesChannel::parse(&m.channel).unwrap_or(SalesChannel::Outro);
        let tokens: Option<OAuthTokens> = m
            .tokens_json
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok());

        MarketplaceConnection {
            base: BaseAggregate::with_metadata(
                MarketplaceConnectionId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            company_ref: m.company_ref,
            channel,
            seller_id: m.seller_id,
            tokens,
            status: parse_status(&m.status),
            last_sync_at: m.last_sync_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &MarketplaceConnection, is_update: bool) -> Result<ActiveModel> {
    let uuid = aggregate.base.id.value();
    let tokens_json = aggregate
        .tokens
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    Ok(ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        company_ref: Set(aggregate.company_ref.clone()),
        channel: Set(aggregate.channel.as_str().to_string()),
        seller_id: Set(aggregate.seller_id.clone()),
        tokens_json: Set(tokens_json),
        status: Set(status_str(aggregate.status).to_string()),
        last_sync_at: Set(aggregate.last_sync_at),
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

pub async fn list_by_company(company_ref: &str) -> Result<Vec<MarketplaceConnection>> {
    let items: Vec<MarketplaceConnection> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<MarketplaceConnection>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn upsert(aggregate: &MarketplaceConnection) -> Result<Uuid> {
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
