use anyhow::Result;
use chrono::Utc;
use contracts::domain::a004_transaction::aggregate::SalesChannel;
use contracts::domain::a005_sku_mapping::aggregate::{MappingStatus, SkuMapping, SkuMappingId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_sku_mapping")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub company_ref: String,
    pub channel: String,
    pub channel_sku: String,
    pub product_ref: Option<String>,
    pub sku_ref: Option<String>,
    pub status: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SkuMapping {
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
        let status = MappingStatus::parse(&m.status).unwrap_or(MappingStatus::Pending);

        SkuMapping {
            base: BaseAggregate::with_metadata(
                SkuMappingId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            company_ref: m.company_ref,
            channel,
            channel_sku: m.channel_sku,
            product_ref: m.product_ref,
            sku_ref: m.sku_ref,
            status,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &SkuMapping, is_update: bool) -> ActiveModel {
    let uuid = aggregate.base.id.value();
    ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        company_ref: Set(aggregate.company_ref.clone()),
        channel: Set(aggregate.channel.as_str().to_string()),
        channel_sku: Set(aggregate.channel_sku.clone()),
        product_ref: Set(aggregate.product_ref.clone()),
        sku_ref: Set(aggregate.sku_ref.clone()),
        status: Set(aggregate.status.as_str().to_string()),
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

pub async fn get_by_key(
    company_ref: &str,
    channel: SalesChannel,
    channel_sku: &str,
) -> Result<Option<SkuMapping>> {
    let result = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref))
        .filter(Column::Channel.eq(channel.as_str()))
        .filter(Column::ChannelSku.eq(channel_sku))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_company_channel(
    company_ref: &str,
    channel: SalesChannel,
) -> Result<Vec<SkuMapping>> {
    let items: Vec<SkuMapping> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref))
        .filter(Column::Channel.eq(channel.as_str()))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_company(
    company_ref: &str,
    status: Option<MappingStatus>,
) -> Result<Vec<SkuMapping>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref));
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    let items: Vec<SkuMapping> = query
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Insert com conflito silencioso: se a tupla (empresa, canal, SKU) já
/// existe, devolve o registro existente sem alterar nada. É o caminho da
/// criação automática de mapeamentos pendentes durante a importação.
pub async fn insert_ignore_conflict(aggregate: &SkuMapping) -> Result<SkuMapping> {
    let active = to_active(aggregate, false);
    match active.insert(conn()).await {
        Ok(_) => Ok(aggregate.clone()),
        Err(err) if err.to_string().to_uppercase().contains("UNIQUE") => {
            let existing = get_by_key(
                &aggregate.company_ref,
                aggregate.channel,
                &aggregate.channel_sku,
            )
            .await?
            .ok_or_else(|| anyhow::anyhow!("Mapping vanished after unique violation"))?;
            Ok(existing)
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn update_existing(aggregate: &SkuMapping) -> Result<Uuid> {
    let active = to_active(aggregate, true);
    active.update(conn()).await?;
    Ok(aggregate.base.id.value())
}
