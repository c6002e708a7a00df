use anyhow::Result;
use chrono::Utc;
use contracts::domain::a004_transaction::aggregate::{
    ReconciliationStatus, SalesChannel, Transaction, TransactionAmounts, TransactionHeader,
    TransactionId, TransactionItem, TransactionKind, TransactionNaturalKey, TransactionSourceMeta,
    TransactionState,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    // colunas extraídas da chave natural - indexadas por unicidade
    pub company_ref: String,
    pub channel: String,
    pub external_ref: Option<String>,
    pub kind: String,
    pub direction: String,
    pub status: String,
    pub transaction_date: String,
    pub header_json: String,
    pub amounts_json: String,
    pub state_json: String,
    pub items_json: String,
    pub source_meta_json: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Transaction {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        let header: TransactionHeader = serde_json::from_str(&m.header_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize header_json for id: {}", m.id));
        let amounts: TransactionAmounts = serde_json::from_str(&m.amounts_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize amounts_json for id: {}", m.id));
        let state: TransactionState = serde_json::from_str(&m.state_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize state_json for id: {}", m.id));
        let items: Vec<TransactionItem> = serde_json::from_str(&m.items_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize items_json for id: {}", m.id));
        let source_meta: TransactionSourceMeta = serde_json::from_str(&m.source_meta_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize source_meta_json for id: {}", m.id));

        let kind = TransactionKind::parse(&m.kind).unwrap_or(TransactionKind::Sale);
        let direction = contracts::domain::a004_transaction::aggregate::EntryDirection::parse(
            &m.direction,
        )
        .unwrap_or(contracts::domain::a004_transaction::aggregate::EntryDirection::Credit);

        Transaction {
            base: BaseAggregate::with_metadata(
                TransactionId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            header,
            kind,
            direction,
            amounts,
            state,
            items,
            source_meta,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Transaction, is_update: bool) -> Result<ActiveModel> {
    let uuid = aggregate.base.id.value();
    Ok(ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        company_ref: Set(aggregate.header.company_ref.clone()),
        channel: Set(aggregate.header.channel.as_str().to_string()),
        external_ref: Set(aggregate.header.external_ref.clone()),
        kind: Set(aggregate.kind.as_str().to_string()),
        direction: Set(aggregate.direction.as_str().to_string()),
        status: Set(aggregate.state.status.as_str().to_string()),
        transaction_date: Set(aggregate.state.transaction_date.to_string()),
        header_json: Set(serde_json::to_string(&aggregate.header)?),
        amounts_json: Set(serde_json::to_string(&aggregate.amounts)?),
        state_json: Set(serde_json::to_string(&aggregate.state)?),
        items_json: Set(serde_json::to_string(&aggregate.items)?),
        source_meta_json: Set(serde_json::to_string(&aggregate.source_meta)?),
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

pub async fn get_by_id(id: Uuid) -> Result<Option<Transaction>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Busca pela chave natural - o gate de deduplicação. Toda escrita de
/// transação consulta aqui antes do insert.
pub async fn get_by_natural_key(key: &TransactionNaturalKey) -> Result<Option<Transaction>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(key.company_ref.as_str()))
        .filter(Column::Channel.eq(key.channel.as_str()))
        .filter(Column::Kind.eq(key.kind.as_str()))
        .filter(Column::Direction.eq(key.direction.as_str()));

    query = match &key.external_ref {
        Some(external_ref) => query.filter(Column::ExternalRef.eq(external_ref.as_str())),
        None => query.filter(Column::ExternalRef.is_null()),
    };

    let result = query.one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Insert puro. A violação de unicidade da chave natural sobe como DbErr -
/// a camada de serviço a converte em merge.
pub async fn insert_new(aggregate: &Transaction) -> Result<Uuid, sea_orm::DbErr> {
    let active = to_active(aggregate, false).map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;
    active.insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update_existing(aggregate: &Transaction) -> Result<Uuid> {
    let active = to_active(aggregate, true)?;
    active.update(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn list_by_company(
    company_ref: &str,
    status: Option<ReconciliationStatus>,
) -> Result<Vec<Transaction>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref));
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    let items: Vec<Transaction> = query
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_company_channel(
    company_ref: &str,
    channel: SalesChannel,
) -> Result<Vec<Transaction>> {
    let items: Vec<Transaction> = Entity::find()
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

/// Quantas das referências externas amostradas já existem para a mesma
/// empresa+canal (checagem de sobreposição)
pub async fn count_existing_external_refs(
    company_ref: &str,
    channel: SalesChannel,
    external_refs: &[String],
) -> Result<usize> {
    if external_refs.is_empty() {
        return Ok(0);
    }
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::CompanyRef.eq(company_ref))
        .filter(Column::Channel.eq(channel.as_str()))
        .filter(Column::ExternalRef.is_in(external_refs.iter().map(|s| s.as_str())))
        .count(conn())
        .await?;
    Ok(count as usize)
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
