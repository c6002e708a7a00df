use super::repository;
use anyhow::Result;
use chrono::{DateTime, Utc};
use contracts::domain::a006_marketplace_connection::aggregate::{
    MarketplaceConnection, OAuthTokens,
};
use uuid::Uuid;

pub async fn save(mut connection: MarketplaceConnection) -> Result<Uuid> {
    connection
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    connection.before_write();
    repository::upsert(&connection).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<MarketplaceConnection>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(company_ref: &str) -> Result<Vec<MarketplaceConnection>> {
    repository::list_by_company(company_ref).await
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}

/// Grava os tokens recebidos no token exchange/refresh e ativa a conexão
pub async fn update_tokens(id: Uuid, tokens: OAuthTokens) -> Result<()> {
    let mut connection = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Connection not found: {}", id))?;
    connection.store_tokens(tokens, None);
    connection.before_write();
    repository::upsert(&connection).await?;
    Ok(())
}

/// Atualiza o corte da última sincronização bem-sucedida
pub async fn update_last_sync(id: Uuid, cutoff: DateTime<Utc>) -> Result<()> {
    let mut connection = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Connection not found: {}", id))?;
    connection.last_sync_at = Some(cutoff);
    connection.before_write();
    repository::upsert(&connection).await?;
    Ok(())
}
