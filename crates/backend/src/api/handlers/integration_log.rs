use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub channel: String,
    pub limit: Option<u64>,
}

/// GET /api/integration-log - últimos registros de integração de um canal
/// (sincronizações, webhooks e suas falhas)
pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let entries = crate::shared::integration_log::list_by_channel(
        &filters.channel,
        filters.limit.unwrap_or(50),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to list integration log: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(serde_json::json!(entries)))
}
