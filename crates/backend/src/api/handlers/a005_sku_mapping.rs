use axum::Json;
use contracts::domain::a005_sku_mapping::aggregate::MappingStatus;
use serde::Deserialize;

use crate::domain::a005_sku_mapping;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
    pub status: Option<String>,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let status = filters.status.as_deref().and_then(MappingStatus::parse);
    let mappings = a005_sku_mapping::service::list_by_company(&filters.company_id, status)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list SKU mappings: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(mappings)))
}

/// GET /api/sku-mappings/pending - a fila de SKUs aguardando resolução
pub async fn list_pending(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let mappings = a005_sku_mapping::service::list_by_company(
        &filters.company_id,
        Some(MappingStatus::Pending),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to list pending SKU mappings: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(serde_json::json!(mappings)))
}
