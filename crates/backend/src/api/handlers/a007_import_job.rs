use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a007_import_job;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
    pub limit: Option<u64>,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let jobs = a007_import_job::service::list_by_company(
        &filters.company_id,
        filters.limit.unwrap_or(20),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to list import jobs: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(serde_json::json!(jobs)))
}

/// GET /api/import-jobs/:id - endpoint de polling do progresso
pub async fn get_by_id(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let job = a007_import_job::service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get import job: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(axum::http::StatusCode::NOT_FOUND)?;
    Ok(Json(serde_json::json!(job)))
}

/// POST /api/import-jobs/:id/cancel - cancelamento cooperativo
pub async fn cancel(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let cancelled = a007_import_job::service::cancel(uuid).await.map_err(|e| {
        tracing::error!("Failed to cancel import job: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(serde_json::json!({"cancelled": cancelled})))
}
