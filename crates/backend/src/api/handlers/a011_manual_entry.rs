use axum::Json;
use contracts::domain::a011_manual_entry::aggregate::ManualEntry;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a011_manual_entry;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let entries = a011_manual_entry::service::list_by_company(&filters.company_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list manual entries: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(entries)))
}

pub async fn upsert(
    Json(entry): Json<ManualEntry>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let id = a011_manual_entry::service::save(entry).await.map_err(|e| {
        tracing::error!("Failed to save manual entry: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"id": id.to_string()})))
}

pub async fn delete(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let deleted = a011_manual_entry::service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete manual entry: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !deleted {
        return Err(axum::http::StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"success": true})))
}
