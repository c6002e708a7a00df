use axum::Json;
use contracts::domain::a003_category::aggregate::Category;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a003_category;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let categories = a003_category::service::list_by_company(&filters.company_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(categories)))
}

pub async fn upsert(
    Json(category): Json<Category>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let id = a003_category::service::save(category).await.map_err(|e| {
        tracing::error!("Failed to save category: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"id": id.to_string()})))
}

pub async fn delete(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let deleted = a003_category::service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete category: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !deleted {
        return Err(axum::http::StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"success": true})))
}
