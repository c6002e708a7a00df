use axum::Json;
use contracts::domain::a002_product::aggregate::Product;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a002_product;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let products = a002_product::service::list_by_company(&filters.company_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(products)))
}

pub async fn get_by_id(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let product = a002_product::service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(axum::http::StatusCode::NOT_FOUND)?;
    Ok(Json(serde_json::json!(product)))
}

pub async fn upsert(
    Json(product): Json<Product>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let id = a002_product::service::save(product).await.map_err(|e| {
        tracing::error!("Failed to save product: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"id": id.to_string()})))
}

pub async fn delete(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let deleted = a002_product::service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete product: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !deleted {
        return Err(axum::http::StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"success": true})))
}
