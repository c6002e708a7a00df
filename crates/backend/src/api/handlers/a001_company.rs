use axum::Json;
use contracts::domain::a001_company::aggregate::Company;
use uuid::Uuid;

use crate::domain::a001_company;

pub async fn list_all() -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let companies = a001_company::service::list_all().await.map_err(|e| {
        tracing::error!("Failed to list companies: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(serde_json::json!(companies)))
}

pub async fn get_by_id(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let company = a001_company::service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get company: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(axum::http::StatusCode::NOT_FOUND)?;
    Ok(Json(serde_json::json!(company)))
}

pub async fn upsert(
    Json(company): Json<Company>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let id = a001_company::service::save(company).await.map_err(|e| {
        tracing::error!("Failed to save company: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"id": id.to_string()})))
}

pub async fn delete(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let deleted = a001_company::service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete company: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !deleted {
        return Err(axum::http::StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"success": true})))
}
