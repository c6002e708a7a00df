use axum::Json;
use chrono::NaiveDate;
use contracts::domain::a008_payable::aggregate::SettlementStatus;
use contracts::domain::a009_receivable::aggregate::Receivable;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a009_receivable;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
    pub status: Option<String>,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let status = filters.status.as_deref().and_then(SettlementStatus::parse);
    let receivables = a009_receivable::service::list_by_company(&filters.company_id, status)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list receivables: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(receivables)))
}

pub async fn upsert(
    Json(receivable): Json<Receivable>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let id = a009_receivable::service::save(receivable)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save receivable: {}", e);
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        })?;
    Ok(Json(serde_json::json!({"id": id.to_string()})))
}

#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    #[serde(rename = "receivedDate")]
    pub received_date: NaiveDate,
}

pub async fn settle(
    axum::extract::Path(id): axum::extract::Path<String>,
    Json(request): Json<SettleRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a009_receivable::posting::settle(uuid, request.received_date)
        .await
        .map_err(|e| {
            tracing::error!("Failed to settle receivable: {}", e);
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        })?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn reopen(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a009_receivable::posting::reopen(uuid).await.map_err(|e| {
        tracing::error!("Failed to reopen receivable: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn cancel(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a009_receivable::posting::cancel(uuid).await.map_err(|e| {
        tracing::error!("Failed to cancel receivable: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"success": true})))
}
