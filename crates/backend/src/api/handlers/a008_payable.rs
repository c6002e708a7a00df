use axum::Json;
use chrono::NaiveDate;
use contracts::domain::a008_payable::aggregate::{Payable, SettlementStatus};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a008_payable;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
    pub status: Option<String>,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let status = filters.status.as_deref().and_then(SettlementStatus::parse);
    let payables = a008_payable::service::list_by_company(&filters.company_id, status)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list payables: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(payables)))
}

pub async fn upsert(
    Json(payable): Json<Payable>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let id = a008_payable::service::save(payable).await.map_err(|e| {
        tracing::error!("Failed to save payable: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"id": id.to_string()})))
}

#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    #[serde(rename = "paidDate")]
    pub paid_date: NaiveDate,
}

pub async fn settle(
    axum::extract::Path(id): axum::extract::Path<String>,
    Json(request): Json<SettleRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a008_payable::posting::settle(uuid, request.paid_date)
        .await
        .map_err(|e| {
            tracing::error!("Failed to settle payable: {}", e);
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        })?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn reopen(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a008_payable::posting::reopen(uuid).await.map_err(|e| {
        tracing::error!("Failed to reopen payable: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn cancel(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a008_payable::posting::cancel(uuid).await.map_err(|e| {
        tracing::error!("Failed to cancel payable: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"success": true})))
}
