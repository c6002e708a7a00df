use axum::Json;
use chrono::NaiveDate;
use contracts::domain::a010_card_invoice::aggregate::CardInvoice;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a010_card_invoice;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let invoices = a010_card_invoice::service::list_by_company(&filters.company_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list card invoices: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(invoices)))
}

pub async fn upsert(
    Json(invoice): Json<CardInvoice>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let id = a010_card_invoice::service::save(invoice).await.map_err(|e| {
        tracing::error!("Failed to save card invoice: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"id": id.to_string()})))
}

pub async fn post(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a010_card_invoice::posting::post(uuid).await.map_err(|e| {
        tracing::error!("Failed to post card invoice: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"success": true})))
}

#[derive(Debug, Deserialize)]
pub struct PayRequest {
    #[serde(rename = "paidDate")]
    pub paid_date: NaiveDate,
}

pub async fn pay(
    axum::extract::Path(id): axum::extract::Path<String>,
    Json(request): Json<PayRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a010_card_invoice::posting::pay(uuid, request.paid_date)
        .await
        .map_err(|e| {
            tracing::error!("Failed to pay card invoice: {}", e);
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        })?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn unpost(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a010_card_invoice::posting::unpost(uuid).await.map_err(|e| {
        tracing::error!("Failed to unpost card invoice: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn delete(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let deleted = a010_card_invoice::service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete card invoice: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !deleted {
        return Err(axum::http::StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"success": true})))
}
