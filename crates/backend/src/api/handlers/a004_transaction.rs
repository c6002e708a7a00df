use axum::Json;
use contracts::domain::a004_transaction::aggregate::ReconciliationStatus;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a004_transaction;
use crate::domain::a004_transaction::posting::ReconcileOutcome;

#[derive(Debug, Deserialize)]
pub struct ListFilters {
    pub company_id: String,
    pub status: Option<String>,
}

pub async fn list(
    axum::extract::Query(filters): axum::extract::Query<ListFilters>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let status = filters.status.as_deref().and_then(ReconciliationStatus::parse);
    let transactions = a004_transaction::service::list_by_company(&filters.company_id, status)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list transactions: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(transactions)))
}

pub async fn get_by_id(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let transaction = a004_transaction::service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get transaction: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(axum::http::StatusCode::NOT_FOUND)?;
    Ok(Json(serde_json::json!(transaction)))
}

#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    #[serde(rename = "costCenterId")]
    pub cost_center_id: Option<String>,
}

/// POST /api/transactions/:id/reconcile - falta de estoque volta 409 com a
/// validação detalhada, sem gravar nada
pub async fn reconcile(
    axum::extract::Path(id): axum::extract::Path<String>,
    Json(request): Json<ReconcileRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;

    let outcome =
        a004_transaction::posting::reconcile(uuid, request.category_id, request.cost_center_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to reconcile transaction: {}", e);
                axum::http::StatusCode::UNPROCESSABLE_ENTITY
            })?;

    match outcome {
        ReconcileOutcome::Reconciled => Ok(Json(serde_json::json!({"success": true}))),
        ReconcileOutcome::BlockedByStock(validation) => {
            Ok(Json(serde_json::json!({"success": false, "validacao": validation})))
        }
    }
}

pub async fn reopen(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a004_transaction::posting::reopen(uuid).await.map_err(|e| {
        tracing::error!("Failed to reopen transaction: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn ignore(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    a004_transaction::posting::ignore(uuid).await.map_err(|e| {
        tracing::error!("Failed to ignore transaction: {}", e);
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    })?;
    Ok(Json(serde_json::json!({"success": true})))
}

/// GET /api/transactions/:id/stock-validation - pré-checagem exibida antes
/// do botão de conciliar
pub async fn validate_stock(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;
    let transaction = a004_transaction::service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get transaction: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(axum::http::StatusCode::NOT_FOUND)?;

    let validation = a004_transaction::service::validate_stock(&transaction)
        .await
        .map_err(|e| {
            tracing::error!("Failed to validate stock: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(validation)))
}
