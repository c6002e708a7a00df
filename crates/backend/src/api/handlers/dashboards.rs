use axum::Json;
use chrono::Utc;
use contracts::dashboards::d400_dre::DreRequest;
use contracts::dashboards::d401_cash_flow::CashFlowRequest;
use contracts::dashboards::d403_projections::ProjectionsRequest;
use serde::Deserialize;

/// GET /api/dashboards/dre
pub async fn dre(
    axum::extract::Query(request): axum::extract::Query<DreRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let response = crate::dashboards::d400_dre::service::get_dre(request)
        .await
        .map_err(|e| {
            tracing::error!("Failed to build DRE: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(response)))
}

/// GET /api/dashboards/cash-flow
pub async fn cash_flow(
    axum::extract::Query(request): axum::extract::Query<CashFlowRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let response = crate::dashboards::d401_cash_flow::service::get_cash_flow(request)
        .await
        .map_err(|e| {
            tracing::error!("Failed to build cash flow: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(serde_json::json!(response)))
}

#[derive(Debug, Deserialize)]
pub struct AgingParams {
    pub company_id: String,
}

/// GET /api/dashboards/aging/receivables
pub async fn receivables_aging(
    axum::extract::Query(params): axum::extract::Query<AgingParams>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let today = Utc::now().date_naive();
    let response =
        crate::dashboards::d402_aging::service::get_receivables_aging(&params.company_id, today)
            .await
            .map_err(|e| {
                tracing::error!("Failed to build receivables aging: {}", e);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            })?;
    Ok(Json(serde_json::json!(response)))
}

/// GET /api/dashboards/aging/payables
pub async fn payables_aging(
    axum::extract::Query(params): axum::extract::Query<AgingParams>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let today = Utc::now().date_naive();
    let response =
        crate::dashboards::d402_aging::service::get_payables_aging(&params.company_id, today)
            .await
            .map_err(|e| {
                tracing::error!("Failed to build payables aging: {}", e);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            })?;
    Ok(Json(serde_json::json!(response)))
}

/// GET /api/dashboards/projections
pub async fn projections(
    axum::extract::Query(request): axum::extract::Query<ProjectionsRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let today = Utc::now().date_naive();
    let response =
        crate::dashboards::d403_projections::service::get_projections(request, today)
            .await
            .map_err(|e| {
                tracing::error!("Failed to build projections: {}", e);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            })?;
    Ok(Json(serde_json::json!(response)))
}
