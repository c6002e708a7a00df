use axum::extract::{Multipart, Path};
use axum::Json;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::usecases;
use contracts::usecases::u501_import_sales_report::request::{ExpectedPeriod, ImportRequest};
use contracts::usecases::u502_sync_marketplace::request::SyncRequest;
use contracts::usecases::u503_import_bank_statement::request::StatementImportRequest;
use contracts::usecases::u504_recompute_cmv::request::RecomputeRequest;
use contracts::usecases::u505_match_skus::request::{MapSkuRequest, ReprocessRequest};

// ============================================================================
// UseCase u501: importação de relatório de vendas
// ============================================================================

/// Campos do multipart de upload
struct UploadedFile {
    request: ImportRequest,
    bytes: Vec<u8>,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile, String> {
    let mut company_id = None;
    let mut channel = None;
    let mut expected_month = None;
    let mut expected_year = None;
    let mut file_name = None;
    let mut bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("multipart inválido: {}", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "companyId" => company_id = Some(field.text().await.map_err(|e| e.to_string())?),
            "channel" => channel = Some(field.text().await.map_err(|e| e.to_string())?),
            "expectedMonth" => {
                expected_month = field.text().await.map_err(|e| e.to_string())?.parse().ok()
            }
            "expectedYear" => {
                expected_year = field.text().await.map_err(|e| e.to_string())?.parse().ok()
            }
            "file" => {
                file_name = field.file_name().map(str::to_string);
                bytes = Some(field.bytes().await.map_err(|e| e.to_string())?.to_vec());
            }
            _ => {}
        }
    }

    let expected_period = match (expected_month, expected_year) {
        (Some(mes), Some(ano)) => Some(ExpectedPeriod { mes, ano }),
        _ => None,
    };

    Ok(UploadedFile {
        request: ImportRequest {
            company_id: company_id.ok_or("companyId é obrigatório")?,
            channel: channel.filter(|c| !c.is_empty()),
            file_name: file_name.ok_or("arquivo é obrigatório")?,
            expected_period,
        },
        bytes: bytes.ok_or("arquivo é obrigatório")?,
    })
}

/// POST /api/u501/import/validate - checagens de período e sobreposição
/// antes da confirmação
pub async fn u501_validate(
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, String)> {
    let upload = read_upload(multipart)
        .await
        .map_err(|e| (axum::http::StatusCode::BAD_REQUEST, e))?;

    let (period_check, overlap_check) =
        usecases::u501_import_sales_report::executor::validate_file(&upload.request, &upload.bytes)
            .await
            .map_err(|e| (axum::http::StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(serde_json::json!({
        "periodo": period_check,
        "sobreposicao": overlap_check,
    })))
}

/// POST /api/u501/import/start - cria o job e processa em background
pub async fn u501_start_import(
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, String)> {
    let upload = read_upload(multipart)
        .await
        .map_err(|e| (axum::http::StatusCode::BAD_REQUEST, e))?;

    let job =
        usecases::u501_import_sales_report::executor::start_import(upload.request, upload.bytes)
            .await
            .map_err(|e| {
                tracing::error!("Failed to start import: {}", e);
                (axum::http::StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            })?;

    Ok(Json(serde_json::json!(job)))
}

// ============================================================================
// UseCase u502: sincronização com o Mercado Livre
// ============================================================================

static ML_API_CLIENT: Lazy<
    Arc<crate::shared::marketplaces::mercado_livre::MercadoLivreApiClient>,
> = Lazy::new(|| {
    let config = crate::shared::config::load_config()
        .map(|c| c.mercado_livre)
        .unwrap_or_default();
    Arc::new(crate::shared::marketplaces::mercado_livre::MercadoLivreApiClient::new(config))
});

/// POST /api/u502/sync
pub async fn u502_sync(
    Json(request): Json<SyncRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let summary =
        usecases::u502_sync_marketplace::executor::sync_orders(ML_API_CLIENT.as_ref(), &request)
            .await
            .map_err(|e| {
                tracing::error!("Failed to sync marketplace: {}", e);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            })?;
    Ok(Json(serde_json::json!(summary)))
}

// ============================================================================
// UseCase u503: importação de extrato OFX
// ============================================================================

/// POST /api/u503/statement/import
pub async fn u503_import_statement(
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, String)> {
    let mut company_id = None;
    let mut file_name = None;
    let mut content = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (axum::http::StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "companyId" => {
                company_id = Some(field.text().await.map_err(|e| {
                    (axum::http::StatusCode::BAD_REQUEST, e.to_string())
                })?)
            }
            "file" => {
                file_name = field.file_name().map(str::to_string);
                content = Some(field.text().await.map_err(|e| {
                    (axum::http::StatusCode::BAD_REQUEST, e.to_string())
                })?);
            }
            _ => {}
        }
    }

    let request = StatementImportRequest {
        company_id: company_id
            .ok_or((axum::http::StatusCode::BAD_REQUEST, "companyId é obrigatório".into()))?,
        file_name: file_name
            .ok_or((axum::http::StatusCode::BAD_REQUEST, "arquivo é obrigatório".into()))?,
    };
    let content = content
        .ok_or((axum::http::StatusCode::BAD_REQUEST, "arquivo é obrigatório".into()))?;

    let summary = usecases::u503_import_bank_statement::executor::import_statement(
        &request, &content,
    )
    .await
    .map_err(|e| (axum::http::StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(serde_json::json!(summary)))
}

// ============================================================================
// UseCase u504: recomputação de CMV em lote
// ============================================================================

static RECOMPUTE_EXECUTOR: Lazy<Arc<usecases::u504_recompute_cmv::RecomputeExecutor>> =
    Lazy::new(|| {
        let tracker = Arc::new(usecases::u504_recompute_cmv::ProgressTracker::new());
        Arc::new(usecases::u504_recompute_cmv::RecomputeExecutor::new(
            tracker,
        ))
    });

/// POST /api/u504/recompute/start
pub async fn u504_start_recompute(
    Json(request): Json<RecomputeRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match RECOMPUTE_EXECUTOR.start_recompute(request).await {
        Ok(response) => Ok(Json(serde_json::json!(response))),
        Err(e) => {
            tracing::error!("Failed to start CMV recompute: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/u504/recompute/:session_id/progress
pub async fn u504_get_progress(
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match RECOMPUTE_EXECUTOR.get_progress(&session_id) {
        Some(progress) => Ok(Json(serde_json::json!(progress))),
        None => Err(axum::http::StatusCode::NOT_FOUND),
    }
}

// ============================================================================
// UseCase u505: mapeamento de SKUs
// ============================================================================

static MATCH_EXECUTOR: Lazy<Arc<usecases::u505_match_skus::MatchExecutor>> = Lazy::new(|| {
    let tracker = Arc::new(usecases::u505_match_skus::ProgressTracker::new());
    Arc::new(usecases::u505_match_skus::MatchExecutor::new(tracker))
});

/// POST /api/u505/map - confirmação manual de um vínculo
pub async fn u505_map_sku(
    Json(request): Json<MapSkuRequest>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, String)> {
    match MATCH_EXECUTOR.map_sku(request).await {
        Ok(response) => Ok(Json(serde_json::json!(response))),
        Err(e) => {
            tracing::error!("Failed to map SKU: {}", e);
            Err((axum::http::StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
    }
}

/// POST /api/u505/reprocess/start
pub async fn u505_start_reprocess(
    Json(request): Json<ReprocessRequest>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match MATCH_EXECUTOR.start_reprocess(request).await {
        Ok(response) => Ok(Json(serde_json::json!(response))),
        Err(e) => {
            tracing::error!("Failed to start mapping reprocess: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/u505/reprocess/:session_id/progress
pub async fn u505_get_progress(
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match MATCH_EXECUTOR.get_progress(&session_id) {
        Some(progress) => Ok(Json(serde_json::json!(progress))),
        None => Err(axum::http::StatusCode::NOT_FOUND),
    }
}
