use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub company_id: String,
}

/// GET /api/exports/receivables - planilha multi-aba de contas a receber
pub async fn receivables_workbook(
    axum::extract::Query(params): axum::extract::Query<ExportParams>,
) -> Result<impl IntoResponse, axum::http::StatusCode> {
    let receivables =
        crate::domain::a009_receivable::service::list_for_export(&params.company_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load receivables for export: {}", e);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            })?;

    let today = Utc::now().date_naive();
    let bytes = crate::shared::export::receivables_workbook::build_workbook(&receivables, today)
        .map_err(|e| {
            tracing::error!("Failed to build receivables workbook: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let file_name = format!("contas_a_receber_{}.xlsx", today.format("%Y%m%d"));
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    ))
}
