use anyhow::Result;
use contracts::usecases::u503_import_bank_statement::request::StatementImportRequest;
use contracts::usecases::u503_import_bank_statement::response::StatementImportSummary;

use crate::projections::p900_financial_movements::{projection_builder, repository};
use crate::shared::ingest::ofx;

/// Importa um extrato OFX direto para o hub de movimentos (origem bank,
/// regime caixa), com upsert idempotente por FITID: reimportar o mesmo
/// extrato atualiza em vez de duplicar.
pub async fn import_statement(
    request: &StatementImportRequest,
    content: &str,
) -> Result<StatementImportSummary> {
    let transactions = ofx::parse_ofx(content).map_err(|e| anyhow::anyhow!("{}", e))?;

    let mut summary = StatementImportSummary {
        total: transactions.len() as i32,
        imported: 0,
        duplicates: 0,
        errors: 0,
    };

    for transaction in &transactions {
        let already_exists =
            repository::get_by_origin_external_ref("bank", &transaction.fitid)
                .await?
                .is_some();

        let entry = projection_builder::from_bank_statement(&request.company_id, transaction);
        match repository::upsert_entry(&entry).await {
            Ok(()) => {
                if already_exists {
                    summary.duplicates += 1;
                } else {
                    summary.imported += 1;
                }
            }
            Err(e) => {
                summary.errors += 1;
                tracing::warn!(
                    "Failed to upsert bank movement FITID {}: {}",
                    transaction.fitid,
                    e
                );
            }
        }
    }

    tracing::info!(
        "Imported bank statement {}: {} new, {} duplicates, {} errors",
        request.file_name,
        summary.imported,
        summary.duplicates,
        summary.errors
    );

    Ok(summary)
}
