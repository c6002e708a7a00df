use super::repository;
use anyhow::Result;
use contracts::domain::a008_payable::aggregate::SettlementStatus;
use contracts::domain::a009_receivable::aggregate::Receivable;
use uuid::Uuid;

pub async fn save(mut receivable: Receivable) -> Result<Uuid> {
    receivable
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    receivable.before_write();
    repository::upsert(&receivable).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Receivable>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(
    company_ref: &str,
    status: Option<SettlementStatus>,
) -> Result<Vec<Receivable>> {
    repository::list_by_company(company_ref, status).await
}

/// Todos os títulos não cancelados - entrada da planilha exportada
pub async fn list_for_export(company_ref: &str) -> Result<Vec<Receivable>> {
    let all = repository::list_by_company(company_ref, None).await?;
    Ok(all
        .into_iter()
        .filter(|r| r.status != SettlementStatus::Cancelled)
        .collect())
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}
