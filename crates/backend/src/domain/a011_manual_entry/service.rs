use super::repository;
use anyhow::Result;
use contracts::domain::a011_manual_entry::aggregate::ManualEntry;
use uuid::Uuid;

/// Salva o lançamento e projeta o movimento de caixa no hub (upsert por
/// origem+referência - salvar de novo atualiza, nunca duplica)
pub async fn save(mut entry: ManualEntry) -> Result<Uuid> {
    entry
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    entry.before_write();
    let id = repository::upsert(&entry).await?;

    crate::projections::p900_financial_movements::service::project_manual_entry(&entry, id)
        .await?;

    Ok(id)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<ManualEntry>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(company_ref: &str) -> Result<Vec<ManualEntry>> {
    repository::list_by_company(company_ref).await
}

/// Remove o lançamento e o movimento derivado
pub async fn delete(id: Uuid) -> Result<bool> {
    crate::projections::p900_financial_movements::repository::delete_by_registrator(
        &id.to_string(),
    )
    .await?;
    repository::soft_delete(id).await
}
