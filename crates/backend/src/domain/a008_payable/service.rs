use super::repository;
use anyhow::Result;
use contracts::domain::a008_payable::aggregate::{Payable, SettlementStatus};
use uuid::Uuid;

pub async fn save(mut payable: Payable) -> Result<Uuid> {
    payable
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    payable.before_write();
    repository::upsert(&payable).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Payable>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(
    company_ref: &str,
    status: Option<SettlementStatus>,
) -> Result<Vec<Payable>> {
    repository::list_by_company(company_ref, status).await
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}
