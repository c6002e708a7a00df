use super::repository;
use anyhow::Result;
use contracts::domain::a001_company::aggregate::Company;
use uuid::Uuid;

pub async fn save(mut company: Company) -> Result<Uuid> {
    company
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    company.before_write();
    repository::upsert(&company).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Company>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<Company>> {
    repository::list_all().await
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}
