use super::repository;
use anyhow::Result;
use contracts::domain::a003_category::aggregate::Category;
use std::collections::HashMap;
use uuid::Uuid;

pub async fn save(mut category: Category) -> Result<Uuid> {
    category
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    category.before_write();
    repository::upsert(&category).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Category>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(company_ref: &str) -> Result<Vec<Category>> {
    repository::list_by_company(company_ref).await
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}

/// Índice id → categoria para agregações (DRE agrupa por tipo e detalha
/// por nome)
pub async fn index_by_id(company_ref: &str) -> Result<HashMap<String, Category>> {
    let categories = repository::list_by_company(company_ref).await?;
    Ok(categories
        .into_iter()
        .map(|c| (c.base.id.value().to_string(), c))
        .collect())
}
