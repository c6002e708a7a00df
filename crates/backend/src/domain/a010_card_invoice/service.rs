use super::repository;
use anyhow::Result;
use contracts::domain::a010_card_invoice::aggregate::CardInvoice;
use uuid::Uuid;

pub async fn save(mut invoice: CardInvoice) -> Result<Uuid> {
    invoice
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    invoice.before_write();
    repository::upsert(&invoice).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<CardInvoice>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(company_ref: &str) -> Result<Vec<CardInvoice>> {
    repository::list_by_company(company_ref).await
}

pub async fn delete(id: Uuid) -> Result<bool> {
    // a exclusão remove também os movimentos projetados
    crate::projections::p900_financial_movements::repository::delete_by_registrator(
        &id.to_string(),
    )
    .await?;
    repository::soft_delete(id).await
}
