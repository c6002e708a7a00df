use super::{projection_builder, repository};
use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::Transaction;
use contracts::domain::a008_payable::aggregate::Payable;
use contracts::domain::a009_receivable::aggregate::Receivable;
use contracts::domain::a010_card_invoice::aggregate::CardInvoice;
use contracts::domain::a011_manual_entry::aggregate::ManualEntry;
use uuid::Uuid;

/// Resolve o nome da categoria para desnormalizar no movimento
async fn category_name(company_ref: &str, category_ref: Option<&str>) -> Option<String> {
    let category_ref = category_ref?;
    let id = Uuid::parse_str(category_ref).ok()?;
    match crate::domain::a003_category::service::get_by_id(id).await {
        Ok(Some(category)) => Some(category.base.description),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to resolve category {} for {}: {}", category_ref, company_ref, e);
            None
        }
    }
}

/// Projeta uma transação de canal conciliada no hub de movimentos
pub async fn project_transaction(transaction: &Transaction, document_id: Uuid) -> Result<()> {
    let mut entry =
        projection_builder::from_transaction(transaction, &document_id.to_string());
    entry.category_name = category_name(
        &transaction.header.company_ref,
        transaction.state.category_ref.as_deref(),
    )
    .await;
    repository::upsert_entry(&entry).await?;

    tracing::info!(
        "Projected transaction {} into financial movements ({})",
        transaction.header.external_ref.as_deref().unwrap_or("-"),
        entry.regime
    );
    Ok(())
}

/// Projeta a liquidação de uma conta a pagar
pub async fn project_payable(payable: &Payable, document_id: Uuid) -> Result<()> {
    let mut entry = projection_builder::from_payable(payable, &document_id.to_string());
    entry.category_name =
        category_name(&payable.company_ref, payable.category_ref.as_deref()).await;
    repository::upsert_entry(&entry).await?;
    Ok(())
}

/// Projeta a liquidação de uma conta a receber
pub async fn project_receivable(receivable: &Receivable, document_id: Uuid) -> Result<()> {
    let mut entry = projection_builder::from_receivable(receivable, &document_id.to_string());
    entry.category_name =
        category_name(&receivable.company_ref, receivable.category_ref.as_deref()).await;
    repository::upsert_entry(&entry).await?;
    Ok(())
}

/// Projeta as linhas da fatura de cartão (competência, uma por despesa)
pub async fn project_card_invoice(invoice: &CardInvoice, document_id: Uuid) -> Result<()> {
    for line in &invoice.lines {
        let mut entry = projection_builder::from_card_invoice_line(invoice, line);
        entry.category_name =
            category_name(&invoice.company_ref, line.category_ref.as_deref()).await;
        repository::upsert_entry(&entry).await?;
    }

    tracing::info!(
        "Projected card invoice {} into financial movements ({} lines)",
        document_id,
        invoice.lines.len()
    );
    Ok(())
}

/// Projeta o pagamento da fatura (caixa, total único)
pub async fn project_card_invoice_payment(invoice: &CardInvoice, document_id: Uuid) -> Result<()> {
    let entry = projection_builder::from_card_invoice_payment(invoice);
    repository::upsert_entry(&entry).await?;

    tracing::info!(
        "Projected card invoice payment {} into financial movements",
        document_id
    );
    Ok(())
}

/// Projeta um lançamento manual
pub async fn project_manual_entry(entry: &ManualEntry, document_id: Uuid) -> Result<()> {
    let mut movement = projection_builder::from_manual_entry(entry, &document_id.to_string());
    movement.category_name =
        category_name(&entry.company_ref, entry.category_ref.as_deref()).await;
    repository::upsert_entry(&movement).await?;
    Ok(())
}
