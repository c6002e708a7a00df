use super::repository;
use anyhow::Result;
use chrono::NaiveDate;
use contracts::domain::a010_card_invoice::aggregate::InvoiceStatus;
use uuid::Uuid;

/// Lança a fatura: uma linha = uma despesa em regime de competência,
/// atribuída ao período em que foi incorrida. O pagamento da fatura é um
/// evento separado (caixa).
pub async fn post(id: Uuid) -> Result<()> {
    let mut invoice = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Card invoice not found: {}", id))?;

    invoice.base.metadata.is_posted = true;
    invoice.before_write();
    repository::upsert(&invoice).await?;

    // recria as projeções do zero
    let registrator = id.to_string();
    crate::projections::p900_financial_movements::repository::delete_by_registrator(&registrator)
        .await?;
    crate::projections::p900_financial_movements::service::project_card_invoice(&invoice, id)
        .await?;

    tracing::info!(
        "Posted card invoice {} ({} lines)",
        id,
        invoice.lines.len()
    );
    Ok(())
}

/// Registra o pagamento da fatura: um único movimento de caixa pelo total.
pub async fn pay(id: Uuid, paid_date: NaiveDate) -> Result<()> {
    let mut invoice = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Card invoice not found: {}", id))?;

    if invoice.status == InvoiceStatus::Paid {
        anyhow::bail!("Card invoice {} is already paid", id);
    }

    invoice.pay(paid_date);
    invoice.before_write();
    repository::upsert(&invoice).await?;

    crate::projections::p900_financial_movements::service::project_card_invoice_payment(
        &invoice, id,
    )
    .await?;

    tracing::info!("Paid card invoice {}", id);
    Ok(())
}

/// Desfaz o lançamento e o pagamento: remove todos os movimentos derivados
pub async fn unpost(id: Uuid) -> Result<()> {
    let mut invoice = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Card invoice not found: {}", id))?;

    invoice.status = InvoiceStatus::Open;
    invoice.paid_date = None;
    invoice.base.metadata.is_posted = false;
    invoice.before_write();
    repository::upsert(&invoice).await?;

    crate::projections::p900_financial_movements::repository::delete_by_registrator(
        &id.to_string(),
    )
    .await?;

    tracing::info!("Unposted card invoice {}", id);
    Ok(())
}
