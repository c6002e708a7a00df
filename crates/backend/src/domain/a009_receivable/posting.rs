use super::repository;
use anyhow::Result;
use chrono::NaiveDate;
use contracts::domain::a008_payable::aggregate::SettlementStatus;
use uuid::Uuid;

/// Liquida a conta a receber: grava a data de recebimento e emite o
/// movimento de caixa no hub.
pub async fn settle(id: Uuid, received_date: NaiveDate) -> Result<()> {
    let mut receivable = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Receivable not found: {}", id))?;

    if receivable.status == SettlementStatus::Settled {
        anyhow::bail!("Receivable {} is already settled", id);
    }
    if receivable.status == SettlementStatus::Cancelled {
        anyhow::bail!("Receivable {} is cancelled", id);
    }

    receivable.settle(received_date);
    receivable.base.metadata.is_posted = true;
    receivable.before_write();
    repository::upsert(&receivable).await?;

    crate::projections::p900_financial_movements::service::project_receivable(&receivable, id)
        .await?;

    tracing::info!("Settled receivable {}", id);
    Ok(())
}

/// Desfaz a liquidação: volta o título para aberto e remove o movimento do
/// hub.
pub async fn reopen(id: Uuid) -> Result<()> {
    let mut receivable = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Receivable not found: {}", id))?;

    receivable.received_date = None;
    receivable.status = SettlementStatus::Open;
    receivable.base.metadata.is_posted = false;
    receivable.before_write();
    repository::upsert(&receivable).await?;

    crate::projections::p900_financial_movements::repository::delete_by_registrator(
        &id.to_string(),
    )
    .await?;

    tracing::info!("Reopened receivable {}", id);
    Ok(())
}

/// Cancela o título. Título liquidado precisa ser reaberto antes.
pub async fn cancel(id: Uuid) -> Result<()> {
    let mut receivable = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Receivable not found: {}", id))?;

    if receivable.status == SettlementStatus::Settled {
        anyhow::bail!("Reopen receivable {} before cancelling", id);
    }

    receivable.status = SettlementStatus::Cancelled;
    receivable.before_write();
    repository::upsert(&receivable).await?;
    Ok(())
}
