use super::repository;
use anyhow::Result;
use chrono::NaiveDate;
use contracts::domain::a008_payable::aggregate::SettlementStatus;
use uuid::Uuid;

/// Liquida a conta a pagar: grava a data de pagamento e emite o movimento
/// de caixa no hub. O movimento só existe quando o título foi efetivamente
/// pago.
pub async fn settle(id: Uuid, paid_date: NaiveDate) -> Result<()> {
    let mut payable = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Payable not found: {}", id))?;

    if payable.status == SettlementStatus::Settled {
        anyhow::bail!("Payable {} is already settled", id);
    }
    if payable.status == SettlementStatus::Cancelled {
        anyhow::bail!("Payable {} is cancelled", id);
    }

    payable.settle(paid_date);
    payable.base.metadata.is_posted = true;
    payable.before_write();
    repository::upsert(&payable).await?;

    crate::projections::p900_financial_movements::service::project_payable(&payable, id).await?;

    tracing::info!("Settled payable {}", id);
    Ok(())
}

/// Desfaz a liquidação: volta o título para aberto e remove o movimento do
/// hub.
pub async fn reopen(id: Uuid) -> Result<()> {
    let mut payable = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Payable not found: {}", id))?;

    payable.paid_date = None;
    payable.status = SettlementStatus::Open;
    payable.base.metadata.is_posted = false;
    payable.before_write();
    repository::upsert(&payable).await?;

    crate::projections::p900_financial_movements::repository::delete_by_registrator(
        &id.to_string(),
    )
    .await?;

    tracing::info!("Reopened payable {}", id);
    Ok(())
}

/// Cancela o título. Título liquidado precisa ser reaberto antes.
pub async fn cancel(id: Uuid) -> Result<()> {
    let mut payable = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Payable not found: {}", id))?;

    if payable.status == SettlementStatus::Settled {
        anyhow::bail!("Reopen payable {} before cancelling", id);
    }

    payable.status = SettlementStatus::Cancelled;
    payable.before_write();
    repository::upsert(&payable).await?;
    Ok(())
}
