use super::repository;
use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::ReconciliationStatus;
use contracts::domain::a004_transaction::stock::ValidacaoEstoque;
use uuid::Uuid;

/// Desfecho da conciliação
#[derive(Debug, Clone)]
pub enum ReconcileOutcome {
    /// Conciliada e projetada
    Reconciled,
    /// Bloqueada por falta de estoque - nada foi gravado
    BlockedByStock(ValidacaoEstoque),
}

/// Concilia a transação: valida estoque, atribui categoria/centro de
/// custo, baixa o estoque dos itens vinculados e cria as projeções
/// (movimentos financeiros + CMV).
pub async fn reconcile(
    id: Uuid,
    category_ref: Option<String>,
    cost_center_ref: Option<String>,
) -> Result<ReconcileOutcome> {
    let mut transaction = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {}", id))?;

    if transaction.state.status == ReconciliationStatus::Reconciled {
        anyhow::bail!("Transaction {} is already reconciled", id);
    }

    // validação de estoque bloqueia só esta transação
    let validation = super::service::validate_stock(&transaction).await?;
    if !validation.valido {
        return Ok(ReconcileOutcome::BlockedByStock(validation));
    }

    if category_ref.is_some() {
        transaction.state.category_ref = category_ref;
    }
    if cost_center_ref.is_some() {
        transaction.state.cost_center_ref = cost_center_ref;
    }
    transaction.state.status = ReconciliationStatus::Reconciled;
    transaction.base.metadata.is_posted = true;
    transaction.before_write();
    repository::update_existing(&transaction).await?;

    // baixa de estoque dos itens vinculados
    for item in &transaction.items {
        if let Some(product_ref) = item.product_ref.as_deref() {
            if let Ok(product_id) = Uuid::parse_str(product_ref) {
                crate::domain::a002_product::service::adjust_stock(product_id, -item.quantity)
                    .await?;
            }
        }
    }

    // recria as projeções do zero (idempotente para re-conciliação)
    let registrator = id.to_string();
    crate::projections::p900_financial_movements::repository::delete_by_registrator(&registrator)
        .await?;
    crate::projections::p901_cmv_records::repository::delete_by_registrator(&registrator).await?;

    crate::projections::p900_financial_movements::service::project_transaction(&transaction, id)
        .await?;
    crate::projections::p901_cmv_records::service::project_transaction(&transaction, id).await?;

    tracing::info!("Reconciled transaction {}", id);
    Ok(ReconcileOutcome::Reconciled)
}

/// Reabre a transação: devolve o estoque, remove os movimentos financeiros
/// e os registros de CMV derivados, e volta o status para pending.
pub async fn reopen(id: Uuid) -> Result<()> {
    let mut transaction = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {}", id))?;

    let was_reconciled = transaction.state.status == ReconciliationStatus::Reconciled;

    transaction.state.status = ReconciliationStatus::Pending;
    transaction.base.metadata.is_posted = false;
    transaction.before_write();
    repository::update_existing(&transaction).await?;

    if was_reconciled {
        // devolve o estoque baixado na conciliação
        for item in &transaction.items {
            if let Some(product_ref) = item.product_ref.as_deref() {
                if let Ok(product_id) = Uuid::parse_str(product_ref) {
                    crate::domain::a002_product::service::adjust_stock(product_id, item.quantity)
                        .await?;
                }
            }
        }
    }

    let registrator = id.to_string();
    crate::projections::p900_financial_movements::repository::delete_by_registrator(&registrator)
        .await?;
    crate::projections::p901_cmv_records::repository::delete_by_registrator(&registrator).await?;

    tracing::info!("Reopened transaction {}", id);
    Ok(())
}

/// Marca a transação como ignorada (terminal até reabertura explícita).
/// Se estava conciliada, os efeitos colaterais são revertidos como na
/// reabertura.
pub async fn ignore(id: Uuid) -> Result<()> {
    let transaction = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {}", id))?;

    if transaction.state.status == ReconciliationStatus::Reconciled {
        reopen(id).await?;
    }

    let mut transaction = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {}", id))?;
    transaction.state.status = ReconciliationStatus::Ignored;
    transaction.before_write();
    repository::update_existing(&transaction).await?;

    tracing::info!("Ignored transaction {}", id);
    Ok(())
}
