use super::{projection_builder, repository};
use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::Transaction;
use uuid::Uuid;

/// Desfecho do custeio de uma transação
#[derive(Debug, Clone, Copy, Default)]
pub struct CostOutcome {
    /// Itens com CMV gravado nesta execução
    pub items_costed: i32,
    /// Itens sem produto resolvido (fila de mapeamento)
    pub items_unmapped: i32,
    /// Itens já custeados anteriormente (pulados)
    pub items_skipped: i32,
}

/// Custeia os itens de uma transação conciliada. Item não vinculado fica
/// fora do CMV; item já custeado não é recontado - reexecutar o lote sobre
/// os mesmos dados não insere nada novo.
pub async fn cost_transaction(transaction: &Transaction) -> Result<CostOutcome> {
    let transaction_id = transaction.base.id.value().to_string();
    let mut outcome = CostOutcome::default();

    for item in &transaction.items {
        let Some(product_ref) = item.product_ref.as_deref() else {
            outcome.items_unmapped += 1;
            continue;
        };
        let Ok(product_id) = Uuid::parse_str(product_ref) else {
            outcome.items_unmapped += 1;
            continue;
        };

        let item_ref = projection_builder::item_ref(&transaction_id, item);
        if repository::exists_for_item(&item_ref).await? {
            outcome.items_skipped += 1;
            continue;
        }

        let Some(product) = crate::domain::a002_product::service::get_by_id(product_id).await?
        else {
            outcome.items_unmapped += 1;
            continue;
        };

        let record = projection_builder::build_for_item(
            &transaction.header.company_ref,
            transaction.header.channel,
            transaction.state.transaction_date,
            &transaction_id,
            item,
            &product,
        );

        if repository::insert_entry(&record).await? {
            outcome.items_costed += 1;
        } else {
            outcome.items_skipped += 1;
        }
    }

    Ok(outcome)
}

/// Projeção chamada pela conciliação (posting) - loga o resultado
pub async fn project_transaction(transaction: &Transaction, document_id: Uuid) -> Result<()> {
    let outcome = cost_transaction(transaction).await?;
    tracing::info!(
        "Costed transaction {}: {} items costed, {} unmapped, {} skipped",
        document_id,
        outcome.items_costed,
        outcome.items_unmapped,
        outcome.items_skipped
    );
    Ok(())
}
