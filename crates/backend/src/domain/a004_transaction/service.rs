use super::repository;
use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::{
    ReconciliationStatus, SalesChannel, Transaction,
};
use contracts::domain::a004_transaction::stock::{ItemSemEstoque, ValidacaoEstoque};
use std::collections::HashMap;
use uuid::Uuid;

/// Desfecho do upsert pela chave natural
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Registro novo criado
    Created(Uuid),
    /// Registro existente completado por merge (nunca duplicado)
    Merged(Uuid),
}

impl UpsertOutcome {
    pub fn id(&self) -> Uuid {
        match self {
            UpsertOutcome::Created(id) | UpsertOutcome::Merged(id) => *id,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, UpsertOutcome::Merged(_))
    }
}

/// Ponto único de escrita de transações: busca pela chave natural, cria ou
/// faz merge-fill. Importação de arquivo, sincronização via API e webhook
/// passam TODOS por aqui - nenhum caminho grava transação sem este gate.
///
/// A corrida entre dois imports simultâneos é coberta pela constraint de
/// unicidade: o insert que perder vira merge em vez de erro.
pub async fn upsert_by_natural_key(mut candidate: Transaction) -> Result<UpsertOutcome> {
    candidate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let key = candidate.natural_key();

    if let Some(mut existing) = repository::get_by_natural_key(&key).await? {
        existing.merge_fill(&candidate);
        existing.before_write();
        let id = repository::update_existing(&existing).await?;
        return Ok(UpsertOutcome::Merged(id));
    }

    candidate.before_write();
    match repository::insert_new(&candidate).await {
        Ok(id) => Ok(UpsertOutcome::Created(id)),
        Err(err) if is_unique_violation(&err) => {
            // outra importação inseriu a mesma chave entre a busca e o
            // insert; refaz como merge
            tracing::debug!(
                "Unique violation on natural key {:?}, converting to merge",
                key
            );
            let mut existing = repository::get_by_natural_key(&key)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Row vanished after unique violation"))?;
            existing.merge_fill(&candidate);
            existing.before_write();
            let id = repository::update_existing(&existing).await?;
            Ok(UpsertOutcome::Merged(id))
        }
        Err(err) => Err(err.into()),
    }
}

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    err.to_string().to_uppercase().contains("UNIQUE")
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Transaction>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(
    company_ref: &str,
    status: Option<ReconciliationStatus>,
) -> Result<Vec<Transaction>> {
    repository::list_by_company(company_ref, status).await
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}

/// Valida o estoque antes da conciliação. Só itens vinculados a produto
/// contam; transação sem item vinculado sempre passa.
pub async fn validate_stock(transaction: &Transaction) -> Result<ValidacaoEstoque> {
    let mut available: HashMap<String, f64> = HashMap::new();
    for item in &transaction.items {
        let Some(product_ref) = item.product_ref.as_deref() else {
            continue;
        };
        if available.contains_key(product_ref) {
            continue;
        }
        let Ok(product_id) = Uuid::parse_str(product_ref) else {
            continue;
        };
        if let Some(product) = crate::domain::a002_product::service::get_by_id(product_id).await? {
            available.insert(product_ref.to_string(), product.stock.quantity);
        }
    }

    Ok(build_stock_validation(&transaction.items, &available))
}

/// Núcleo puro da validação: compara a quantidade pedida com o estoque
/// disponível por produto. Itens sem produto resolvido (ou sem posição de
/// estoque carregada) ficam fora da checagem.
pub fn build_stock_validation(
    items: &[contracts::domain::a004_transaction::aggregate::TransactionItem],
    available: &HashMap<String, f64>,
) -> ValidacaoEstoque {
    let mut itens = Vec::new();

    for item in items {
        let Some(product_ref) = item.product_ref.as_deref() else {
            continue;
        };
        let Some(stock) = available.get(product_ref) else {
            continue;
        };
        if *stock < item.quantity {
            itens.push(ItemSemEstoque {
                line_id: item.line_id.clone(),
                channel_sku: item.channel_sku.clone(),
                descricao: item.description.clone(),
                estoque_disponivel: *stock,
                quantidade_solicitada: item.quantity,
            });
        }
    }

    ValidacaoEstoque {
        valido: itens.is_empty(),
        itens,
    }
}

/// Propagação retroativa de um mapeamento confirmado: todos os itens
/// históricos não vinculados com o mesmo (empresa, canal, SKU do canal)
/// passam a apontar para o produto. Idempotente - itens já vinculados não
/// são tocados.
pub async fn relink_items_for_sku(
    company_ref: &str,
    channel: SalesChannel,
    channel_sku: &str,
    product_ref: &str,
    sku_ref: Option<&str>,
) -> Result<i32> {
    let transactions = repository::list_by_company_channel(company_ref, channel).await?;
    let mut updated_items = 0;

    for mut transaction in transactions {
        let mut changed = false;
        for item in transaction.items.iter_mut() {
            if item.channel_sku.as_deref() == Some(channel_sku) && item.is_unlinked() {
                item.product_ref = Some(product_ref.to_string());
                item.sku_ref = sku_ref.map(|s| s.to_string());
                changed = true;
                updated_items += 1;
            }
        }
        if changed {
            transaction.before_write();
            repository::update_existing(&transaction).await?;
        }
    }

    if updated_items > 0 {
        tracing::info!(
            "Relinked {} historical items for sku {} on channel {}",
            updated_items,
            channel_sku,
            channel
        );
    }

    Ok(updated_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_transaction::aggregate::TransactionItem;

    fn item(line_id: &str, product_ref: Option<&str>, quantity: f64) -> TransactionItem {
        TransactionItem {
            line_id: line_id.into(),
            channel_sku: Some("ABC123".into()),
            description: "Item".into(),
            quantity,
            unit_price: None,
            total_price: None,
            product_ref: product_ref.map(str::to_string),
            sku_ref: None,
            source_row: None,
        }
    }

    #[test]
    fn test_stock_shortfall_is_reported_per_item() {
        let items = vec![item("1", Some("p1"), 10.0)];
        let available = HashMap::from([("p1".to_string(), 4.0)]);

        let validation = build_stock_validation(&items, &available);
        assert!(!validation.valido);
        assert_eq!(validation.itens.len(), 1);
        assert_eq!(validation.itens[0].estoque_disponivel, 4.0);
        assert_eq!(validation.itens[0].quantidade_solicitada, 10.0);
    }

    #[test]
    fn test_sufficient_stock_passes() {
        let items = vec![item("1", Some("p1"), 3.0)];
        let available = HashMap::from([("p1".to_string(), 4.0)]);
        assert!(build_stock_validation(&items, &available).valido);
    }

    #[test]
    fn test_unlinked_items_are_excluded_from_stock_check() {
        let items = vec![item("1", None, 99.0)];
        let available = HashMap::new();
        assert!(build_stock_validation(&items, &available).valido);
    }
}
