use anyhow::Result;
use chrono::{Duration, Utc};
use contracts::domain::a004_transaction::aggregate::{
    EntryDirection, FeeBreakdown, ReconciliationStatus, SalesChannel, Transaction,
    TransactionAmounts, TransactionHeader, TransactionItem, TransactionKind,
    TransactionSourceMeta, TransactionState,
};
use contracts::domain::a006_marketplace_connection::aggregate::MarketplaceConnection;
use contracts::usecases::u502_sync_marketplace::request::SyncRequest;
use contracts::usecases::u502_sync_marketplace::response::SyncSummary;
use uuid::Uuid;

use crate::domain::a004_transaction::service::UpsertOutcome;
use crate::shared::marketplaces::{FetchedOrder, OrderSource};

/// Janela padrão quando a conexão nunca sincronizou
const DEFAULT_BACKFILL_DAYS: i64 = 30;

/// Converte um pedido da API no mesmo candidato que a importação de
/// arquivo produz - a sincronização não tem caminho próprio de escrita.
pub fn order_to_candidate(
    company_ref: &str,
    channel: SalesChannel,
    order: &FetchedOrder,
    raw_payload_ref: Option<String>,
) -> Transaction {
    let items: Vec<TransactionItem> = order
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| TransactionItem {
            line_id: format!("{}", i + 1),
            channel_sku: item.sku.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
            product_ref: None,
            sku_ref: None,
            source_row: None,
        })
        .collect();

    let (direction, settlement_date) = match order.kind {
        TransactionKind::Payout => (EntryDirection::Credit, Some(order.date)),
        TransactionKind::Refund => (EntryDirection::Debit, None),
        _ => (EntryDirection::Credit, None),
    };

    Transaction::new_for_insert(
        format!("TRX-{}", order.external_ref),
        format!(
            "Pedido {} ({})",
            order.order_id.as_deref().unwrap_or(&order.external_ref),
            channel
        ),
        TransactionHeader {
            company_ref: company_ref.to_string(),
            channel,
            external_ref: Some(order.external_ref.clone()),
            order_id: order.order_id.clone(),
            account_label: None,
            shipment_type: None,
        },
        order.kind,
        direction,
        TransactionAmounts {
            gross_amount: order.gross_amount,
            net_amount: order.net_amount,
            fees: FeeBreakdown {
                commission: order.commission,
                shipping_cost: order.shipping_cost,
                ..FeeBreakdown::default()
            },
        },
        TransactionState {
            status: ReconciliationStatus::Imported,
            transaction_date: order.date,
            settlement_date,
            category_ref: None,
            cost_center_ref: None,
        },
        items,
        TransactionSourceMeta {
            raw_payload_ref,
            imported_at: Utc::now(),
        },
    )
}

/// Grava um pedido vindo da API pelo MESMO contrato de chave natural e
/// merge da importação de arquivos. Arquiva o payload bruto antes.
async fn upsert_fetched_order(
    connection: &MarketplaceConnection,
    order: &FetchedOrder,
) -> Result<UpsertOutcome> {
    let raw_ref = crate::shared::data::raw_storage::save_raw_json(
        connection.channel.as_str(),
        "order",
        &order.external_ref,
        &order.raw_json,
        Utc::now(),
    )
    .await?;

    let candidate = order_to_candidate(
        &connection.company_ref,
        connection.channel,
        order,
        Some(raw_ref),
    );

    crate::domain::a004_transaction::service::upsert_by_natural_key(candidate).await
}

/// Sincroniza os pedidos desde o corte. Falha por pedido vai para o log de
/// integração e o laço continua.
pub async fn sync_orders(
    source: &dyn OrderSource,
    request: &SyncRequest,
) -> Result<SyncSummary> {
    let connection_id = Uuid::parse_str(&request.connection_id)
        .map_err(|_| anyhow::anyhow!("connection_id inválido"))?;
    let connection =
        crate::domain::a006_marketplace_connection::service::get_by_id(connection_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Connection not found: {}", connection_id))?;

    let since = request
        .date_from
        .or(connection.last_sync_at)
        .unwrap_or_else(|| Utc::now() - Duration::days(DEFAULT_BACKFILL_DAYS));

    let sync_started_at = Utc::now();
    let orders = source.fetch_orders_since(&connection, since).await?;

    let mut summary = SyncSummary {
        fetched: orders.len() as i32,
        imported: 0,
        merged: 0,
        errors: 0,
    };

    for order in &orders {
        match upsert_fetched_order(&connection, order).await {
            Ok(UpsertOutcome::Created(_)) => summary.imported += 1,
            Ok(UpsertOutcome::Merged(_)) => summary.merged += 1,
            Err(e) => {
                summary.errors += 1;
                let _ = crate::shared::integration_log::log_failure(
                    connection.channel.as_str(),
                    "sync_order",
                    &format!("pedido {}: {}", order.external_ref, e),
                )
                .await;
            }
        }
    }

    crate::domain::a006_marketplace_connection::service::update_last_sync(
        connection_id,
        sync_started_at,
    )
    .await?;

    crate::shared::integration_log::log_success(
        connection.channel.as_str(),
        "sync_orders",
        &format!(
            "{} pedidos: {} novos, {} merges, {} erros",
            summary.fetched, summary.imported, summary.merged, summary.errors
        ),
    )
    .await?;

    Ok(summary)
}

/// Caminho do webhook: busca o recurso notificado e o grava pelo mesmo
/// contrato de upsert. NUNCA devolve erro ao chamador externo - falha é
/// registrada no log de integração e o webhook confirma o recebimento
/// mesmo assim, para evitar tempestade de retries.
pub async fn handle_webhook_notification(
    source: &dyn OrderSource,
    seller_id: &str,
    resource: &str,
) {
    let result = process_notification(source, seller_id, resource).await;
    if let Err(e) = result {
        tracing::error!("Webhook processing failed for {}: {}", resource, e);
        let _ = crate::shared::integration_log::log_failure(
            "mercado_livre",
            "webhook",
            &format!("{}: {}", resource, e),
        )
        .await;
    }
}

async fn process_notification(
    source: &dyn OrderSource,
    seller_id: &str,
    resource: &str,
) -> Result<()> {
    let connection = find_connection_by_seller(seller_id).await?;

    let Some(order) = source.fetch_order(&connection, resource).await? else {
        tracing::warn!("Webhook resource not found: {}", resource);
        return Ok(());
    };

    let outcome = upsert_fetched_order(&connection, &order).await?;
    crate::shared::integration_log::log_success(
        connection.channel.as_str(),
        "webhook",
        &format!(
            "{} → {}",
            resource,
            if outcome.is_merge() { "merge" } else { "novo" }
        ),
    )
    .await?;
    Ok(())
}

async fn find_connection_by_seller(seller_id: &str) -> Result<MarketplaceConnection> {
    // o webhook só traz o user_id do vendedor; procura entre as conexões
    // ativas de todas as empresas
    let companies = crate::domain::a001_company::service::list_all().await?;
    for company in companies {
        let connections = crate::domain::a006_marketplace_connection::service::list_by_company(
            &company.base.id.value().to_string(),
        )
        .await?;
        if let Some(connection) = connections
            .into_iter()
            .find(|c| c.seller_id.as_deref() == Some(seller_id))
        {
            return Ok(connection);
        }
    }
    anyhow::bail!("No connection found for seller {}", seller_id)
}
