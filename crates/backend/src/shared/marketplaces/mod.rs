pub mod mercado_livre;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a004_transaction::aggregate::TransactionKind;
use contracts::domain::a006_marketplace_connection::aggregate::MarketplaceConnection;

/// Item de pedido retornado pela API de um canal
#[derive(Debug, Clone)]
pub struct FetchedOrderItem {
    pub sku: Option<String>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
}

/// Evento de venda/repasse retornado pela API de um canal, já normalizado
/// para o formato que o pipeline de deduplicação consome
#[derive(Debug, Clone)]
pub struct FetchedOrder {
    /// Referência nativa do canal (chave natural)
    pub external_ref: String,
    /// Número do pedido
    pub order_id: Option<String>,
    /// Natureza (venda ou repasse)
    pub kind: TransactionKind,
    /// Data do fato gerador
    pub date: NaiveDate,
    /// Valor bruto
    pub gross_amount: f64,
    /// Valor líquido, quando a API informa
    pub net_amount: Option<f64>,
    /// Comissão retida, quando a API informa
    pub commission: Option<f64>,
    /// Frete por conta do vendedor, quando a API informa
    pub shipping_cost: Option<f64>,
    /// Itens do pedido
    pub items: Vec<FetchedOrderItem>,
    /// Payload bruto para arquivamento
    pub raw_json: String,
}

/// Fonte de pedidos de um canal. O seam existe para que a sincronização
/// seja testável sem HTTP e para que novos canais entrem sem tocar no
/// executor.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Lista pedidos desde o corte informado
    async fn fetch_orders_since(
        &self,
        connection: &MarketplaceConnection,
        since: DateTime<Utc>,
    ) -> Result<Vec<FetchedOrder>>;

    /// Busca um único pedido/pagamento (caminho do webhook)
    async fn fetch_order(
        &self,
        connection: &MarketplaceConnection,
        resource: &str,
    ) -> Result<Option<FetchedOrder>>;
}
