use super::oauth;
use crate::shared::config::MercadoLivreConfig;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::a004_transaction::aggregate::TransactionKind;
use contracts::domain::a006_marketplace_connection::aggregate::MarketplaceConnection;
use serde::Deserialize;

use crate::shared::marketplaces::{FetchedOrder, FetchedOrderItem, OrderSource};

const API_BASE: &str = "https://api.mercadolibre.com";

/// Cliente HTTP da API do Mercado Livre
pub struct MercadoLivreApiClient {
    http: reqwest::Client,
    config: MercadoLivreConfig,
}

/// Pedido como retornado por /orders/search
#[derive(Debug, Deserialize)]
struct MlOrder {
    id: i64,
    date_created: DateTime<Utc>,
    total_amount: f64,
    paid_amount: Option<f64>,
    #[serde(default)]
    order_items: Vec<MlOrderItem>,
}

#[derive(Debug, Deserialize)]
struct MlOrderItem {
    item: MlItem,
    quantity: f64,
    unit_price: Option<f64>,
    /// Comissão cobrada por item vendido
    sale_fee: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MlItem {
    #[serde(default)]
    title: String,
    /// SKU definido pelo vendedor no anúncio
    seller_sku: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MlOrderSearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

impl MercadoLivreApiClient {
    pub fn new(config: MercadoLivreConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn config(&self) -> &MercadoLivreConfig {
        &self.config
    }

    /// Access token válido da conexão, renovando com o refresh token quando
    /// expirado
    async fn valid_access_token(&self, connection: &MarketplaceConnection) -> Result<String> {
        let tokens = connection
            .tokens
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Connection has no OAuth tokens"))?;

        if !tokens.is_expired(Utc::now()) {
            return Ok(tokens.access_token.clone());
        }

        let refresh_token = tokens
            .refresh_token
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Access token expired and no refresh token stored"))?;

        tracing::info!(
            "Access token expired for connection {}, refreshing",
            connection.base.id.value()
        );
        let refreshed = oauth::refresh_tokens(&self.http, &self.config, refresh_token).await?;
        let new_tokens = refreshed.into_tokens();
        let access = new_tokens.access_token.clone();

        crate::domain::a006_marketplace_connection::service::update_tokens(
            connection.base.id.value(),
            new_tokens,
        )
        .await?;

        Ok(access)
    }

    fn order_value_to_fetched(raw: &serde_json::Value) -> Option<FetchedOrder> {
        let order: MlOrder = serde_json::from_value(raw.clone()).ok()?;

        let items: Vec<FetchedOrderItem> = order
            .order_items
            .iter()
            .map(|oi| FetchedOrderItem {
                sku: oi.item.seller_sku.clone(),
                description: oi.item.title.clone(),
                quantity: oi.quantity,
                unit_price: oi.unit_price,
                total_price: oi.unit_price.map(|p| p * oi.quantity),
            })
            .collect();

        let commission: f64 = order
            .order_items
            .iter()
            .filter_map(|oi| oi.sale_fee.map(|f| f * oi.quantity))
            .sum();

        Some(FetchedOrder {
            external_ref: order.id.to_string(),
            order_id: Some(order.id.to_string()),
            kind: TransactionKind::Sale,
            date: order.date_created.date_naive(),
            gross_amount: order.total_amount,
            net_amount: order.paid_amount,
            commission: (commission > 0.0).then_some(commission),
            shipping_cost: None,
            items,
            raw_json: raw.to_string(),
        })
    }
}

#[async_trait]
impl OrderSource for MercadoLivreApiClient {
    async fn fetch_orders_since(
        &self,
        connection: &MarketplaceConnection,
        since: DateTime<Utc>,
    ) -> Result<Vec<FetchedOrder>> {
        let token = self.valid_access_token(connection).await?;
        let seller_id = connection
            .seller_id
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Connection has no seller_id"))?;

        let url = format!(
            "{}/orders/search?seller={}&order.date_created.from={}&sort=date_asc",
            API_BASE,
            seller_id,
            urlencoding::encode(&since.to_rfc3339()),
        );

        let response = self.http.get(&url).bearer_auth(&token).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Order search failed: {} - {}", status, body);
        }

        let search: MlOrderSearchResponse = response.json().await?;
        let orders: Vec<FetchedOrder> = search
            .results
            .iter()
            .filter_map(Self::order_value_to_fetched)
            .collect();

        tracing::info!(
            "Fetched {} orders from Mercado Livre for seller {}",
            orders.len(),
            seller_id
        );
        Ok(orders)
    }

    async fn fetch_order(
        &self,
        connection: &MarketplaceConnection,
        resource: &str,
    ) -> Result<Option<FetchedOrder>> {
        let token = self.valid_access_token(connection).await?;

        // resource vem do webhook no formato "/orders/2195160686"
        let url = format!("{}{}", API_BASE, resource);
        let response = self.http.get(&url).bearer_auth(&token).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Order fetch failed: {} - {}", status, body);
        }

        let raw: serde_json::Value = response.json().await?;
        Ok(Self::order_value_to_fetched(&raw))
    }
}
