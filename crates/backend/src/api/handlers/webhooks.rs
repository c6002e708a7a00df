use axum::Json;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::sync::Arc;

static ML_API_CLIENT: Lazy<
    Arc<crate::shared::marketplaces::mercado_livre::MercadoLivreApiClient>,
> = Lazy::new(|| {
    let config = crate::shared::config::load_config()
        .map(|c| c.mercado_livre)
        .unwrap_or_default();
    Arc::new(crate::shared::marketplaces::mercado_livre::MercadoLivreApiClient::new(config))
});

/// Notificação push do Mercado Livre
#[derive(Debug, Deserialize)]
pub struct MlNotification {
    /// ex.: "/orders/2195160686"
    pub resource: String,
    /// user_id do vendedor
    pub user_id: i64,
    #[serde(default)]
    pub topic: String,
}

/// POST /api/webhooks/mercado-livre
///
/// Responde 200 SEMPRE, inclusive em falha interna - o processamento roda
/// em background e erros vão para o log de integração. Devolver erro aqui
/// faria o marketplace reenfileirar a notificação indefinidamente.
pub async fn mercado_livre(Json(notification): Json<MlNotification>) -> Json<serde_json::Value> {
    tracing::info!(
        "Webhook received: topic={} resource={}",
        notification.topic,
        notification.resource
    );

    let seller_id = notification.user_id.to_string();
    let resource = notification.resource.clone();
    tokio::spawn(async move {
        crate::usecases::u502_sync_marketplace::executor::handle_webhook_notification(
            ML_API_CLIENT.as_ref(),
            &seller_id,
            &resource,
        )
        .await;
    });

    Json(serde_json::json!({"received": true}))
}
