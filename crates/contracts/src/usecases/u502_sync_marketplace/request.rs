use serde::{Deserialize, Serialize};

/// Requisição de sincronização de pedidos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    /// ID da conexão de marketplace
    #[serde(rename = "connectionId")]
    pub connection_id: String,

    /// Corte inferior (ISO 8601); quando ausente usa o last_sync_at da conexão
    #[serde(rename = "dateFrom")]
    pub date_from: Option<chrono::DateTime<chrono::Utc>>,
}
