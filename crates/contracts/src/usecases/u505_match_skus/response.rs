use serde::{Deserialize, Serialize};

/// Resultado da confirmação de um mapeamento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSkuResponse {
    /// ID do mapeamento gravado
    #[serde(rename = "mappingId")]
    pub mapping_id: String,

    /// Itens históricos atualizados retroativamente
    #[serde(rename = "itemsUpdated")]
    pub items_updated: i32,
}

/// Resposta ao disparo do reprocessamento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReprocessResponse {
    /// ID da sessão para acompanhamento do progresso
    #[serde(rename = "sessionId")]
    pub session_id: String,

    /// Status do disparo
    pub status: ReprocessStartStatus,

    /// Mensagem
    pub message: String,
}

/// Status do disparo do reprocessamento
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReprocessStartStatus {
    Started,
    Failed,
}
