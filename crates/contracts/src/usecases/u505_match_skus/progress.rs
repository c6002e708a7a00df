use serde::{Deserialize, Serialize};

/// Progresso do reprocessamento de mapeamentos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReprocessProgress {
    /// ID da sessão
    #[serde(rename = "sessionId")]
    pub session_id: String,

    /// Status de execução
    pub status: ReprocessStatus,

    /// Total de mapeamentos confirmados a reaplicar
    pub total: i32,

    /// Mapeamentos processados
    pub processed: i32,

    /// Itens históricos atualizados
    #[serde(rename = "itemsUpdated")]
    pub items_updated: i32,

    /// Erros
    pub errors: i32,

    /// Lista de erros
    #[serde(rename = "errorList", default)]
    pub error_list: Vec<ReprocessError>,

    /// Mapeamento em processamento
    #[serde(rename = "currentItem")]
    pub current_item: Option<String>,

    /// Início
    #[serde(rename = "startedAt")]
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// Término
    #[serde(rename = "completedAt")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Status de execução do reprocessamento
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReprocessStatus {
    InProgress,
    Completed,
    CompletedWithErrors,
    Failed,
}

/// Erro registrado durante o reprocessamento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReprocessError {
    /// Descrição do erro
    pub message: String,
    /// Detalhes
    pub details: Option<String>,
    /// SKU do canal em que o erro ocorreu
    #[serde(rename = "channelSku")]
    pub channel_sku: Option<String>,
}
