use serde::{Deserialize, Serialize};

/// Progresso da recomputação de CMV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeProgress {
    /// ID da sessão
    #[serde(rename = "sessionId")]
    pub session_id: String,

    /// Status de execução
    pub status: RecomputeStatus,

    /// Total de transações a processar
    pub total: i32,

    /// Transações processadas
    pub processed: i32,

    /// Itens custeados (CMV gravado)
    #[serde(rename = "itemsCosted")]
    pub items_costed: i32,

    /// Itens sem mapeamento (fora do CMV, aguardando resolução)
    #[serde(rename = "itemsUnmapped")]
    pub items_unmapped: i32,

    /// Itens com erro
    #[serde(rename = "itemsErrored")]
    pub items_errored: i32,

    /// Lista de erros
    #[serde(rename = "errorList", default)]
    pub error_list: Vec<RecomputeError>,

    /// Transação em processamento
    #[serde(rename = "currentItem")]
    pub current_item: Option<String>,

    /// Início
    #[serde(rename = "startedAt")]
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// Término
    #[serde(rename = "completedAt")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Status de execução da recomputação
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecomputeStatus {
    InProgress,
    Completed,
    CompletedWithErrors,
    Failed,
}

/// Erro registrado durante a recomputação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeError {
    /// Descrição do erro
    pub message: String,
    /// Detalhes
    pub details: Option<String>,
    /// Transação em que o erro ocorreu
    pub transaction: Option<String>,
}
