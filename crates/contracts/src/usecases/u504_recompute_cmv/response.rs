use serde::{Deserialize, Serialize};

/// Resposta ao disparo da recomputação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeResponse {
    /// ID da sessão para acompanhamento do progresso
    #[serde(rename = "sessionId")]
    pub session_id: String,

    /// Status do disparo
    pub status: RecomputeStartStatus,

    /// Mensagem
    pub message: String,
}

/// Status do disparo da recomputação
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecomputeStartStatus {
    Started,
    Failed,
}
