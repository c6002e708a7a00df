use serde::{Deserialize, Serialize};

/// Requisição de recomputação de CMV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeRequest {
    /// ID da empresa (uma empresa por execução)
    #[serde(rename = "companyId")]
    pub company_id: String,
}
