use serde::{Deserialize, Serialize};

/// Requisição de importação de extrato bancário
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementImportRequest {
    /// ID da empresa
    #[serde(rename = "companyId")]
    pub company_id: String,

    /// Nome do arquivo OFX enviado
    #[serde(rename = "fileName")]
    pub file_name: String,
}
