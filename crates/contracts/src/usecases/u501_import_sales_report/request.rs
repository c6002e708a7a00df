use serde::{Deserialize, Serialize};

/// Período esperado pelo checklist de fechamento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedPeriod {
    /// Mês (1-12)
    pub mes: u32,
    /// Ano
    pub ano: i32,
}

/// Requisição de importação de relatório de vendas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// ID da empresa
    #[serde(rename = "companyId")]
    pub company_id: String,

    /// Canal declarado (opcional - detectado a partir do arquivo quando ausente)
    pub channel: Option<String>,

    /// Nome do arquivo enviado
    #[serde(rename = "fileName")]
    pub file_name: String,

    /// Período esperado pelo checklist (opcional)
    #[serde(rename = "expectedPeriod")]
    pub expected_period: Option<ExpectedPeriod>,
}
