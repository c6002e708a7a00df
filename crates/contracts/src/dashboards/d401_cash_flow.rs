use serde::{Deserialize, Serialize};

/// Requisição do fluxo de caixa de um intervalo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowRequest {
    /// ID da empresa
    #[serde(rename = "companyId")]
    pub company_id: String,
    /// Data inicial (AAAA-MM-DD)
    #[serde(rename = "dateFrom")]
    pub date_from: chrono::NaiveDate,
    /// Data final (AAAA-MM-DD)
    #[serde(rename = "dateTo")]
    pub date_to: chrono::NaiveDate,
}

/// Um dia do fluxo de caixa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowDay {
    /// Data
    pub date: chrono::NaiveDate,
    /// Entradas do dia
    pub inflow: f64,
    /// Saídas do dia
    pub outflow: f64,
    /// Saldo acumulado até o fim do dia
    pub balance: f64,
}

/// Fluxo de caixa do intervalo - consome exclusivamente movimentos com
/// regime caixa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowResponse {
    /// Série diária
    pub days: Vec<CashFlowDay>,
    /// Total de entradas
    #[serde(rename = "totalIn")]
    pub total_in: f64,
    /// Total de saídas
    #[serde(rename = "totalOut")]
    pub total_out: f64,
    /// Resultado líquido do intervalo
    pub net: f64,
}
