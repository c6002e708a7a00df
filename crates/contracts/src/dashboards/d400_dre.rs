use serde::{Deserialize, Serialize};

/// Requisição da DRE de um período
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreRequest {
    /// ID da empresa
    #[serde(rename = "companyId")]
    pub company_id: String,
    /// Ano
    pub year: i32,
    /// Mês (1-12)
    pub month: u32,
}

/// Detalhe por categoria dentro de uma linha da DRE (drill-down)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreCategoryDetail {
    /// Nome da categoria
    pub name: String,
    /// Valor absoluto somado
    pub amount: f64,
}

/// Linha da DRE (um tipo de categoria)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreLine {
    /// Tipo de categoria (chave)
    #[serde(rename = "categoryType")]
    pub category_type: String,
    /// Nome de exibição da linha
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Soma dos valores absolutos
    pub total: f64,
    /// Detalhe por categoria
    pub categories: Vec<DreCategoryDetail>,
}

/// DRE do período
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreResponse {
    /// Período no formato "AAAA-MM"
    pub period: String,
    /// Linhas por tipo de categoria
    pub lines: Vec<DreLine>,
    /// Receita bruta
    #[serde(rename = "grossRevenue")]
    pub gross_revenue: f64,
    /// Deduções
    pub deductions: f64,
    /// Receita líquida = bruta − deduções
    #[serde(rename = "netRevenue")]
    pub net_revenue: f64,
    /// CMV
    pub cogs: f64,
    /// Lucro bruto = receita líquida − CMV
    #[serde(rename = "grossProfit")]
    pub gross_profit: f64,
    /// Total de despesas (todos os tipos de despesa)
    #[serde(rename = "totalExpenses")]
    pub total_expenses: f64,
    /// Resultado = lucro bruto − despesas
    #[serde(rename = "netIncome")]
    pub net_income: f64,
}
