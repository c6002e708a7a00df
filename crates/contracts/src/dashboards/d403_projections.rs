use serde::{Deserialize, Serialize};

/// Requisição de projeções de fluxo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionsRequest {
    /// ID da empresa
    #[serde(rename = "companyId")]
    pub company_id: String,
    /// Meses a projetar
    pub months: u32,
}

/// Um mês projetado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedMonth {
    /// Índice do mês projetado (1-based)
    #[serde(rename = "monthIndex")]
    pub month_index: u32,
    /// Receita projetada
    pub revenue: f64,
    /// Custo projetado
    pub cost: f64,
    /// Resultado projetado
    pub net: f64,
}

/// Um cenário nomeado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionScenario {
    /// Nome do cenário (otimista/realista/pessimista)
    pub name: String,
    /// Fator aplicado à receita média
    #[serde(rename = "revenueFactor")]
    pub revenue_factor: f64,
    /// Fator aplicado ao custo médio
    #[serde(rename = "costFactor")]
    pub cost_factor: f64,
    /// Meses projetados
    pub months: Vec<ProjectedMonth>,
}

/// Projeções dos três cenários a partir do histórico de 6 meses em regime
/// de competência
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionsResponse {
    /// Receita média mensal do histórico
    #[serde(rename = "baseRevenue")]
    pub base_revenue: f64,
    /// Custo médio mensal do histórico
    #[serde(rename = "baseCost")]
    pub base_cost: f64,
    /// Cenários na ordem otimista, realista, pessimista
    pub scenarios: Vec<ProjectionScenario>,
}
