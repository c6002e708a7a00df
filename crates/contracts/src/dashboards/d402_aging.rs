use serde::{Deserialize, Serialize};

/// Faixa de atraso de um título em aberto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    /// Ainda não venceu
    NotDue,
    /// 1 a 30 dias de atraso
    Days1To30,
    /// 31 a 60 dias
    Days31To60,
    /// 61 a 90 dias
    Days61To90,
    /// Mais de 90 dias
    Over90,
}

impl AgingBucket {
    /// Faixa para um número de dias de atraso. Título vencido há exatamente
    /// 30 dias cai em 1–30; há 31 dias cai em 31–60.
    pub fn for_days_overdue(days: i64) -> Self {
        match days {
            d if d <= 0 => AgingBucket::NotDue,
            1..=30 => AgingBucket::Days1To30,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::NotDue => "A vencer",
            AgingBucket::Days1To30 => "1-30 dias",
            AgingBucket::Days31To60 => "31-60 dias",
            AgingBucket::Days61To90 => "61-90 dias",
            AgingBucket::Over90 => "90+ dias",
        }
    }

    pub fn all() -> &'static [AgingBucket] {
        &[
            AgingBucket::NotDue,
            AgingBucket::Days1To30,
            AgingBucket::Days31To60,
            AgingBucket::Days61To90,
            AgingBucket::Over90,
        ]
    }
}

/// Severidade do sinal de inadimplência da carteira
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelinquencySeverity {
    Normal,
    /// Inadimplência > 20%
    High,
    /// Inadimplência > 30%
    Critical,
}

impl DelinquencySeverity {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio > 0.30 {
            DelinquencySeverity::Critical
        } else if ratio > 0.20 {
            DelinquencySeverity::High
        } else {
            DelinquencySeverity::Normal
        }
    }
}

/// Resumo de uma faixa de aging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingBucketSummary {
    /// Faixa
    pub bucket: AgingBucket,
    /// Rótulo de exibição
    pub label: String,
    /// Quantidade de títulos na faixa
    pub count: i32,
    /// Valor somado
    pub amount: f64,
}

/// Aging da carteira (a pagar ou a receber)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingResponse {
    /// Resumo por faixa, na ordem das faixas
    pub buckets: Vec<AgingBucketSummary>,
    /// Inadimplência = vencidos em aberto / total não cancelado (0–1)
    #[serde(rename = "delinquencyRatio")]
    pub delinquency_ratio: f64,
    /// Severidade do sinal
    pub severity: DelinquencySeverity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(AgingBucket::for_days_overdue(0), AgingBucket::NotDue);
        assert_eq!(AgingBucket::for_days_overdue(-5), AgingBucket::NotDue);
        assert_eq!(AgingBucket::for_days_overdue(1), AgingBucket::Days1To30);
        // vencido há exatamente 30 dias: 1-30
        assert_eq!(AgingBucket::for_days_overdue(30), AgingBucket::Days1To30);
        // vencido há exatamente 31 dias: 31-60
        assert_eq!(AgingBucket::for_days_overdue(31), AgingBucket::Days31To60);
        assert_eq!(AgingBucket::for_days_overdue(60), AgingBucket::Days31To60);
        assert_eq!(AgingBucket::for_days_overdue(61), AgingBucket::Days61To90);
        assert_eq!(AgingBucket::for_days_overdue(90), AgingBucket::Days61To90);
        assert_eq!(AgingBucket::for_days_overdue(91), AgingBucket::Over90);
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(
            DelinquencySeverity::for_ratio(0.10),
            DelinquencySeverity::Normal
        );
        assert_eq!(
            DelinquencySeverity::for_ratio(0.20),
            DelinquencySeverity::Normal
        );
        assert_eq!(
            DelinquencySeverity::for_ratio(0.25),
            DelinquencySeverity::High
        );
        assert_eq!(
            DelinquencySeverity::for_ratio(0.31),
            DelinquencySeverity::Critical
        );
    }
}
