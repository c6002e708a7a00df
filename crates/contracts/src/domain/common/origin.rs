use serde::{Deserialize, Serialize};

/// Origem de um movimento financeiro (módulo que gerou o lançamento)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementOrigin {
    /// Lançamento manual
    Manual,
    /// Extrato bancário (OFX)
    Bank,
    /// Fatura de cartão de crédito
    Card,
    /// Conta a pagar liquidada
    Payable,
    /// Conta a receber liquidada
    Receivable,
    /// Venda/repasse de marketplace
    Marketplace,
}

impl MovementOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementOrigin::Manual => "manual",
            MovementOrigin::Bank => "bank",
            MovementOrigin::Card => "card",
            MovementOrigin::Payable => "payable",
            MovementOrigin::Receivable => "receivable",
            MovementOrigin::Marketplace => "marketplace",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(MovementOrigin::Manual),
            "bank" => Some(MovementOrigin::Bank),
            "card" => Some(MovementOrigin::Card),
            "payable" => Some(MovementOrigin::Payable),
            "receivable" => Some(MovementOrigin::Receivable),
            "marketplace" => Some(MovementOrigin::Marketplace),
            _ => None,
        }
    }
}

impl std::fmt::Display for MovementOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
