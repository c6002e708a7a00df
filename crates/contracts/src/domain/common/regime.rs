use super::MovementOrigin;
use serde::{Deserialize, Serialize};

/// Regime contábil de um movimento financeiro.
///
/// Cada movimento pertence a exatamente um regime: competência alimenta a
/// DRE, caixa alimenta o fluxo de caixa. A partição é garantida aqui, na
/// classificação, e não por filtros posteriores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// Competência: reconhecido quando o fato econômico ocorre
    #[serde(rename = "competencia")]
    Accrual,
    /// Caixa: reconhecido quando o dinheiro efetivamente se move
    #[serde(rename = "caixa")]
    Cash,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Accrual => "competencia",
            Regime::Cash => "caixa",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "competencia" => Some(Regime::Accrual),
            "caixa" => Some(Regime::Cash),
            _ => None,
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Natureza do evento dentro da origem, quando a origem sozinha não decide
/// o regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Venda de marketplace (fato gerador)
    Sale,
    /// Repasse/liquidação de marketplace
    Payout,
    /// Despesa individual da fatura de cartão
    CardExpense,
    /// Pagamento da fatura de cartão
    CardInvoicePayment,
    /// Liquidação de conta a pagar/receber, extrato, lançamento manual
    Settlement,
}

/// Classifica o regime de um movimento a partir de (origem, natureza).
///
/// Despesa de cartão é competência (atribuída ao período em que foi
/// incorrida); o pagamento da fatura é caixa. Venda de marketplace é
/// competência; o repasse é caixa. Todo o resto é caixa.
pub fn classify_regime(origin: MovementOrigin, kind: MovementKind) -> Regime {
    match (origin, kind) {
        (MovementOrigin::Marketplace, MovementKind::Sale) => Regime::Accrual,
        (MovementOrigin::Marketplace, _) => Regime::Cash,
        (MovementOrigin::Card, MovementKind::CardExpense) => Regime::Accrual,
        (MovementOrigin::Card, _) => Regime::Cash,
        (MovementOrigin::Bank, _) => Regime::Cash,
        (MovementOrigin::Payable, _) => Regime::Cash,
        (MovementOrigin::Receivable, _) => Regime::Cash,
        (MovementOrigin::Manual, _) => Regime::Cash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_sale_is_accrual() {
        assert_eq!(
            classify_regime(MovementOrigin::Marketplace, MovementKind::Sale),
            Regime::Accrual
        );
        assert_eq!(
            classify_regime(MovementOrigin::Marketplace, MovementKind::Payout),
            Regime::Cash
        );
    }

    #[test]
    fn test_card_expense_is_accrual_payment_is_cash() {
        assert_eq!(
            classify_regime(MovementOrigin::Card, MovementKind::CardExpense),
            Regime::Accrual
        );
        assert_eq!(
            classify_regime(MovementOrigin::Card, MovementKind::CardInvoicePayment),
            Regime::Cash
        );
    }

    #[test]
    fn test_everything_else_is_cash() {
        for origin in [
            MovementOrigin::Bank,
            MovementOrigin::Payable,
            MovementOrigin::Receivable,
            MovementOrigin::Manual,
        ] {
            assert_eq!(
                classify_regime(origin, MovementKind::Settlement),
                Regime::Cash
            );
        }
    }

    #[test]
    fn test_partition_every_combination_has_exactly_one_regime() {
        // A partição caixa/competência vale por construção: a função é
        // total e retorna um único regime para cada combinação.
        let origins = [
            MovementOrigin::Manual,
            MovementOrigin::Bank,
            MovementOrigin::Card,
            MovementOrigin::Payable,
            MovementOrigin::Receivable,
            MovementOrigin::Marketplace,
        ];
        let kinds = [
            MovementKind::Sale,
            MovementKind::Payout,
            MovementKind::CardExpense,
            MovementKind::CardInvoicePayment,
            MovementKind::Settlement,
        ];
        for origin in origins {
            for kind in kinds {
                let regime = classify_regime(origin, kind);
                assert!(matches!(regime, Regime::Accrual | Regime::Cash));
                let in_cash = regime == Regime::Cash;
                let in_accrual = regime == Regime::Accrual;
                assert!(in_cash != in_accrual);
            }
        }
    }
}
