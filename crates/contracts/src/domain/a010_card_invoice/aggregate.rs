use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único da fatura de cartão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInvoiceId(pub Uuid);

impl CardInvoiceId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CardInvoiceId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CardInvoiceId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Status da fatura
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Open,
    Paid,
}

/// Linha da fatura - despesa individual, regime de competência (atribuída
/// ao período em que foi incorrida)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardInvoiceLine {
    /// ID da linha dentro da fatura
    pub line_id: String,
    /// Data da despesa
    pub date: NaiveDate,
    /// Descrição
    pub description: String,
    /// Valor
    pub amount: f64,
    /// Categoria
    pub category_ref: Option<String>,
    /// Parcela (ex.: "3/12")
    pub installment: Option<String>,
}

/// Fatura de cartão de crédito (agregado)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardInvoice {
    #[serde(flatten)]
    pub base: BaseAggregate<CardInvoiceId>,

    /// Ref. da empresa
    pub company_ref: String,
    /// Nome do cartão
    pub card_name: String,
    /// Mês de referência (1-12)
    pub reference_month: u32,
    /// Ano de referência
    pub reference_year: i32,
    /// Vencimento da fatura
    pub due_date: NaiveDate,
    /// Data do pagamento
    pub paid_date: Option<NaiveDate>,
    /// Status
    pub status: InvoiceStatus,
    /// Linhas da fatura
    pub lines: Vec<CardInvoiceLine>,
}

impl CardInvoice {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        company_ref: String,
        card_name: String,
        reference_month: u32,
        reference_year: i32,
        due_date: NaiveDate,
        lines: Vec<CardInvoiceLine>,
    ) -> Self {
        let base = BaseAggregate::new(CardInvoiceId::new_v4(), code, description);
        Self {
            base,
            company_ref,
            card_name,
            reference_month,
            reference_year,
            due_date,
            paid_date: None,
            status: InvoiceStatus::Open,
            lines,
        }
    }

    /// Total da fatura (soma das linhas)
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Registrar o pagamento da fatura - movimento de caixa único
    pub fn pay(&mut self, paid_date: NaiveDate) {
        self.paid_date = Some(paid_date);
        self.status = InvoiceStatus::Paid;
        self.base.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.company_ref.trim().is_empty() {
            return Err("Empresa é obrigatória".into());
        }
        if self.card_name.trim().is_empty() {
            return Err("Nome do cartão é obrigatório".into());
        }
        if !(1..=12).contains(&self.reference_month) {
            return Err("Mês de referência inválido".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for CardInvoice {
    type Id = CardInvoiceId;

    fn id(&self) -> Self::Id {
        self.base.id
    }
    fn code(&self) -> &str {
        &self.base.code
    }
    fn description(&self) -> &str {
        &self.base.description
    }
    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }
    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }
    fn events(&self) -> &EventStore {
        &self.base.events
    }
    fn events_mut(&mut self) -> &mut EventStore {
        &mut self.base.events
    }
    fn aggregate_index() -> &'static str {
        "a010"
    }
    fn collection_name() -> &'static str {
        "card_invoice"
    }
    fn element_name() -> &'static str {
        "Fatura de Cartão"
    }
    fn list_name() -> &'static str {
        "Faturas de Cartão"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        Some(MovementOrigin::Card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_sums_lines() {
        let invoice = CardInvoice::new_for_insert(
            "FAT-1".into(),
            "Fatura Nubank 03/2024".into(),
            "c1".into(),
            "Nubank".into(),
            3,
            2024,
            NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            vec![
                CardInvoiceLine {
                    line_id: "1".into(),
                    date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                    description: "Embalagens".into(),
                    amount: 150.0,
                    category_ref: None,
                    installment: None,
                },
                CardInvoiceLine {
                    line_id: "2".into(),
                    date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                    description: "Software".into(),
                    amount: 99.9,
                    category_ref: None,
                    installment: Some("1/12".into()),
                },
            ],
        );
        assert!((invoice.total() - 249.9).abs() < 1e-9);
    }
}
