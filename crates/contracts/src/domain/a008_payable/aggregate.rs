use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único da conta a pagar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayableId(pub Uuid);

impl PayableId {
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

impl AggregateId for PayableId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PayableId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Status de liquidação de contas a pagar/receber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    Open,
    Settled,
    Cancelled,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Open => "open",
            SettlementStatus::Settled => "settled",
            SettlementStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(SettlementStatus::Open),
            "settled" => Some(SettlementStatus::Settled),
            "cancelled" => Some(SettlementStatus::Cancelled),
            _ => None,
        }
    }
}

/// Conta a pagar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payable {
    #[serde(flatten)]
    pub base: BaseAggregate<PayableId>,

    /// Ref. da empresa
    pub company_ref: String,
    /// Fornecedor
    pub supplier_name: String,
    /// Valor
    pub amount: f64,
    /// Vencimento
    pub due_date: NaiveDate,
    /// Data do pagamento (None enquanto em aberto)
    pub paid_date: Option<NaiveDate>,
    /// Status
    pub status: SettlementStatus,
    /// Categoria
    pub category_ref: Option<String>,
    /// Centro de custo
    pub cost_center_ref: Option<String>,
}

impl Payable {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        company_ref: String,
        supplier_name: String,
        amount: f64,
        due_date: NaiveDate,
        category_ref: Option<String>,
        cost_center_ref: Option<String>,
    ) -> Self {
        let base = BaseAggregate::new(PayableId::new_v4(), code, description);
        Self {
            base,
            company_ref,
            supplier_name,
            amount,
            due_date,
            paid_date: None,
            status: SettlementStatus::Open,
            category_ref,
            cost_center_ref,
        }
    }

    /// Dias de atraso em relação a hoje; 0 quando ainda não venceu
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }

    /// Liquidar - o movimento de caixa correspondente é emitido pelo posting
    pub fn settle(&mut self, paid_date: NaiveDate) {
        self.paid_date = Some(paid_date);
        self.status = SettlementStatus::Settled;
        self.base.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Descrição não pode ser vazia".into());
        }
        if self.company_ref.trim().is_empty() {
            return Err("Empresa é obrigatória".into());
        }
        if self.amount <= 0.0 {
            return Err("Valor deve ser positivo".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Payable {
    type Id = PayableId;

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
        "a008"
    }
    fn collection_name() -> &'static str {
        "payable"
    }
    fn element_name() -> &'static str {
        "Conta a Pagar"
    }
    fn list_name() -> &'static str {
        "Contas a Pagar"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        Some(MovementOrigin::Payable)
    }
}
