use crate::domain::a004_transaction::aggregate::EntryDirection;
use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único do lançamento manual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManualEntryId(pub Uuid);

impl ManualEntryId {
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

impl AggregateId for ManualEntryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ManualEntryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Lançamento manual de caixa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualEntry {
    #[serde(flatten)]
    pub base: BaseAggregate<ManualEntryId>,

    /// Ref. da empresa
    pub company_ref: String,
    /// Data do movimento
    pub entry_date: NaiveDate,
    /// Sentido
    pub direction: EntryDirection,
    /// Valor
    pub amount: f64,
    /// Categoria
    pub category_ref: Option<String>,
    /// Centro de custo
    pub cost_center_ref: Option<String>,
}

impl ManualEntry {
    pub fn new_for_insert(
        code: String,
        description: String,
        company_ref: String,
        entry_date: NaiveDate,
        direction: EntryDirection,
        amount: f64,
    ) -> Self {
        let base = BaseAggregate::new(ManualEntryId::new_v4(), code, description);
        Self {
            base,
            company_ref,
            entry_date,
            direction,
            amount,
            category_ref: None,
            cost_center_ref: None,
        }
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

impl AggregateRoot for ManualEntry {
    type Id = ManualEntryId;

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
        "a011"
    }
    fn collection_name() -> &'static str {
        "manual_entry"
    }
    fn element_name() -> &'static str {
        "Lançamento Manual"
    }
    fn list_name() -> &'static str {
        "Lançamentos Manuais"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        Some(MovementOrigin::Manual)
    }
}
