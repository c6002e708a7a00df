use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único da empresa (tenant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
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

impl AggregateId for CompanyId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CompanyId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Empresa (tenant). Todos os demais agregados carregam `company_ref`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(flatten)]
    pub base: BaseAggregate<CompanyId>,

    /// CNPJ (somente dígitos)
    pub cnpj: String,
    /// Razão social
    pub legal_name: String,
    /// Nome fantasia
    pub trade_name: String,
}

impl Company {
    pub fn new_for_insert(
        code: String,
        description: String,
        cnpj: String,
        legal_name: String,
        trade_name: String,
    ) -> Self {
        let base = BaseAggregate::new(CompanyId::new_v4(), code, description);
        Self {
            base,
            cnpj,
            legal_name,
            trade_name,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Descrição não pode ser vazia".into());
        }
        if self.cnpj.trim().is_empty() {
            return Err("CNPJ é obrigatório".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Company {
    type Id = CompanyId;

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
        "a001"
    }
    fn collection_name() -> &'static str {
        "company"
    }
    fn element_name() -> &'static str {
        "Empresa"
    }
    fn list_name() -> &'static str {
        "Empresas"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        None
    }
}
