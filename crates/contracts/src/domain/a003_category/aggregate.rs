use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único da categoria financeira
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
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

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Tipo da categoria - define a linha da DRE em que o valor é agrupado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    /// Receita bruta
    Revenue,
    /// Deduções da receita (devoluções, cancelamentos, impostos s/ venda)
    Deductions,
    /// CMV
    Cogs,
    /// Despesas operacionais
    OperatingExpenses,
    /// Folha de pagamento
    Payroll,
    /// Despesas administrativas
    Administrative,
    /// Marketing
    Marketing,
    /// Despesas financeiras
    FinancialExpenses,
    /// Impostos
    Taxes,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Revenue => "revenue",
            CategoryType::Deductions => "deductions",
            CategoryType::Cogs => "cogs",
            CategoryType::OperatingExpenses => "operating_expenses",
            CategoryType::Payroll => "payroll",
            CategoryType::Administrative => "administrative",
            CategoryType::Marketing => "marketing",
            CategoryType::FinancialExpenses => "financial_expenses",
            CategoryType::Taxes => "taxes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "revenue" => Some(CategoryType::Revenue),
            "deductions" => Some(CategoryType::Deductions),
            "cogs" => Some(CategoryType::Cogs),
            "operating_expenses" => Some(CategoryType::OperatingExpenses),
            "payroll" => Some(CategoryType::Payroll),
            "administrative" => Some(CategoryType::Administrative),
            "marketing" => Some(CategoryType::Marketing),
            "financial_expenses" => Some(CategoryType::FinancialExpenses),
            "taxes" => Some(CategoryType::Taxes),
            _ => None,
        }
    }

    /// Nome da linha na DRE
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryType::Revenue => "Receita Bruta",
            CategoryType::Deductions => "Deduções",
            CategoryType::Cogs => "CMV",
            CategoryType::OperatingExpenses => "Despesas Operacionais",
            CategoryType::Payroll => "Folha de Pagamento",
            CategoryType::Administrative => "Despesas Administrativas",
            CategoryType::Marketing => "Marketing",
            CategoryType::FinancialExpenses => "Despesas Financeiras",
            CategoryType::Taxes => "Impostos",
        }
    }

    /// Tipos de despesa subtraídos do lucro bruto para chegar ao resultado
    pub fn expense_types() -> &'static [CategoryType] {
        &[
            CategoryType::OperatingExpenses,
            CategoryType::Payroll,
            CategoryType::Administrative,
            CategoryType::Marketing,
            CategoryType::FinancialExpenses,
            CategoryType::Taxes,
        ]
    }
}

/// Categoria financeira para classificação de movimentos e linhas da DRE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub base: BaseAggregate<CategoryId>,

    /// Ref. da empresa
    pub company_ref: String,
    /// Tipo (linha da DRE)
    pub category_type: CategoryType,
}

impl Category {
    pub fn new_for_insert(
        code: String,
        description: String,
        company_ref: String,
        category_type: CategoryType,
    ) -> Self {
        let base = BaseAggregate::new(CategoryId::new_v4(), code, description);
        Self {
            base,
            company_ref,
            category_type,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Descrição não pode ser vazia".into());
        }
        if self.company_ref.trim().is_empty() {
            return Err("Empresa é obrigatória".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

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
        "a003"
    }
    fn collection_name() -> &'static str {
        "category"
    }
    fn element_name() -> &'static str {
        "Categoria"
    }
    fn list_name() -> &'static str {
        "Categorias"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        None
    }
}
