use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único do produto interno
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Custos do produto
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCosts {
    /// Custo médio (base do CMV)
    pub average_cost: f64,
    /// Custo da última compra
    pub last_purchase_cost: Option<f64>,
}

/// Posição de estoque
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductStock {
    /// Quantidade em estoque
    pub quantity: f64,
    /// Estoque mínimo
    pub minimum: Option<f64>,
}

/// Dados fiscais
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTax {
    /// NCM
    pub ncm: Option<String>,
    /// Alíquota de crédito de ICMS nas compras (%)
    pub icms_credit_rate: Option<f64>,
}

/// Produto interno do catálogo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    /// Ref. da empresa
    pub company_ref: String,
    /// SKU interno
    pub sku: String,
    /// Unidade de medida
    pub unit: String,
    /// Custos
    pub costs: ProductCosts,
    /// Estoque
    pub stock: ProductStock,
    /// Fiscal
    pub tax: ProductTax,
}

impl Product {
    pub fn new_for_insert(
        code: String,
        description: String,
        company_ref: String,
        sku: String,
        unit: String,
        average_cost: f64,
        stock_quantity: f64,
    ) -> Self {
        let base = BaseAggregate::new(ProductId::new_v4(), code, description);
        Self {
            base,
            company_ref,
            sku,
            unit,
            costs: ProductCosts {
                average_cost,
                last_purchase_cost: None,
            },
            stock: ProductStock {
                quantity: stock_quantity,
                minimum: None,
            },
            tax: ProductTax {
                ncm: None,
                icms_credit_rate: None,
            },
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Descrição não pode ser vazia".into());
        }
        if self.sku.trim().is_empty() {
            return Err("SKU é obrigatório".into());
        }
        if self.company_ref.trim().is_empty() {
            return Err("Empresa é obrigatória".into());
        }
        if self.costs.average_cost < 0.0 {
            return Err("Custo médio não pode ser negativo".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

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
        "a002"
    }
    fn collection_name() -> &'static str {
        "product"
    }
    fn element_name() -> &'static str {
        "Produto"
    }
    fn list_name() -> &'static str {
        "Produtos"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        None
    }
}
