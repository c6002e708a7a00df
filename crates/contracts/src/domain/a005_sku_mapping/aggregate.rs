use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use crate::domain::a004_transaction::aggregate::SalesChannel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único do mapeamento de SKU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkuMappingId(pub Uuid);

impl SkuMappingId {
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

impl AggregateId for SkuMappingId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SkuMappingId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Status do mapeamento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    /// Criado automaticamente ao ver um SKU desconhecido; aguarda ação humana
    Pending,
    /// Confirmado por ação humana (product_ref preenchido)
    Confirmed,
}

impl MappingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingStatus::Pending => "pending",
            MappingStatus::Confirmed => "confirmed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(MappingStatus::Pending),
            "confirmed" => Some(MappingStatus::Confirmed),
            _ => None,
        }
    }
}

/// Mapeamento SKU do canal ↔ produto interno, por (empresa, canal).
///
/// A tupla (company_ref, channel, channel_sku) é única; escrita sempre em
/// semântica de upsert, nunca duplica.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuMapping {
    #[serde(flatten)]
    pub base: BaseAggregate<SkuMappingId>,

    /// Ref. da empresa
    pub company_ref: String,
    /// Canal de venda
    pub channel: SalesChannel,
    /// SKU do anúncio no canal
    pub channel_sku: String,
    /// Produto interno resolvido (None = pendente)
    pub product_ref: Option<String>,
    /// SKU interno resolvido
    pub sku_ref: Option<String>,
    /// Status
    pub status: MappingStatus,
}

impl SkuMapping {
    /// Mapeamento pendente criado automaticamente na primeira ocorrência de
    /// um SKU não mapeado
    pub fn new_pending(
        company_ref: String,
        channel: SalesChannel,
        channel_sku: String,
        label: String,
    ) -> Self {
        let code = format!("MAP-{}-{}", channel.as_str(), channel_sku);
        let base = BaseAggregate::new(SkuMappingId::new_v4(), code, label);
        Self {
            base,
            company_ref,
            channel,
            channel_sku,
            product_ref: None,
            sku_ref: None,
            status: MappingStatus::Pending,
        }
    }

    /// Confirmar o mapeamento com o produto interno resolvido
    pub fn confirm(&mut self, product_ref: String, sku_ref: Option<String>) {
        self.product_ref = Some(product_ref);
        self.sku_ref = sku_ref;
        self.status = MappingStatus::Confirmed;
        self.base.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.company_ref.trim().is_empty() {
            return Err("Empresa é obrigatória".into());
        }
        if self.channel_sku.trim().is_empty() {
            return Err("SKU do canal é obrigatório".into());
        }
        if self.status == MappingStatus::Confirmed && self.product_ref.is_none() {
            return Err("Mapeamento confirmado exige produto resolvido".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for SkuMapping {
    type Id = SkuMappingId;

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
        "a005"
    }
    fn collection_name() -> &'static str {
        "sku_mapping"
    }
    fn element_name() -> &'static str {
        "Mapeamento de SKU"
    }
    fn list_name() -> &'static str {
        "Mapeamentos de SKU"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_then_confirm() {
        let mut mapping = SkuMapping::new_pending(
            "c1".into(),
            SalesChannel::Shopee,
            "ABC123".into(),
            "Anúncio ABC123".into(),
        );
        assert_eq!(mapping.status, MappingStatus::Pending);
        assert!(mapping.validate().is_ok());

        mapping.confirm("p1".into(), None);
        assert_eq!(mapping.status, MappingStatus::Confirmed);
        assert_eq!(mapping.product_ref.as_deref(), Some("p1"));
        assert!(mapping.validate().is_ok());
    }
}
