use crate::domain::a004_transaction::aggregate::SalesChannel;
use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único da conexão com marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketplaceConnectionId(pub Uuid);

impl MarketplaceConnectionId {
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

impl AggregateId for MarketplaceConnectionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(MarketplaceConnectionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Status da conexão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Aguardando autorização OAuth
    Pending,
    /// Conectada e sincronizando
    Active,
    /// Token expirado/revogado, requer reconexão
    Expired,
}

/// Tokens OAuth emitidos pelo marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Expiração do access token
    pub expires_at: DateTime<Utc>,
    pub scope: Option<String>,
}

impl OAuthTokens {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Conexão OAuth com um marketplace (agregado)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConnection {
    #[serde(flatten)]
    pub base: BaseAggregate<MarketplaceConnectionId>,

    /// Ref. da empresa
    pub company_ref: String,
    /// Canal de venda
    pub channel: SalesChannel,
    /// ID do vendedor no marketplace
    pub seller_id: Option<String>,
    /// Tokens OAuth (None enquanto pendente)
    pub tokens: Option<OAuthTokens>,
    /// Status
    pub status: ConnectionStatus,
    /// Corte da última sincronização de pedidos
    pub last_sync_at: Option<DateTime<Utc>>,
}

impl MarketplaceConnection {
    pub fn new_for_insert(
        code: String,
        description: String,
        company_ref: String,
        channel: SalesChannel,
    ) -> Self {
        let base = BaseAggregate::new(MarketplaceConnectionId::new_v4(), code, description);
        Self {
            base,
            company_ref,
            channel,
            seller_id: None,
            tokens: None,
            status: ConnectionStatus::Pending,
            last_sync_at: None,
        }
    }

    /// Armazenar tokens após o token exchange e ativar a conexão
    pub fn store_tokens(&mut self, tokens: OAuthTokens, seller_id: Option<String>) {
        self.tokens = Some(tokens);
        if seller_id.is_some() {
            self.seller_id = seller_id;
        }
        self.status = ConnectionStatus::Active;
        self.base.touch();
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

impl AggregateRoot for MarketplaceConnection {
    type Id = MarketplaceConnectionId;

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
        "a006"
    }
    fn collection_name() -> &'static str {
        "marketplace_connection"
    }
    fn element_name() -> &'static str {
        "Conexão de Marketplace"
    }
    fn list_name() -> &'static str {
        "Conexões de Marketplace"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        Some(MovementOrigin::Marketplace)
    }
}
