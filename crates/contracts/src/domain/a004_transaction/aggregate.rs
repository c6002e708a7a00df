use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único da transação de canal de venda
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
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

impl AggregateId for TransactionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TransactionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Canal de venda
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    MercadoLivre,
    Shopee,
    Amazon,
    Magalu,
    /// Canal não reconhecido
    Outro,
}

impl SalesChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesChannel::MercadoLivre => "mercado_livre",
            SalesChannel::Shopee => "shopee",
            SalesChannel::Amazon => "amazon",
            SalesChannel::Magalu => "magalu",
            SalesChannel::Outro => "outro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mercado_livre" => Some(SalesChannel::MercadoLivre),
            "shopee" => Some(SalesChannel::Shopee),
            "amazon" => Some(SalesChannel::Amazon),
            "magalu" => Some(SalesChannel::Magalu),
            "outro" => Some(SalesChannel::Outro),
            _ => None,
        }
    }
}

impl std::fmt::Display for SalesChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Natureza do evento registrado pela transação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Venda
    Sale,
    /// Repasse/liquidação do marketplace
    Payout,
    /// Tarifa avulsa cobrada pelo canal
    Fee,
    /// Devolução
    Refund,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "sale",
            TransactionKind::Payout => "payout",
            TransactionKind::Fee => "fee",
            TransactionKind::Refund => "refund",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sale" => Some(TransactionKind::Sale),
            "payout" => Some(TransactionKind::Payout),
            "fee" => Some(TransactionKind::Fee),
            "refund" => Some(TransactionKind::Refund),
            _ => None,
        }
    }
}

/// Sentido do lançamento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryDirection {
    Credit,
    Debit,
}

impl EntryDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryDirection::Credit => "credit",
            EntryDirection::Debit => "debit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "credit" => Some(EntryDirection::Credit),
            "debit" => Some(EntryDirection::Debit),
            _ => None,
        }
    }
}

/// Status de conciliação da transação.
///
/// Máquina de estados: imported/pending → reconciled → (reaberta) pending.
/// reconciled → ignored também é alcançável e só sai por reabertura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStatus {
    Imported,
    Pending,
    Reconciled,
    Ignored,
}

impl ReconciliationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationStatus::Imported => "imported",
            ReconciliationStatus::Pending => "pending",
            ReconciliationStatus::Reconciled => "reconciled",
            ReconciliationStatus::Ignored => "ignored",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "imported" => Some(ReconciliationStatus::Imported),
            "pending" => Some(ReconciliationStatus::Pending),
            "reconciled" => Some(ReconciliationStatus::Reconciled),
            "ignored" => Some(ReconciliationStatus::Ignored),
            _ => None,
        }
    }
}

/// Cabeçalho da transação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Ref. da empresa
    pub company_ref: String,
    /// Canal de venda
    pub channel: SalesChannel,
    /// Referência nativa do canal (id do pedido/operação no marketplace)
    pub external_ref: Option<String>,
    /// Número do pedido
    pub order_id: Option<String>,
    /// Nome da conta/loja no canal
    pub account_label: Option<String>,
    /// Tipo de envio (full, flex, correios...)
    pub shipment_type: Option<String>,
}

/// Decomposição das tarifas retidas pelo canal. Todos os campos são
/// opcionais: relatórios parciais preenchem o que têm e o merge completa
/// o restante.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Comissão do marketplace
    pub commission: Option<f64>,
    /// Tarifa fixa por item
    pub fixed_fee: Option<f64>,
    /// Frete por conta do vendedor
    pub shipping_cost: Option<f64>,
    /// Investimento em anúncios (Ads)
    pub ads_cost: Option<f64>,
    /// Impostos retidos
    pub tax: Option<f64>,
    /// Outras deduções
    pub other: Option<f64>,
}

/// Valores da transação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionAmounts {
    /// Valor bruto
    pub gross_amount: f64,
    /// Valor líquido (após tarifas)
    pub net_amount: Option<f64>,
    /// Tarifas
    pub fees: FeeBreakdown,
}

/// Estado de conciliação e datas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionState {
    /// Status de conciliação
    pub status: ReconciliationStatus,
    /// Data do fato gerador
    pub transaction_date: NaiveDate,
    /// Data do repasse/liquidação
    pub settlement_date: Option<NaiveDate>,
    /// Categoria atribuída na conciliação
    pub category_ref: Option<String>,
    /// Centro de custo atribuído na conciliação
    pub cost_center_ref: Option<String>,
}

/// Item de produto dentro da transação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionItem {
    /// ID da linha dentro do documento
    pub line_id: String,
    /// SKU do anúncio no canal
    pub channel_sku: Option<String>,
    /// Descrição do item
    pub description: String,
    /// Quantidade (>= 1)
    pub quantity: f64,
    /// Preço unitário
    pub unit_price: Option<f64>,
    /// Total da linha
    pub total_price: Option<f64>,
    /// Produto interno resolvido
    pub product_ref: Option<String>,
    /// SKU interno resolvido
    pub sku_ref: Option<String>,
    /// Linha de origem no arquivo importado (rastreabilidade)
    pub source_row: Option<u32>,
}

impl TransactionItem {
    /// Item sem produto nem SKU resolvidos: fica fora do CMV e do estoque,
    /// mas continua visível para resolução manual
    pub fn is_unlinked(&self) -> bool {
        self.product_ref.is_none() && self.sku_ref.is_none()
    }

    /// Receita da linha: total quando presente, senão unitário × quantidade
    pub fn revenue(&self) -> Option<f64> {
        self.total_price
            .or_else(|| self.unit_price.map(|p| p * self.quantity))
    }
}

/// Metadados de origem do documento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSourceMeta {
    /// Ref. do payload bruto arquivado (API/webhook) ou nome do arquivo
    pub raw_payload_ref: Option<String>,
    /// Data/hora da importação
    pub imported_at: DateTime<Utc>,
}

/// Chave natural de deduplicação de transações.
///
/// Reimportar o mesmo relatório nunca pode criar uma segunda linha com a
/// mesma tupla - toda escrita passa por busca por esta chave antes do
/// insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionNaturalKey {
    pub company_ref: String,
    pub channel: SalesChannel,
    pub external_ref: Option<String>,
    pub kind: TransactionKind,
    pub direction: EntryDirection,
}

/// Transação de canal de venda (agregado)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub base: BaseAggregate<TransactionId>,

    /// Cabeçalho
    pub header: TransactionHeader,

    /// Natureza do evento
    pub kind: TransactionKind,

    /// Sentido do lançamento
    pub direction: EntryDirection,

    /// Valores
    pub amounts: TransactionAmounts,

    /// Estado de conciliação e datas
    pub state: TransactionState,

    /// Itens de produto
    pub items: Vec<TransactionItem>,

    /// Metadados de origem
    pub source_meta: TransactionSourceMeta,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        header: TransactionHeader,
        kind: TransactionKind,
        direction: EntryDirection,
        amounts: TransactionAmounts,
        state: TransactionState,
        items: Vec<TransactionItem>,
        source_meta: TransactionSourceMeta,
    ) -> Self {
        let base = BaseAggregate::new(TransactionId::new_v4(), code, description);
        Self {
            base,
            header,
            kind,
            direction,
            amounts,
            state,
            items,
            source_meta,
        }
    }

    /// Chave natural de deduplicação
    pub fn natural_key(&self) -> TransactionNaturalKey {
        TransactionNaturalKey {
            company_ref: self.header.company_ref.clone(),
            channel: self.header.channel,
            external_ref: self.header.external_ref.clone(),
            kind: self.kind,
            direction: self.direction,
        }
    }

    /// Política de merge de campos complementares.
    ///
    /// Para cada campo do conjunto complementar (comissão, tarifa fixa,
    /// frete do vendedor, ads, impostos, conta/loja, tipo de envio), o
    /// valor novo só entra se não for nulo; campos já preenchidos nunca
    /// são anulados por um relatório parcial posterior. Em conflito de
    /// valores não nulos, a importação mais recente vence.
    pub fn merge_fill(&mut self, incoming: &Transaction) -> bool {
        let mut changed = false;

        fn fill<T: Clone + PartialEq>(dst: &mut Option<T>, src: &Option<T>, changed: &mut bool) {
            if let Some(value) = src {
                if dst.as_ref() != Some(value) {
                    *dst = Some(value.clone());
                    *changed = true;
                }
            }
        }

        fill(
            &mut self.amounts.fees.commission,
            &incoming.amounts.fees.commission,
            &mut changed,
        );
        fill(
            &mut self.amounts.fees.fixed_fee,
            &incoming.amounts.fees.fixed_fee,
            &mut changed,
        );
        fill(
            &mut self.amounts.fees.shipping_cost,
            &incoming.amounts.fees.shipping_cost,
            &mut changed,
        );
        fill(
            &mut self.amounts.fees.ads_cost,
            &incoming.amounts.fees.ads_cost,
            &mut changed,
        );
        fill(
            &mut self.amounts.fees.tax,
            &incoming.amounts.fees.tax,
            &mut changed,
        );
        fill(
            &mut self.amounts.net_amount,
            &incoming.amounts.net_amount,
            &mut changed,
        );
        fill(
            &mut self.header.account_label,
            &incoming.header.account_label,
            &mut changed,
        );
        fill(
            &mut self.header.shipment_type,
            &incoming.header.shipment_type,
            &mut changed,
        );
        fill(
            &mut self.header.order_id,
            &incoming.header.order_id,
            &mut changed,
        );
        fill(
            &mut self.state.settlement_date,
            &incoming.state.settlement_date,
            &mut changed,
        );

        // Itens só entram quando o registro existente não tem nenhum
        // (relatório transacional completado por relatório de itens)
        if self.items.is_empty() && !incoming.items.is_empty() {
            self.items = incoming.items.clone();
            changed = true;
        }

        changed
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Descrição não pode ser vazia".into());
        }
        if self.header.company_ref.trim().is_empty() {
            return Err("Empresa é obrigatória".into());
        }
        for item in &self.items {
            if item.quantity < 1.0 {
                return Err(format!(
                    "Quantidade do item {} deve ser >= 1",
                    item.line_id
                ));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Transaction {
    type Id = TransactionId;

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
        "a004"
    }
    fn collection_name() -> &'static str {
        "transaction"
    }
    fn element_name() -> &'static str {
        "Transação"
    }
    fn list_name() -> &'static str {
        "Transações"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        Some(MovementOrigin::Marketplace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(external_ref: &str) -> Transaction {
        Transaction::new_for_insert(
            "TRX-0001".into(),
            format!("Venda {}", external_ref),
            TransactionHeader {
                company_ref: "c1".into(),
                channel: SalesChannel::MercadoLivre,
                external_ref: Some(external_ref.into()),
                order_id: None,
                account_label: None,
                shipment_type: None,
            },
            TransactionKind::Sale,
            EntryDirection::Credit,
            TransactionAmounts {
                gross_amount: 100.0,
                net_amount: None,
                fees: FeeBreakdown::default(),
            },
            TransactionState {
                status: ReconciliationStatus::Imported,
                transaction_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                settlement_date: None,
                category_ref: None,
                cost_center_ref: None,
            },
            vec![],
            TransactionSourceMeta {
                raw_payload_ref: None,
                imported_at: chrono::Utc::now(),
            },
        )
    }

    #[test]
    fn test_natural_key_equality() {
        let a = sample("PED-1");
        let b = sample("PED-1");
        let c = sample("PED-2");
        assert_eq!(a.natural_key(), b.natural_key());
        assert_ne!(a.natural_key(), c.natural_key());
    }

    #[test]
    fn test_merge_fill_never_nulls_existing() {
        let mut existing = sample("PED-1");
        existing.amounts.fees.commission = Some(12.5);

        let incoming = sample("PED-1");
        // incoming.commission é None: o valor existente deve permanecer
        existing.merge_fill(&incoming);
        assert_eq!(existing.amounts.fees.commission, Some(12.5));
    }

    #[test]
    fn test_merge_fill_complements_missing_fields() {
        let mut existing = sample("PED-1");
        existing.amounts.fees.commission = Some(12.5);

        let mut incoming = sample("PED-1");
        incoming.amounts.fees.shipping_cost = Some(19.9);
        incoming.header.shipment_type = Some("full".into());

        let changed = existing.merge_fill(&incoming);
        assert!(changed);
        assert_eq!(existing.amounts.fees.commission, Some(12.5));
        assert_eq!(existing.amounts.fees.shipping_cost, Some(19.9));
        assert_eq!(existing.header.shipment_type.as_deref(), Some("full"));
    }

    #[test]
    fn test_merge_fill_most_recent_wins_on_conflict() {
        let mut existing = sample("PED-1");
        existing.amounts.fees.commission = Some(12.5);

        let mut incoming = sample("PED-1");
        incoming.amounts.fees.commission = Some(14.0);

        existing.merge_fill(&incoming);
        assert_eq!(existing.amounts.fees.commission, Some(14.0));
    }

    #[test]
    fn test_merge_fill_no_change_is_reported() {
        let mut existing = sample("PED-1");
        existing.amounts.fees.commission = Some(12.5);
        let mut incoming = sample("PED-1");
        incoming.amounts.fees.commission = Some(12.5);
        assert!(!existing.merge_fill(&incoming));
    }

    #[test]
    fn test_item_revenue_falls_back_to_unit_price() {
        let item = TransactionItem {
            line_id: "1".into(),
            channel_sku: Some("ABC".into()),
            description: "Item".into(),
            quantity: 3.0,
            unit_price: Some(10.0),
            total_price: None,
            product_ref: None,
            sku_ref: None,
            source_row: None,
        };
        assert_eq!(item.revenue(), Some(30.0));
        assert!(item.is_unlinked());
    }

    #[test]
    fn test_validate_rejects_quantity_below_one() {
        let mut t = sample("PED-1");
        t.items.push(TransactionItem {
            line_id: "1".into(),
            channel_sku: None,
            description: "Item".into(),
            quantity: 0.0,
            unit_price: None,
            total_price: None,
            product_ref: None,
            sku_ref: None,
            source_row: None,
        });
        assert!(t.validate().is_err());
    }
}
