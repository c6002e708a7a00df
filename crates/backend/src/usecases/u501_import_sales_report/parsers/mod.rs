//! Parsers por canal: cada variante implementa o mesmo contrato
//! "linha → candidato", com as particularidades de layout do canal.
//! Canal não reconhecido cai no parser genérico.

pub mod generic;
pub mod mercado_livre;
pub mod shopee;

use crate::shared::ingest::headers::ColumnMap;
use chrono::NaiveDate;
use contracts::domain::a004_transaction::aggregate::SalesChannel;

/// Linha candidata extraída de um relatório, ainda sem persistência.
/// Carrega a linha de origem para rastreabilidade.
#[derive(Debug, Clone, Default)]
pub struct CandidateRow {
    pub row_number: u32,
    /// Referência nativa do canal (chave natural); cai para o pedido
    pub external_ref: Option<String>,
    pub order_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
    pub commission: Option<f64>,
    pub fixed_fee: Option<f64>,
    pub shipping_cost: Option<f64>,
    pub ads_cost: Option<f64>,
    pub tax: Option<f64>,
    pub store_name: Option<String>,
    pub shipment_type: Option<String>,
}

/// Estratégia de parse por canal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelParser {
    MercadoLivre,
    Shopee,
    Generic,
}

impl ChannelParser {
    pub fn for_channel(channel: SalesChannel) -> Self {
        match channel {
            SalesChannel::MercadoLivre => ChannelParser::MercadoLivre,
            SalesChannel::Shopee => ChannelParser::Shopee,
            _ => ChannelParser::Generic,
        }
    }

    /// Converte uma linha do arquivo em candidato. Erros aqui são de
    /// linha: contados, nunca abortam o lote.
    pub fn parse_row(
        &self,
        row: &[String],
        map: &ColumnMap,
        row_number: u32,
    ) -> Result<CandidateRow, String> {
        match self {
            ChannelParser::MercadoLivre => mercado_livre::parse_row(row, map, row_number),
            ChannelParser::Shopee => shopee::parse_row(row, map, row_number),
            ChannelParser::Generic => generic::parse_row(row, map, row_number),
        }
    }
}
