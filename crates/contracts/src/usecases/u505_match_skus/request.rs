use serde::{Deserialize, Serialize};

/// Confirmação manual de um mapeamento de SKU
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSkuRequest {
    /// ID da empresa
    #[serde(rename = "companyId")]
    pub company_id: String,

    /// Canal de venda
    pub channel: String,

    /// SKU do anúncio no canal
    #[serde(rename = "channelSku")]
    pub channel_sku: String,

    /// Produto interno a vincular
    #[serde(rename = "productId")]
    pub product_id: String,

    /// SKU interno (opcional)
    #[serde(rename = "skuId")]
    pub sku_id: Option<String>,

    /// Rótulo legível (opcional - mantém o existente quando ausente)
    pub label: Option<String>,
}

/// Reaplicação de todos os mapeamentos confirmados da empresa aos itens
/// históricos ainda não vinculados
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReprocessRequest {
    /// ID da empresa
    #[serde(rename = "companyId")]
    pub company_id: String,
}
