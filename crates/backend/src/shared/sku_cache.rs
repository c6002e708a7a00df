use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::SalesChannel;
use contracts::domain::a005_sku_mapping::aggregate::{MappingStatus, SkuMapping};
use std::collections::HashMap;

/// Entrada do cache: o que o pipeline precisa para resolver um item
#[derive(Debug, Clone)]
pub struct CachedMapping {
    pub product_ref: Option<String>,
    pub sku_ref: Option<String>,
    pub status: MappingStatus,
}

impl From<&SkuMapping> for CachedMapping {
    fn from(mapping: &SkuMapping) -> Self {
        Self {
            product_ref: mapping.product_ref.clone(),
            sku_ref: mapping.sku_ref.clone(),
            status: mapping.status,
        }
    }
}

/// Cache de mapeamentos de SKU com escopo explícito por (empresa, canal).
///
/// Carregado de forma preguiçosa no primeiro acesso e descartado junto com
/// o pipeline que o criou - nunca compartilhado entre tenants. Escritas de
/// mapeamento passam pelo cache (write-through) para que o mesmo SKU não
/// consulte o banco repetidamente dentro de um lote.
pub struct SkuMappingCache {
    company_ref: String,
    channel: SalesChannel,
    entries: Option<HashMap<String, CachedMapping>>,
}

impl SkuMappingCache {
    pub fn new(company_ref: String, channel: SalesChannel) -> Self {
        Self {
            company_ref,
            channel,
            entries: None,
        }
    }

    pub fn company_ref(&self) -> &str {
        &self.company_ref
    }

    pub fn channel(&self) -> SalesChannel {
        self.channel
    }

    /// Resolve um SKU do canal. Primeiro acesso carrega todos os
    /// mapeamentos do escopo de uma vez.
    pub async fn get(&mut self, channel_sku: &str) -> Result<Option<CachedMapping>> {
        self.ensure_loaded().await?;
        Ok(self
            .entries
            .as_ref()
            .and_then(|map| map.get(channel_sku))
            .cloned())
    }

    /// Write-through: registra um mapeamento recém gravado no banco
    pub fn put(&mut self, channel_sku: String, mapping: CachedMapping) {
        if let Some(entries) = self.entries.as_mut() {
            entries.insert(channel_sku, mapping);
        }
    }

    async fn ensure_loaded(&mut self) -> Result<()> {
        if self.entries.is_some() {
            return Ok(());
        }

        let mappings = crate::domain::a005_sku_mapping::repository::list_by_company_channel(
            &self.company_ref,
            self.channel,
        )
        .await?;

        let map: HashMap<String, CachedMapping> = mappings
            .iter()
            .map(|m| (m.channel_sku.clone(), CachedMapping::from(m)))
            .collect();

        tracing::debug!(
            "Loaded {} SKU mappings into cache for company={} channel={}",
            map.len(),
            self.company_ref,
            self.channel
        );

        self.entries = Some(map);
        Ok(())
    }
}
