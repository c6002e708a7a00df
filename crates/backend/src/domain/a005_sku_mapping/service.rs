use super::repository;
use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::SalesChannel;
use contracts::domain::a005_sku_mapping::aggregate::{MappingStatus, SkuMapping};

/// Registra um mapeamento pendente na primeira ocorrência de um SKU não
/// mapeado. Idempotente: conflito com registro existente é ignorado, para
/// que os SKUs desconhecidos acumulem numa fila de resolução manual.
pub async fn ensure_pending(
    company_ref: &str,
    channel: SalesChannel,
    channel_sku: &str,
    label: &str,
) -> Result<SkuMapping> {
    let mut pending = SkuMapping::new_pending(
        company_ref.to_string(),
        channel,
        channel_sku.to_string(),
        label.to_string(),
    );
    pending
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    pending.before_write();
    repository::insert_ignore_conflict(&pending).await
}

/// Confirma (ou recria) o vínculo com o produto interno. Upsert pela tupla
/// (empresa, canal, SKU do canal) - nunca duplica.
pub async fn confirm_mapping(
    company_ref: &str,
    channel: SalesChannel,
    channel_sku: &str,
    product_ref: &str,
    sku_ref: Option<&str>,
    label: Option<&str>,
) -> Result<SkuMapping> {
    let mut mapping = match repository::get_by_key(company_ref, channel, channel_sku).await? {
        Some(existing) => existing,
        None => SkuMapping::new_pending(
            company_ref.to_string(),
            channel,
            channel_sku.to_string(),
            label.unwrap_or(channel_sku).to_string(),
        ),
    };

    if let Some(label) = label {
        mapping.base.description = label.to_string();
    }
    mapping.confirm(product_ref.to_string(), sku_ref.map(|s| s.to_string()));
    mapping
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    mapping.before_write();

    let saved = repository::insert_ignore_conflict(&mapping).await?;
    // o insert pode ter devolvido um registro concorrente ainda pendente;
    // garante o estado confirmado
    if saved.base.id != mapping.base.id || saved.status != MappingStatus::Confirmed {
        let mut existing = repository::get_by_key(company_ref, channel, channel_sku)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Mapping vanished during confirm"))?;
        existing.confirm(product_ref.to_string(), sku_ref.map(|s| s.to_string()));
        if let Some(label) = label {
            existing.base.description = label.to_string();
        }
        existing.before_write();
        repository::update_existing(&existing).await?;
        return Ok(existing);
    }

    Ok(saved)
}

pub async fn list_by_company(
    company_ref: &str,
    status: Option<MappingStatus>,
) -> Result<Vec<SkuMapping>> {
    repository::list_by_company(company_ref, status).await
}

/// Mapeamentos confirmados da empresa (entrada do reprocessamento)
pub async fn list_confirmed(company_ref: &str) -> Result<Vec<SkuMapping>> {
    repository::list_by_company(company_ref, Some(MappingStatus::Confirmed)).await
}
