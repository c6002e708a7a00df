use super::progress_tracker::ProgressTracker;
use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::SalesChannel;
use contracts::usecases::u505_match_skus::{
    progress::ReprocessStatus,
    request::{MapSkuRequest, ReprocessRequest},
    response::{MapSkuResponse, ReprocessResponse, ReprocessStartStatus},
};
use std::sync::Arc;
use uuid::Uuid;

/// Executor do mapeamento de SKUs: a ação humana de confirmar um vínculo e
/// o reprocessamento que reaplica todos os vínculos confirmados.
#[derive(Clone)]
pub struct MatchExecutor {
    pub progress_tracker: Arc<ProgressTracker>,
}

impl MatchExecutor {
    pub fn new(progress_tracker: Arc<ProgressTracker>) -> Self {
        Self { progress_tracker }
    }

    /// Confirma um mapeamento e propaga retroativamente aos itens
    /// históricos não vinculados. Atômico do ponto de vista do chamador e
    /// re-executável: rodar de novo só preenche lacunas restantes.
    pub async fn map_sku(&self, request: MapSkuRequest) -> Result<MapSkuResponse> {
        let channel = SalesChannel::parse(&request.channel)
            .ok_or_else(|| anyhow::anyhow!("Canal desconhecido: {}", request.channel))?;

        // valida o produto antes de gravar o vínculo
        let product_id = Uuid::parse_str(&request.product_id)
            .map_err(|_| anyhow::anyhow!("product_id inválido"))?;
        if crate::domain::a002_product::service::get_by_id(product_id)
            .await?
            .is_none()
        {
            anyhow::bail!("Produto não encontrado: {}", request.product_id);
        }

        let mapping = crate::domain::a005_sku_mapping::service::confirm_mapping(
            &request.company_id,
            channel,
            &request.channel_sku,
            &request.product_id,
            request.sku_id.as_deref(),
            request.label.as_deref(),
        )
        .await?;

        let items_updated = crate::domain::a004_transaction::service::relink_items_for_sku(
            &request.company_id,
            channel,
            &request.channel_sku,
            &request.product_id,
            request.sku_id.as_deref(),
        )
        .await?;

        Ok(MapSkuResponse {
            mapping_id: mapping.base.id.value().to_string(),
            items_updated,
        })
    }

    /// Dispara o reprocessamento de todos os mapeamentos confirmados da
    /// empresa em background
    pub async fn start_reprocess(&self, request: ReprocessRequest) -> Result<ReprocessResponse> {
        let mappings =
            crate::domain::a005_sku_mapping::service::list_confirmed(&request.company_id).await?;

        let total = mappings.len() as i32;
        let session_id = Uuid::new_v4().to_string();
        self.progress_tracker.cleanup_old_sessions(24);
        self.progress_tracker
            .create_session(session_id.clone(), total);

        let executor = self.clone();
        let session_id_clone = session_id.clone();
        let request_clone = request.clone();

        tokio::spawn(async move {
            if let Err(e) = executor
                .run_reprocess(&session_id_clone, &request_clone)
                .await
            {
                tracing::error!("Mapping reprocess failed: {}", e);
                executor.progress_tracker.add_error(
                    &session_id_clone,
                    format!("Reprocess failed: {}", e),
                    None,
                    None,
                );
                executor
                    .progress_tracker
                    .complete_session(&session_id_clone, ReprocessStatus::Failed);
            }
        });

        Ok(ReprocessResponse {
            session_id,
            status: ReprocessStartStatus::Started,
            message: format!("Reprocessamento disparado para {} mapeamentos", total),
        })
    }

    pub fn get_progress(
        &self,
        session_id: &str,
    ) -> Option<contracts::usecases::u505_match_skus::progress::ReprocessProgress> {
        self.progress_tracker.get_progress(session_id)
    }

    /// Reaplica cada mapeamento confirmado aos itens históricos. Sem efeito
    /// além de preencher lacunas - itens já vinculados não são tocados.
    async fn run_reprocess(&self, session_id: &str, request: &ReprocessRequest) -> Result<()> {
        let mappings =
            crate::domain::a005_sku_mapping::service::list_confirmed(&request.company_id).await?;

        let mut processed = 0;
        let mut items_updated = 0;

        for mapping in mappings {
            self.progress_tracker.set_current_item(
                session_id,
                Some(format!("{} - {}", mapping.channel_sku, mapping.base.description)),
            );

            let Some(product_ref) = mapping.product_ref.as_deref() else {
                processed += 1;
                continue;
            };

            match crate::domain::a004_transaction::service::relink_items_for_sku(
                &request.company_id,
                mapping.channel,
                &mapping.channel_sku,
                product_ref,
                mapping.sku_ref.as_deref(),
            )
            .await
            {
                Ok(updated) => items_updated += updated,
                Err(e) => {
                    tracing::error!(
                        "Failed to reprocess mapping {}: {}",
                        mapping.channel_sku,
                        e
                    );
                    self.progress_tracker.add_error(
                        session_id,
                        "Falha ao reaplicar mapeamento".to_string(),
                        Some(e.to_string()),
                        Some(mapping.channel_sku.clone()),
                    );
                }
            }

            processed += 1;
            self.progress_tracker
                .update_progress(session_id, processed, items_updated);
        }

        let status = {
            let progress = self.progress_tracker.get_progress(session_id);
            match progress {
                Some(p) if p.errors > 0 => ReprocessStatus::CompletedWithErrors,
                _ => ReprocessStatus::Completed,
            }
        };
        self.progress_tracker.complete_session(session_id, status);

        tracing::info!(
            "Mapping reprocess session {} done: {} mappings, {} items updated",
            session_id,
            processed,
            items_updated
        );
        Ok(())
    }
}
