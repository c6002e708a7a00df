use super::progress_tracker::ProgressTracker;
use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::ReconciliationStatus;
use contracts::usecases::u504_recompute_cmv::{
    progress::RecomputeStatus,
    request::RecomputeRequest,
    response::{RecomputeResponse, RecomputeStartStatus},
};
use std::sync::Arc;
use uuid::Uuid;

/// Executor da recomputação de CMV em lote. Uma empresa por execução;
/// falha por transação é registrada e o lote segue até o fim.
#[derive(Clone)]
pub struct RecomputeExecutor {
    pub progress_tracker: Arc<ProgressTracker>,
}

impl RecomputeExecutor {
    pub fn new(progress_tracker: Arc<ProgressTracker>) -> Self {
        Self { progress_tracker }
    }

    /// Dispara a recomputação em background e devolve o id da sessão
    pub async fn start_recompute(&self, request: RecomputeRequest) -> Result<RecomputeResponse> {
        let transactions = crate::domain::a004_transaction::service::list_by_company(
            &request.company_id,
            Some(ReconciliationStatus::Reconciled),
        )
        .await?;

        let total = transactions.len() as i32;
        let session_id = Uuid::new_v4().to_string();
        self.progress_tracker.cleanup_old_sessions(24);
        self.progress_tracker
            .create_session(session_id.clone(), total);

        let executor = self.clone();
        let session_id_clone = session_id.clone();
        let request_clone = request.clone();

        tokio::spawn(async move {
            if let Err(e) = executor
                .run_recompute(&session_id_clone, &request_clone)
                .await
            {
                tracing::error!("CMV recompute failed: {}", e);
                executor.progress_tracker.add_error(
                    &session_id_clone,
                    format!("Recompute failed: {}", e),
                    None,
                    None,
                );
                executor
                    .progress_tracker
                    .complete_session(&session_id_clone, RecomputeStatus::Failed);
            }
        });

        Ok(RecomputeResponse {
            session_id,
            status: RecomputeStartStatus::Started,
            message: format!("Recomputação disparada para {} transações", total),
        })
    }

    pub fn get_progress(
        &self,
        session_id: &str,
    ) -> Option<contracts::usecases::u504_recompute_cmv::progress::RecomputeProgress> {
        self.progress_tracker.get_progress(session_id)
    }

    /// Percorre as transações conciliadas da empresa e custeia o que ainda
    /// não tem CMV. A guarda de idempotência por item garante que a
    /// reexecução não insere nada para itens já custeados.
    async fn run_recompute(&self, session_id: &str, request: &RecomputeRequest) -> Result<()> {
        let transactions = crate::domain::a004_transaction::service::list_by_company(
            &request.company_id,
            Some(ReconciliationStatus::Reconciled),
        )
        .await?;

        let mut processed = 0;
        let mut items_costed = 0;
        let mut items_unmapped = 0;
        let mut items_errored = 0;

        for transaction in transactions {
            self.progress_tracker.set_current_item(
                session_id,
                Some(transaction.base.description.clone()),
            );

            match crate::projections::p901_cmv_records::service::cost_transaction(&transaction)
                .await
            {
                Ok(outcome) => {
                    items_costed += outcome.items_costed;
                    items_unmapped += outcome.items_unmapped;
                }
                Err(e) => {
                    items_errored += transaction.items.len() as i32;
                    tracing::error!(
                        "Failed to cost transaction {}: {}",
                        transaction.base.id.value(),
                        e
                    );
                    self.progress_tracker.add_error(
                        session_id,
                        "Falha ao custear transação".to_string(),
                        Some(e.to_string()),
                        Some(transaction.base.id.value().to_string()),
                    );
                }
            }

            processed += 1;
            self.progress_tracker.update_progress(
                session_id,
                processed,
                items_costed,
                items_unmapped,
                items_errored,
            );
        }

        let status = if items_errored > 0 {
            RecomputeStatus::CompletedWithErrors
        } else {
            RecomputeStatus::Completed
        };
        self.progress_tracker.complete_session(session_id, status);

        tracing::info!(
            "CMV recompute session {} done: {} transactions, {} items costed, {} unmapped, {} errored",
            session_id,
            processed,
            items_costed,
            items_unmapped,
            items_errored
        );
        Ok(())
    }
}
