use super::repository;
use anyhow::Result;
use contracts::domain::a004_transaction::aggregate::SalesChannel;
use contracts::domain::a007_import_job::aggregate::{ImportJob, JobCounters, JobStatus};
use uuid::Uuid;

/// Cria o registro do job no início da importação
pub async fn start(
    company_ref: &str,
    channel: Option<SalesChannel>,
    file_name: &str,
    total: i32,
) -> Result<ImportJob> {
    let mut job = ImportJob::new_for_insert(
        company_ref.to_string(),
        channel,
        file_name.to_string(),
        total,
    );
    job.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    job.before_write();
    repository::upsert(&job).await?;
    Ok(job)
}

/// Atualização incremental dos contadores - é o que a interface consome por
/// polling. Jobs em estado terminal não são alterados.
pub async fn update_counters(id: Uuid, counters: &JobCounters) -> Result<()> {
    let mut job = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Import job not found: {}", id))?;

    if job.status.is_terminal() {
        tracing::warn!("Ignoring counter update for finalized job {}", id);
        return Ok(());
    }

    job.counters = counters.clone();
    job.before_write();
    repository::upsert(&job).await?;
    Ok(())
}

/// Finaliza o job com status terminal. Depois disto o registro não muda
/// mais.
pub async fn finish(
    id: Uuid,
    status: JobStatus,
    counters: &JobCounters,
    error_message: Option<String>,
) -> Result<()> {
    let mut job = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Import job not found: {}", id))?;

    if job.status.is_terminal() {
        tracing::warn!("Job {} already finalized, skipping", id);
        return Ok(());
    }

    job.counters = counters.clone();
    job.finish(status, error_message);
    repository::upsert(&job).await?;
    Ok(())
}

/// Cancelamento cooperativo: o job vai para o estado terminal de erro e o
/// laço de importação observa isto entre linhas. Escritas de linha já
/// emitidas não são desfeitas.
pub async fn cancel(id: Uuid) -> Result<bool> {
    let job = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Import job not found: {}", id))?;

    if job.status.is_terminal() {
        return Ok(false);
    }

    let counters = job.counters.clone();
    finish(
        id,
        JobStatus::Error,
        &counters,
        Some("Cancelado pelo usuário".to_string()),
    )
    .await?;
    Ok(true)
}

/// O job foi cancelado/finalizado? Consultado pelo laço de importação a
/// cada linha.
pub async fn is_cancelled(id: Uuid) -> Result<bool> {
    let job = repository::get_by_id(id).await?;
    Ok(job.map(|j| j.status.is_terminal()).unwrap_or(true))
}

pub async fn get_by_id(id: Uuid) -> Result<Option<ImportJob>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(company_ref: &str, limit: u64) -> Result<Vec<ImportJob>> {
    repository::list_by_company(company_ref, limit).await
}
