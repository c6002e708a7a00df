use anyhow::Result;
use chrono::Utc;
use contracts::domain::a004_transaction::aggregate::{
    EntryDirection, FeeBreakdown, ReconciliationStatus, SalesChannel, Transaction,
    TransactionAmounts, TransactionHeader, TransactionItem, TransactionKind,
    TransactionSourceMeta, TransactionState,
};
use contracts::domain::a007_import_job::aggregate::{ImportJob, JobCounters, JobStatus};
use contracts::usecases::u501_import_sales_report::request::ImportRequest;
use contracts::usecases::u501_import_sales_report::response::{
    ImportSummary, OverlapCheck, PeriodCheck, RowError,
};
use std::collections::HashMap;

use super::parsers::{CandidateRow, ChannelParser};
use crate::domain::a004_transaction::service::UpsertOutcome;
use crate::shared::ingest::headers::{cell, resolve_columns, ColumnMap, LogicalField};
use crate::shared::ingest::table::SheetData;
use crate::shared::ingest::{channel as channel_detect, period, table, IngestError};
use crate::shared::sku_cache::{CachedMapping, SkuMappingCache};

/// Quantos erros de linha entram no resumo (os demais só contam)
const ERROR_SAMPLE_LIMIT: usize = 10;

/// Transação candidata agrupada, com a contagem de linhas de origem para
/// os contadores do job
#[derive(Debug)]
pub struct GroupedCandidate {
    pub transaction: Transaction,
    pub row_count: i32,
}

/// Checagens pré-importação (período + sobreposição), exibidas ao usuário
/// antes da confirmação. Nenhuma delas bloqueia.
pub async fn validate_file(
    request: &ImportRequest,
    bytes: &[u8],
) -> Result<(PeriodCheck, OverlapCheck), IngestError> {
    let sheet = table::read_tabular(&request.file_name, bytes)?;
    let map = resolve_columns(&sheet.headers);
    validate_structure(&map)?;

    let channel = detect_file_channel(request.channel.as_deref(), &sheet, &map);

    let period_check = period::check_period(&sheet, &map, request.expected_period);

    let sampled = period::sample_external_refs(&sheet, &map);
    let existing = crate::domain::a004_transaction::repository::count_existing_external_refs(
        &request.company_id,
        channel,
        &sampled,
    )
    .await
    .map_err(|e| IngestError::Unreadable(format!("consulta de sobreposição: {}", e)))?;
    let overlap_check = period::build_overlap_check(sampled.len(), existing);

    Ok((period_check, overlap_check))
}

/// Dispara a importação: valida a estrutura do arquivo, cria o job
/// persistido e processa em background. O job é consultado por polling.
pub async fn start_import(request: ImportRequest, bytes: Vec<u8>) -> Result<ImportJob> {
    let sheet = table::read_tabular(&request.file_name, &bytes)
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let map = resolve_columns(&sheet.headers);
    validate_structure(&map).map_err(|e| anyhow::anyhow!("{}", e))?;

    let channel = detect_file_channel(request.channel.as_deref(), &sheet, &map);

    let job = crate::domain::a007_import_job::service::start(
        &request.company_id,
        Some(channel),
        &request.file_name,
        sheet.rows.len() as i32,
    )
    .await?;

    let job_id = job.base.id.value();
    let request_clone = request.clone();
    tokio::spawn(async move {
        if let Err(e) = run_import(job_id, &request_clone, channel, sheet).await {
            tracing::error!("Import job {} failed: {}", job_id, e);
            let counters = JobCounters::default();
            let _ = crate::domain::a007_import_job::service::finish(
                job_id,
                JobStatus::Error,
                &counters,
                Some(e.to_string()),
            )
            .await;
        }
    });

    Ok(job)
}

/// Estrutura mínima do arquivo: coluna de data sempre; sem coluna de SKU o
/// arquivo cai para granularidade de transação, mas aí precisa de uma
/// coluna de pedido/operação para formar a chave natural.
fn validate_structure(map: &ColumnMap) -> Result<(), IngestError> {
    if !map.contains_key(&LogicalField::Date) {
        return Err(IngestError::Validation(
            "nenhuma coluna de data reconhecida no cabeçalho".into(),
        ));
    }
    if !map.contains_key(&LogicalField::Sku)
        && !map.contains_key(&LogicalField::OrderId)
        && !map.contains_key(&LogicalField::ExternalRef)
    {
        return Err(IngestError::Validation(
            "nenhuma coluna de SKU, pedido ou operação reconhecida no cabeçalho".into(),
        ));
    }
    Ok(())
}

/// Canal do arquivo: o declarado pelo usuário vence; senão amostra a coluna
/// de loja; senão `outro`
fn detect_file_channel(
    declared: Option<&str>,
    sheet: &SheetData,
    map: &ColumnMap,
) -> SalesChannel {
    if let Some(declared) = declared {
        if let Some(channel) = SalesChannel::parse(declared) {
            return channel;
        }
        return channel_detect::detect_channel(declared);
    }

    for row in sheet.rows.iter().take(20) {
        if let Some(store) = cell(row, map, LogicalField::StoreName) {
            let detected = channel_detect::detect_channel(store);
            if detected != SalesChannel::Outro {
                return detected;
            }
        }
    }

    SalesChannel::Outro
}

/// Agrupa os candidatos de linha por referência externa: um pedido com N
/// linhas de item vira UMA transação com N itens. Linha sem referência
/// vira transação própria. Campos de tarifa seguem "último não nulo vence"
/// na ordem do arquivo.
pub fn group_candidates(
    company_ref: &str,
    channel: SalesChannel,
    file_name: &str,
    rows: Vec<CandidateRow>,
) -> Vec<GroupedCandidate> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<CandidateRow>> = HashMap::new();

    for row in rows {
        let key = row
            .external_ref
            .clone()
            .unwrap_or_else(|| format!("__row_{}", row.row_number));
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let rows = groups.remove(&key)?;
            build_transaction(company_ref, channel, file_name, rows)
        })
        .collect()
}

fn build_transaction(
    company_ref: &str,
    channel: SalesChannel,
    file_name: &str,
    rows: Vec<CandidateRow>,
) -> Option<GroupedCandidate> {
    let row_count = rows.len() as i32;
    let first = rows.first()?;
    let date = rows.iter().find_map(|r| r.date)?;
    let external_ref = first.external_ref.clone();
    let order_id = rows.iter().find_map(|r| r.order_id.clone());
    let store_name = rows.iter().find_map(|r| r.store_name.clone());

    // último não nulo vence dentro do arquivo
    let mut fees = FeeBreakdown::default();
    let mut shipment_type = None;
    for row in &rows {
        if row.commission.is_some() {
            fees.commission = row.commission;
        }
        if row.fixed_fee.is_some() {
            fees.fixed_fee = row.fixed_fee;
        }
        if row.shipping_cost.is_some() {
            fees.shipping_cost = row.shipping_cost;
        }
        if row.ads_cost.is_some() {
            fees.ads_cost = row.ads_cost;
        }
        if row.tax.is_some() {
            fees.tax = row.tax;
        }
        if row.shipment_type.is_some() {
            shipment_type = row.shipment_type.clone();
        }
    }

    let items: Vec<TransactionItem> = rows
        .iter()
        .filter(|r| r.sku.is_some())
        .enumerate()
        .map(|(i, r)| TransactionItem {
            line_id: format!("{}", i + 1),
            channel_sku: r.sku.clone(),
            description: r.description.clone().unwrap_or_default(),
            quantity: r.quantity.unwrap_or(1.0),
            unit_price: r.unit_price,
            total_price: r.total_price,
            product_ref: None,
            sku_ref: None,
            source_row: Some(r.row_number),
        })
        .collect();

    let gross_amount: f64 = rows
        .iter()
        .filter_map(|r| {
            r.total_price
                .or_else(|| r.unit_price.zip(r.quantity).map(|(p, q)| p * q))
        })
        .sum();

    let description = match (&order_id, &store_name) {
        (Some(order), _) => format!("Venda {}", order),
        (None, Some(store)) => format!("Venda {}", store),
        (None, None) => format!("Venda linha {}", first.row_number),
    };
    let code = format!(
        "TRX-{}",
        external_ref
            .clone()
            .unwrap_or_else(|| format!("L{}", first.row_number))
    );

    let transaction = Transaction::new_for_insert(
        code,
        description,
        TransactionHeader {
            company_ref: company_ref.to_string(),
            channel,
            external_ref,
            order_id,
            account_label: store_name,
            shipment_type,
        },
        TransactionKind::Sale,
        EntryDirection::Credit,
        TransactionAmounts {
            gross_amount,
            net_amount: None,
            fees,
        },
        TransactionState {
            status: ReconciliationStatus::Imported,
            transaction_date: date,
            settlement_date: None,
            category_ref: None,
            cost_center_ref: None,
        },
        items,
        TransactionSourceMeta {
            raw_payload_ref: Some(file_name.to_string()),
            imported_at: Utc::now(),
        },
    );

    Some(GroupedCandidate {
        transaction,
        row_count,
    })
}

/// Resolve os itens contra o cache de mapeamentos e registra mapeamentos
/// pendentes para os SKUs desconhecidos
async fn resolve_items(
    transaction: &mut Transaction,
    cache: &mut SkuMappingCache,
) -> Result<()> {
    for item in transaction.items.iter_mut() {
        let Some(sku) = item.channel_sku.clone() else {
            continue;
        };

        match cache.get(&sku).await? {
            Some(mapping) if mapping.product_ref.is_some() => {
                item.product_ref = mapping.product_ref.clone();
                item.sku_ref = mapping.sku_ref.clone();
            }
            Some(_) => {
                // mapeamento pendente já na fila
            }
            None => {
                let label = if item.description.is_empty() {
                    sku.clone()
                } else {
                    item.description.clone()
                };
                let mapping = crate::domain::a005_sku_mapping::service::ensure_pending(
                    cache.company_ref(),
                    cache.channel(),
                    &sku,
                    &label,
                )
                .await?;
                cache.put(sku, CachedMapping::from(&mapping));
            }
        }
    }
    Ok(())
}

/// Laço principal da importação. Linhas são processadas na ordem do
/// arquivo; erro de linha conta e segue; o job é atualizado a cada
/// transação para permitir o acompanhamento em tempo real; cancelamento é
/// cooperativo, observado entre transações.
pub async fn run_import(
    job_id: uuid::Uuid,
    request: &ImportRequest,
    channel: SalesChannel,
    sheet: SheetData,
) -> Result<ImportSummary> {
    let map = resolve_columns(&sheet.headers);
    let parser = ChannelParser::for_channel(channel);

    let mut counters = JobCounters {
        total: sheet.rows.len() as i32,
        ..JobCounters::default()
    };
    let mut error_list: Vec<RowError> = Vec::new();
    let mut candidates: Vec<CandidateRow> = Vec::new();

    // fase 1: parse linha a linha - erros contam, nunca abortam
    for (i, row) in sheet.rows.iter().enumerate() {
        let row_number = (i + 2) as u32; // 1-based + cabeçalho
        match parser.parse_row(row, &map, row_number) {
            Ok(candidate) if candidate.date.is_some() => candidates.push(candidate),
            Ok(candidate) => {
                counters.errors += 1;
                if error_list.len() < ERROR_SAMPLE_LIMIT {
                    error_list.push(RowError {
                        row: candidate.row_number,
                        message: "linha sem data".into(),
                    });
                }
            }
            Err(message) => {
                counters.errors += 1;
                if error_list.len() < ERROR_SAMPLE_LIMIT {
                    error_list.push(RowError {
                        row: row_number,
                        message,
                    });
                }
            }
        }
        counters.processed += 1;
    }

    // fase 2: agrupa e grava pelo gate da chave natural
    let grouped = group_candidates(&request.company_id, channel, &request.file_name, candidates);
    let mut cache = SkuMappingCache::new(request.company_id.clone(), channel);

    for mut candidate in grouped {
        if crate::domain::a007_import_job::service::is_cancelled(job_id).await? {
            tracing::warn!("Import job {} cancelled, stopping", job_id);
            return Ok(summary(job_id, &counters, error_list));
        }

        let row_count = candidate.row_count;
        if let Err(e) = resolve_items(&mut candidate.transaction, &mut cache).await {
            tracing::warn!("Failed to resolve items: {}", e);
        }

        match crate::domain::a004_transaction::service::upsert_by_natural_key(
            candidate.transaction,
        )
        .await
        {
            Ok(UpsertOutcome::Created(_)) => counters.imported += row_count,
            Ok(UpsertOutcome::Merged(_)) => counters.duplicates += row_count,
            Err(e) => {
                counters.errors += row_count;
                if error_list.len() < ERROR_SAMPLE_LIMIT {
                    error_list.push(RowError {
                        row: 0,
                        message: e.to_string(),
                    });
                }
            }
        }

        crate::domain::a007_import_job::service::update_counters(job_id, &counters).await?;
    }

    crate::domain::a007_import_job::service::finish(job_id, JobStatus::Done, &counters, None)
        .await?;

    tracing::info!(
        "Import job {} finished: {} imported, {} duplicates, {} errors",
        job_id,
        counters.imported,
        counters.duplicates,
        counters.errors
    );

    Ok(summary(job_id, &counters, error_list))
}

fn summary(job_id: uuid::Uuid, counters: &JobCounters, error_list: Vec<RowError>) -> ImportSummary {
    ImportSummary {
        job_id: job_id.to_string(),
        total: counters.total,
        imported: counters.imported,
        duplicates: counters.duplicates,
        errors: counters.errors,
        error_list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate(
        row: u32,
        external_ref: Option<&str>,
        sku: Option<&str>,
        commission: Option<f64>,
        shipping: Option<f64>,
    ) -> CandidateRow {
        CandidateRow {
            row_number: row,
            external_ref: external_ref.map(str::to_string),
            order_id: external_ref.map(str::to_string),
            date: NaiveDate::from_ymd_opt(2024, 3, 15),
            sku: sku.map(str::to_string),
            description: Some("Item".into()),
            quantity: Some(1.0),
            unit_price: Some(50.0),
            total_price: Some(50.0),
            commission,
            shipping_cost: shipping,
            ..CandidateRow::default()
        }
    }

    #[test]
    fn test_group_by_order_produces_one_transaction_with_items() {
        let rows = vec![
            candidate(2, Some("PED-1"), Some("SKU-A"), Some(10.0), None),
            candidate(3, Some("PED-1"), Some("SKU-B"), None, Some(15.0)),
            candidate(4, Some("PED-2"), Some("SKU-A"), None, None),
        ];
        let grouped = group_candidates("c1", SalesChannel::MercadoLivre, "vendas.csv", rows);
        assert_eq!(grouped.len(), 2);

        let first = &grouped[0];
        assert_eq!(first.row_count, 2);
        assert_eq!(first.transaction.items.len(), 2);
        assert_eq!(first.transaction.amounts.gross_amount, 100.0);
        // tarifas consolidadas das duas linhas do pedido
        assert_eq!(first.transaction.amounts.fees.commission, Some(10.0));
        assert_eq!(first.transaction.amounts.fees.shipping_cost, Some(15.0));
        assert_eq!(
            first.transaction.header.external_ref.as_deref(),
            Some("PED-1")
        );
    }

    #[test]
    fn test_rows_without_reference_become_individual_transactions() {
        let rows = vec![
            candidate(2, None, Some("SKU-A"), None, None),
            candidate(3, None, Some("SKU-B"), None, None),
        ];
        let grouped = group_candidates("c1", SalesChannel::Outro, "vendas.csv", rows);
        assert_eq!(grouped.len(), 2);
        assert!(grouped[0].transaction.header.external_ref.is_none());
    }

    #[test]
    fn test_rows_without_sku_fall_back_to_transaction_level() {
        let rows = vec![candidate(2, Some("PED-9"), None, None, None)];
        let grouped = group_candidates("c1", SalesChannel::Shopee, "vendas.csv", rows);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].transaction.items.is_empty());
        assert_eq!(grouped[0].transaction.amounts.gross_amount, 50.0);
    }

    #[test]
    fn test_source_rows_are_preserved_for_traceability() {
        let rows = vec![candidate(7, Some("PED-1"), Some("SKU-A"), None, None)];
        let grouped = group_candidates("c1", SalesChannel::MercadoLivre, "vendas.csv", rows);
        assert_eq!(grouped[0].transaction.items[0].source_row, Some(7));
    }
}
