use crate::shared::format::{format_brl, format_date_br};
use anyhow::Result;
use chrono::{Datelike, Months, NaiveDate};
use contracts::dashboards::d402_aging::AgingBucket;
use contracts::domain::a008_payable::aggregate::SettlementStatus;
use contracts::domain::a009_receivable::aggregate::Receivable;
use rust_xlsxwriter::{Format, Workbook};
use std::collections::BTreeMap;

const CURRENCY_FORMAT: &str = "R$ #,##0.00";

/// Agregado por cliente para a aba de análise
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClientSummary {
    pub open_count: i32,
    pub open_amount: f64,
    pub overdue_amount: f64,
}

/// Agrupa os títulos em aberto por cliente (ordenado pelo nome)
pub fn summarize_by_client(
    receivables: &[Receivable],
    today: NaiveDate,
) -> BTreeMap<String, ClientSummary> {
    let mut map: BTreeMap<String, ClientSummary> = BTreeMap::new();
    for receivable in receivables {
        if receivable.status != SettlementStatus::Open {
            continue;
        }
        let entry = map.entry(receivable.client_name.clone()).or_default();
        entry.open_count += 1;
        entry.open_amount += receivable.amount;
        if receivable.days_overdue(today) > 0 {
            entry.overdue_amount += receivable.amount;
        }
    }
    map
}

/// Previsão de recebimentos dos próximos 6 meses: soma dos títulos em
/// aberto com vencimento em cada mês
pub fn six_month_forecast(receivables: &[Receivable], today: NaiveDate) -> Vec<(String, f64)> {
    let first_of_month = today.with_day(1).unwrap_or(today);
    (0..6u32)
        .map(|offset| {
            let month_start = first_of_month + Months::new(offset);
            let month_end = month_start + Months::new(1);
            let total: f64 = receivables
                .iter()
                .filter(|r| {
                    r.status == SettlementStatus::Open
                        && r.due_date >= month_start
                        && r.due_date < month_end
                })
                .map(|r| r.amount)
                .sum();
            (format!("{:02}/{}", month_start.month(), month_start.year()), total)
        })
        .collect()
}

/// Gera a planilha de contas a receber com as abas de listagem completa,
/// aging, análise por cliente, previsão de 6 meses e resumo. Colunas e
/// formatos (dd/mm/aaaa, R$) seguem o layout que os usuários já consomem.
pub fn build_workbook(receivables: &[Receivable], today: NaiveDate) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let currency = Format::new().set_num_format(CURRENCY_FORMAT);

    // ── Listagem completa ───────────────────────────────────────────────
    let sheet = workbook.add_worksheet().set_name("Listagem")?;
    let columns = [
        "Cliente",
        "Descrição",
        "Valor",
        "Vencimento",
        "Recebimento",
        "Status",
        "Dias em atraso",
    ];
    for (col, title) in columns.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *title, &header)?;
    }
    for (i, receivable) in receivables.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write(row, 0, receivable.client_name.as_str())?;
        sheet.write(row, 1, receivable.base.description.as_str())?;
        sheet.write_with_format(row, 2, receivable.amount, &currency)?;
        sheet.write(row, 3, format_date_br(&receivable.due_date))?;
        sheet.write(
            row,
            4,
            receivable
                .received_date
                .map(|d| format_date_br(&d))
                .unwrap_or_default(),
        )?;
        sheet.write(row, 5, status_label(receivable.status))?;
        let overdue = if receivable.status == SettlementStatus::Open {
            receivable.days_overdue(today)
        } else {
            0
        };
        sheet.write(row, 6, overdue as f64)?;
    }

    // ── Aging ───────────────────────────────────────────────────────────
    let sheet = workbook.add_worksheet().set_name("Aging")?;
    sheet.write_with_format(0, 0, "Faixa", &header)?;
    sheet.write_with_format(0, 1, "Quantidade", &header)?;
    sheet.write_with_format(0, 2, "Valor", &header)?;
    for (i, bucket) in AgingBucket::all().iter().enumerate() {
        let in_bucket: Vec<&Receivable> = receivables
            .iter()
            .filter(|r| {
                r.status == SettlementStatus::Open
                    && AgingBucket::for_days_overdue(days_overdue_signed(r, today)) == *bucket
            })
            .collect();
        let row = (i + 1) as u32;
        sheet.write(row, 0, bucket.label())?;
        sheet.write(row, 1, in_bucket.len() as f64)?;
        let total: f64 = in_bucket.iter().map(|r| r.amount).sum();
        sheet.write_with_format(row, 2, total, &currency)?;
    }

    // ── Análise por cliente ─────────────────────────────────────────────
    let sheet = workbook.add_worksheet().set_name("Por Cliente")?;
    sheet.write_with_format(0, 0, "Cliente", &header)?;
    sheet.write_with_format(0, 1, "Títulos em aberto", &header)?;
    sheet.write_with_format(0, 2, "Valor em aberto", &header)?;
    sheet.write_with_format(0, 3, "Valor vencido", &header)?;
    for (i, (client, summary)) in summarize_by_client(receivables, today).iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write(row, 0, client.as_str())?;
        sheet.write(row, 1, summary.open_count as f64)?;
        sheet.write_with_format(row, 2, summary.open_amount, &currency)?;
        sheet.write_with_format(row, 3, summary.overdue_amount, &currency)?;
    }

    // ── Previsão 6 meses ────────────────────────────────────────────────
    let sheet = workbook.add_worksheet().set_name("Previsão 6 Meses")?;
    sheet.write_with_format(0, 0, "Mês", &header)?;
    sheet.write_with_format(0, 1, "A receber", &header)?;
    for (i, (month, total)) in six_month_forecast(receivables, today).iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write(row, 0, month.as_str())?;
        sheet.write_with_format(row, 1, *total, &currency)?;
    }

    // ── Resumo ──────────────────────────────────────────────────────────
    let open: Vec<&Receivable> = receivables
        .iter()
        .filter(|r| r.status == SettlementStatus::Open)
        .collect();
    let total_open: f64 = open.iter().map(|r| r.amount).sum();
    let total_overdue: f64 = open
        .iter()
        .filter(|r| r.days_overdue(today) > 0)
        .map(|r| r.amount)
        .sum();
    let total_settled: f64 = receivables
        .iter()
        .filter(|r| r.status == SettlementStatus::Settled)
        .map(|r| r.amount)
        .sum();

    let sheet = workbook.add_worksheet().set_name("Resumo")?;
    sheet.write_with_format(0, 0, "Indicador", &header)?;
    sheet.write_with_format(0, 1, "Valor", &header)?;
    sheet.write(1, 0, "Total em aberto")?;
    sheet.write(1, 1, format_brl(total_open))?;
    sheet.write(2, 0, "Total vencido")?;
    sheet.write(2, 1, format_brl(total_overdue))?;
    sheet.write(3, 0, "Total recebido")?;
    sheet.write(3, 1, format_brl(total_settled))?;
    sheet.write(4, 0, "Data de geração")?;
    sheet.write(4, 1, format_date_br(&today))?;

    Ok(workbook.save_to_buffer()?)
}

fn status_label(status: SettlementStatus) -> &'static str {
    match status {
        SettlementStatus::Open => "Em aberto",
        SettlementStatus::Settled => "Recebido",
        SettlementStatus::Cancelled => "Cancelado",
    }
}

/// days_overdue com sinal (negativo = a vencer), que é o que o bucket
/// espera
fn days_overdue_signed(receivable: &Receivable, today: NaiveDate) -> i64 {
    (today - receivable.due_date).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receivable(client: &str, amount: f64, due: NaiveDate) -> Receivable {
        Receivable::new_for_insert(
            "REC-1".into(),
            format!("Título {}", client),
            "c1".into(),
            client.into(),
            amount,
            due,
            None,
            None,
        )
    }

    #[test]
    fn test_summarize_by_client() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let receivables = vec![
            receivable("Acme", 100.0, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
            receivable("Acme", 50.0, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()),
            receivable("Beta", 70.0, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()),
        ];
        let summary = summarize_by_client(&receivables, today);
        let acme = &summary["Acme"];
        assert_eq!(acme.open_count, 2);
        assert_eq!(acme.open_amount, 150.0);
        assert_eq!(acme.overdue_amount, 100.0);
        assert_eq!(summary["Beta"].overdue_amount, 0.0);
    }

    #[test]
    fn test_six_month_forecast_buckets_by_due_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let receivables = vec![
            receivable("Acme", 100.0, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()),
            receivable("Acme", 200.0, NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()),
            receivable("Beta", 300.0, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()),
        ];
        let forecast = six_month_forecast(&receivables, today);
        assert_eq!(forecast.len(), 6);
        assert_eq!(forecast[0], ("03/2024".to_string(), 100.0));
        assert_eq!(forecast[1], ("04/2024".to_string(), 200.0));
        // outubro fica fora da janela de 6 meses (mar–ago)
        assert_eq!(forecast[5].1, 0.0);
    }

    #[test]
    fn test_build_workbook_produces_xlsx_bytes() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let receivables = vec![receivable(
            "Acme",
            100.0,
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        )];
        let bytes = build_workbook(&receivables, today).unwrap();
        // container xlsx é um zip: assinatura PK
        assert_eq!(&bytes[..2], b"PK");
    }
}
