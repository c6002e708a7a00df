use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d402_aging::{
    AgingBucket, AgingBucketSummary, AgingResponse, DelinquencySeverity,
};
use contracts::domain::a008_payable::aggregate::SettlementStatus;
use std::collections::HashMap;

/// Título em aberto para o aging: (dias de atraso com sinal, valor)
pub type AgingInput = (i64, f64);

/// Aging de contas a receber
pub async fn get_receivables_aging(company_id: &str, today: NaiveDate) -> Result<AgingResponse> {
    let all =
        crate::domain::a009_receivable::service::list_by_company(company_id, None).await?;

    let open: Vec<AgingInput> = all
        .iter()
        .filter(|r| r.status == SettlementStatus::Open)
        .map(|r| ((today - r.due_date).num_days(), r.amount))
        .collect();
    let total_non_cancelled: f64 = all
        .iter()
        .filter(|r| r.status != SettlementStatus::Cancelled)
        .map(|r| r.amount)
        .sum();

    Ok(build_aging(&open, total_non_cancelled))
}

/// Aging de contas a pagar
pub async fn get_payables_aging(company_id: &str, today: NaiveDate) -> Result<AgingResponse> {
    let all = crate::domain::a008_payable::service::list_by_company(company_id, None).await?;

    let open: Vec<AgingInput> = all
        .iter()
        .filter(|p| p.status == SettlementStatus::Open)
        .map(|p| ((today - p.due_date).num_days(), p.amount))
        .collect();
    let total_non_cancelled: f64 = all
        .iter()
        .filter(|p| p.status != SettlementStatus::Cancelled)
        .map(|p| p.amount)
        .sum();

    Ok(build_aging(&open, total_non_cancelled))
}

/// Agregação pura do aging: faixas {a vencer, 1-30, 31-60, 61-90, 90+} e
/// inadimplência = vencidos em aberto / total não cancelado, com sinal
/// alto acima de 20% e crítico acima de 30%.
pub fn build_aging(open_items: &[AgingInput], total_non_cancelled: f64) -> AgingResponse {
    let mut by_bucket: HashMap<AgingBucket, (i32, f64)> = HashMap::new();
    let mut overdue_total = 0.0;

    for (days, amount) in open_items {
        let bucket = AgingBucket::for_days_overdue(*days);
        let entry = by_bucket.entry(bucket).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += amount;
        if *days > 0 {
            overdue_total += amount;
        }
    }

    let buckets = AgingBucket::all()
        .iter()
        .map(|bucket| {
            let (count, amount) = by_bucket.get(bucket).copied().unwrap_or((0, 0.0));
            AgingBucketSummary {
                bucket: *bucket,
                label: bucket.label().to_string(),
                count,
                amount,
            }
        })
        .collect();

    let delinquency_ratio = if total_non_cancelled > 0.0 {
        overdue_total / total_non_cancelled
    } else {
        0.0
    };

    AgingResponse {
        buckets,
        delinquency_ratio,
        severity: DelinquencySeverity::for_ratio(delinquency_ratio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_aggregation() {
        // vencido há 30 dias → 1-30; há 31 → 31-60
        let items = vec![(-5, 100.0), (30, 200.0), (31, 300.0), (95, 400.0)];
        let aging = build_aging(&items, 2000.0);

        assert_eq!(aging.buckets[0].amount, 100.0); // a vencer
        assert_eq!(aging.buckets[1].amount, 200.0); // 1-30
        assert_eq!(aging.buckets[2].amount, 300.0); // 31-60
        assert_eq!(aging.buckets[3].amount, 0.0); // 61-90
        assert_eq!(aging.buckets[4].amount, 400.0); // 90+

        // vencidos = 900 / 2000 = 45% → crítico
        assert!((aging.delinquency_ratio - 0.45).abs() < 1e-9);
        assert_eq!(aging.severity, DelinquencySeverity::Critical);
    }

    #[test]
    fn test_severity_bands() {
        // 20% não dispara o sinal alto
        let aging = build_aging(&[(10, 200.0)], 1000.0);
        assert_eq!(aging.severity, DelinquencySeverity::Normal);

        // 25% → alto
        let aging = build_aging(&[(10, 250.0)], 1000.0);
        assert_eq!(aging.severity, DelinquencySeverity::High);
    }

    #[test]
    fn test_empty_portfolio() {
        let aging = build_aging(&[], 0.0);
        assert_eq!(aging.delinquency_ratio, 0.0);
        assert_eq!(aging.severity, DelinquencySeverity::Normal);
        assert_eq!(aging.buckets.len(), 5);
    }
}
