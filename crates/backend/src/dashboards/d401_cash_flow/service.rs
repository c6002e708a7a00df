use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d401_cash_flow::{CashFlowDay, CashFlowRequest, CashFlowResponse};
use contracts::domain::common::Regime;
use std::collections::BTreeMap;

/// Linha de entrada da série: (data, é entrada?, valor)
pub type CashFlowInput = (NaiveDate, bool, f64);

/// Fluxo de caixa do intervalo - consome exclusivamente movimentos com
/// regime caixa; competência nunca aparece aqui.
pub async fn get_cash_flow(request: CashFlowRequest) -> Result<CashFlowResponse> {
    let movements = crate::projections::p900_financial_movements::repository::list_by_period(
        &request.company_id,
        request.date_from,
        request.date_to,
        Some(Regime::Cash),
    )
    .await?;

    let inputs: Vec<CashFlowInput> = movements
        .iter()
        .filter_map(|m| {
            let date: NaiveDate = m.movement_date.parse().ok()?;
            Some((date, m.direction == "credit", m.amount))
        })
        .collect();

    Ok(build_cash_flow(&inputs))
}

/// Agregação pura: série diária com saldo acumulado
pub fn build_cash_flow(inputs: &[CashFlowInput]) -> CashFlowResponse {
    let mut by_day: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for (date, is_inflow, amount) in inputs {
        let entry = by_day.entry(*date).or_insert((0.0, 0.0));
        if *is_inflow {
            entry.0 += amount;
        } else {
            entry.1 += amount;
        }
    }

    let mut days = Vec::new();
    let mut balance = 0.0;
    let mut total_in = 0.0;
    let mut total_out = 0.0;
    for (date, (inflow, outflow)) in by_day {
        balance += inflow - outflow;
        total_in += inflow;
        total_out += outflow;
        days.push(CashFlowDay {
            date,
            inflow,
            outflow,
            balance,
        });
    }

    CashFlowResponse {
        days,
        total_in,
        total_out,
        net: total_in - total_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_running_balance() {
        let inputs = vec![
            (d(1), true, 1000.0),
            (d(1), false, 200.0),
            (d(3), false, 300.0),
            (d(5), true, 500.0),
        ];
        let flow = build_cash_flow(&inputs);
        assert_eq!(flow.days.len(), 3);
        assert_eq!(flow.days[0].balance, 800.0);
        assert_eq!(flow.days[1].balance, 500.0);
        assert_eq!(flow.days[2].balance, 1000.0);
        assert_eq!(flow.total_in, 1500.0);
        assert_eq!(flow.total_out, 500.0);
        assert_eq!(flow.net, 1000.0);
    }

    #[test]
    fn test_empty_interval() {
        let flow = build_cash_flow(&[]);
        assert!(flow.days.is_empty());
        assert_eq!(flow.net, 0.0);
    }
}
