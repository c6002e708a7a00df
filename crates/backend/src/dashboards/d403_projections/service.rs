use anyhow::Result;
use chrono::{Months, NaiveDate};
use contracts::dashboards::d403_projections::{
    ProjectedMonth, ProjectionScenario, ProjectionsRequest, ProjectionsResponse,
};
use contracts::domain::common::Regime;

/// Cenários nomeados: (nome, fator de receita, fator de custo)
const SCENARIOS: &[(&str, f64, f64)] = &[
    ("otimista", 1.20, 0.90),
    ("realista", 1.05, 1.00),
    ("pessimista", 0.85, 1.05),
];

/// Fator de crescimento composto por mês projetado, aplicado uniformemente
/// à receita dos três cenários
fn growth_factor(month_index: u32) -> f64 {
    1.0 + 0.02 * month_index as f64
}

/// Projeções de fluxo a partir do histórico de 6 meses em regime de
/// competência
pub async fn get_projections(
    request: ProjectionsRequest,
    today: NaiveDate,
) -> Result<ProjectionsResponse> {
    let date_from = today
        .checked_sub_months(Months::new(6))
        .ok_or_else(|| anyhow::anyhow!("Data base inválida"))?;

    let movements = crate::projections::p900_financial_movements::repository::list_by_period(
        &request.company_id,
        date_from,
        today,
        Some(Regime::Accrual),
    )
    .await?;

    let inflow: f64 = movements
        .iter()
        .filter(|m| m.direction == "credit")
        .map(|m| m.amount)
        .sum();
    let outflow: f64 = movements
        .iter()
        .filter(|m| m.direction == "debit")
        .map(|m| m.amount)
        .sum();

    let base_revenue = inflow / 6.0;
    let base_cost = outflow / 6.0;

    Ok(build_scenarios(base_revenue, base_cost, request.months))
}

/// Projeção pura dos três cenários
pub fn build_scenarios(base_revenue: f64, base_cost: f64, months: u32) -> ProjectionsResponse {
    let scenarios = SCENARIOS
        .iter()
        .map(|(name, revenue_factor, cost_factor)| {
            let months: Vec<ProjectedMonth> = (1..=months)
                .map(|month_index| {
                    let revenue =
                        base_revenue * revenue_factor * growth_factor(month_index);
                    let cost = base_cost * cost_factor;
                    ProjectedMonth {
                        month_index,
                        revenue,
                        cost,
                        net: revenue - cost,
                    }
                })
                .collect();
            ProjectionScenario {
                name: name.to_string(),
                revenue_factor: *revenue_factor,
                cost_factor: *cost_factor,
                months,
            }
        })
        .collect();

    ProjectionsResponse {
        base_revenue,
        base_cost,
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_factors() {
        let response = build_scenarios(1000.0, 600.0, 3);
        assert_eq!(response.scenarios.len(), 3);

        let optimistic = &response.scenarios[0];
        assert_eq!(optimistic.name, "otimista");
        // mês 1: 1000 × 1.20 × (1 + 0.02×1)
        assert!((optimistic.months[0].revenue - 1224.0).abs() < 1e-9);
        assert!((optimistic.months[0].cost - 540.0).abs() < 1e-9);

        let realistic = &response.scenarios[1];
        // mês 2: 1000 × 1.05 × 1.04
        assert!((realistic.months[1].revenue - 1092.0).abs() < 1e-9);
        assert!((realistic.months[1].cost - 600.0).abs() < 1e-9);

        let pessimistic = &response.scenarios[2];
        // mês 3: 1000 × 0.85 × 1.06; custo 600 × 1.05
        assert!((pessimistic.months[2].revenue - 901.0).abs() < 1e-9);
        assert!((pessimistic.months[2].cost - 630.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_compounds_per_month_index() {
        let response = build_scenarios(1000.0, 0.0, 2);
        let realistic = &response.scenarios[1];
        let month1 = realistic.months[0].revenue;
        let month2 = realistic.months[1].revenue;
        // crescimento uniforme de 2% por índice de mês
        assert!(month2 > month1);
        assert!((month2 / month1 - 1.04 / 1.02).abs() < 1e-9);
    }
}
