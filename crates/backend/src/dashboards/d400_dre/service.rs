use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d400_dre::{DreCategoryDetail, DreLine, DreRequest, DreResponse};
use contracts::domain::a003_category::aggregate::CategoryType;
use contracts::domain::common::Regime;
use std::collections::HashMap;

/// Linha de entrada da agregação: (tipo, nome da categoria, valor)
pub type DreInput = (CategoryType, String, f64);

/// DRE do período: movimentos de competência agrupados por tipo de
/// categoria, com o CMV vindo do registro de custeio.
pub async fn get_dre(request: DreRequest) -> Result<DreResponse> {
    let date_from = NaiveDate::from_ymd_opt(request.year, request.month, 1)
        .ok_or_else(|| anyhow::anyhow!("Período inválido: {}/{}", request.month, request.year))?;
    let date_to = last_day_of_month(request.year, request.month)?;

    let movements = crate::projections::p900_financial_movements::repository::list_by_period(
        &request.company_id,
        date_from,
        date_to,
        Some(Regime::Accrual),
    )
    .await?;

    let categories = crate::domain::a003_category::service::index_by_id(&request.company_id).await?;

    let inputs: Vec<DreInput> = movements
        .iter()
        .map(|m| {
            let (category_type, name) = match m.category_ref.as_deref().and_then(|r| categories.get(r)) {
                Some(category) => (category.category_type, category.base.description.clone()),
                // sem categoria: crédito entra como receita, débito como
                // despesa operacional
                None => {
                    let fallback = if m.direction == "credit" {
                        CategoryType::Revenue
                    } else {
                        CategoryType::OperatingExpenses
                    };
                    (fallback, "Sem categoria".to_string())
                }
            };
            (category_type, name, m.amount.abs())
        })
        .collect();

    let cmv_total = crate::projections::p901_cmv_records::repository::total_cost_in_period(
        &request.company_id,
        date_from,
        date_to,
    )
    .await?;

    let period = format!("{:04}-{:02}", request.year, request.month);
    Ok(build_dre(period, &inputs, cmv_total))
}

/// Agregação pura da DRE:
///   receita líquida = receita bruta − deduções
///   lucro bruto     = receita líquida − CMV
///   resultado       = lucro bruto − soma das despesas
pub fn build_dre(period: String, inputs: &[DreInput], cmv_from_records: f64) -> DreResponse {
    let mut by_type: HashMap<CategoryType, HashMap<String, f64>> = HashMap::new();
    for (category_type, name, amount) in inputs {
        *by_type
            .entry(*category_type)
            .or_default()
            .entry(name.clone())
            .or_insert(0.0) += amount;
    }

    // o CMV dos registros de custeio entra na linha Cogs junto com
    // movimentos eventualmente categorizados como CMV
    if cmv_from_records > 0.0 {
        *by_type
            .entry(CategoryType::Cogs)
            .or_default()
            .entry("CMV apurado".to_string())
            .or_insert(0.0) += cmv_from_records;
    }

    let line_order = [
        CategoryType::Revenue,
        CategoryType::Deductions,
        CategoryType::Cogs,
        CategoryType::OperatingExpenses,
        CategoryType::Payroll,
        CategoryType::Administrative,
        CategoryType::Marketing,
        CategoryType::FinancialExpenses,
        CategoryType::Taxes,
    ];

    let mut lines = Vec::new();
    let mut totals: HashMap<CategoryType, f64> = HashMap::new();
    for category_type in line_order {
        let categories_map = by_type.remove(&category_type).unwrap_or_default();
        let mut categories: Vec<DreCategoryDetail> = categories_map
            .into_iter()
            .map(|(name, amount)| DreCategoryDetail { name, amount })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        let total: f64 = categories.iter().map(|c| c.amount).sum();
        totals.insert(category_type, total);
        lines.push(DreLine {
            category_type: category_type.as_str().to_string(),
            display_name: category_type.display_name().to_string(),
            total,
            categories,
        });
    }

    let gross_revenue = totals[&CategoryType::Revenue];
    let deductions = totals[&CategoryType::Deductions];
    let net_revenue = gross_revenue - deductions;
    let cogs = totals[&CategoryType::Cogs];
    let gross_profit = net_revenue - cogs;
    let total_expenses: f64 = CategoryType::expense_types()
        .iter()
        .map(|t| totals[t])
        .sum();
    let net_income = gross_profit - total_expenses;

    DreResponse {
        period,
        lines,
        gross_revenue,
        deductions,
        net_revenue,
        cogs,
        gross_profit,
        total_expenses,
        net_income,
    }
}

fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| anyhow::anyhow!("Período inválido: {}/{}", month, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dre_computes_derived_lines() {
        let inputs = vec![
            (CategoryType::Revenue, "Vendas ML".to_string(), 10000.0),
            (CategoryType::Revenue, "Vendas Shopee".to_string(), 5000.0),
            (CategoryType::Deductions, "Devoluções".to_string(), 1000.0),
            (CategoryType::Marketing, "Ads".to_string(), 800.0),
            (CategoryType::Taxes, "Simples".to_string(), 1200.0),
        ];
        let dre = build_dre("2024-03".into(), &inputs, 4000.0);

        assert_eq!(dre.gross_revenue, 15000.0);
        assert_eq!(dre.deductions, 1000.0);
        assert_eq!(dre.net_revenue, 14000.0);
        assert_eq!(dre.cogs, 4000.0);
        assert_eq!(dre.gross_profit, 10000.0);
        assert_eq!(dre.total_expenses, 2000.0);
        assert_eq!(dre.net_income, 8000.0);

        // toda linha expõe o detalhamento por categoria
        let revenue_line = &dre.lines[0];
        assert_eq!(revenue_line.categories.len(), 2);
        assert_eq!(revenue_line.total, 15000.0);
    }

    #[test]
    fn test_build_dre_empty_period() {
        let dre = build_dre("2024-01".into(), &[], 0.0);
        assert_eq!(dre.gross_revenue, 0.0);
        assert_eq!(dre.net_income, 0.0);
        assert_eq!(dre.lines.len(), 9);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(
            last_day_of_month(2024, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            last_day_of_month(2024, 12).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }
}
