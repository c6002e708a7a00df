use super::headers::{cell, ColumnMap, LogicalField};
use super::table::SheetData;
use crate::shared::format::{format_date_br, is_plausible_period_date, parse_date_flexible};
use chrono::Datelike;
use contracts::usecases::u501_import_sales_report::request::ExpectedPeriod;
use contracts::usecases::u501_import_sales_report::response::{
    OverlapCheck, OverlapLevel, PeriodCheck,
};
use std::collections::HashMap;

/// Máximo de linhas amostradas pelas checagens de período e sobreposição
pub const SAMPLE_LIMIT: usize = 100;

/// Checagem de compatibilidade de período usada pelo checklist de
/// fechamento: amostra até 100 linhas, extrai (mês, ano) da coluna de data
/// e compara o par dominante com o período esperado. Datas implausíveis
/// (ano fora de 2000–2100) são descartadas da amostra sem abortar nada.
/// O resultado é um aviso não bloqueante - a importação prossegue.
pub fn check_period(
    sheet: &SheetData,
    map: &ColumnMap,
    expected: Option<ExpectedPeriod>,
) -> PeriodCheck {
    let mut frequency: HashMap<(u32, i32), usize> = HashMap::new();
    let mut min_date = None;
    let mut max_date = None;

    for row in sheet.rows.iter().take(SAMPLE_LIMIT) {
        let Some(raw) = cell(row, map, LogicalField::Date) else {
            continue;
        };
        let Some(date) = parse_date_flexible(raw) else {
            continue;
        };
        if !is_plausible_period_date(&date) {
            continue;
        }

        *frequency.entry((date.month(), date.year())).or_insert(0) += 1;

        min_date = Some(match min_date {
            None => date,
            Some(current) if date < current => date,
            Some(current) => current,
        });
        max_date = Some(match max_date {
            None => date,
            Some(current) if date > current => date,
            Some(current) => current,
        });
    }

    let dominant = frequency
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|((mes, ano), _)| ExpectedPeriod { mes, ano });

    let valido = match (dominant, expected) {
        (Some(detected), Some(expected)) => detected == expected,
        // sem período esperado ou sem datas detectáveis não há o que acusar
        _ => true,
    };

    PeriodCheck {
        valido,
        periodo_detectado: dominant,
        periodo_esperado: expected,
        data_minima: min_date.map(|d| format_date_br(&d)),
        data_maxima: max_date.map(|d| format_date_br(&d)),
    }
}

/// Extrai as referências externas de até 100 linhas para a checagem de
/// sobreposição. Cai para o número do pedido quando o relatório não traz a
/// referência da operação.
pub fn sample_external_refs(sheet: &SheetData, map: &ColumnMap) -> Vec<String> {
    sheet
        .rows
        .iter()
        .take(SAMPLE_LIMIT)
        .filter_map(|row| {
            cell(row, map, LogicalField::ExternalRef)
                .or_else(|| cell(row, map, LogicalField::OrderId))
                .map(|s| s.to_string())
        })
        .collect()
}

/// Monta o resultado da checagem de sobreposição a partir da contagem de
/// referências já persistidas para a mesma empresa+canal
pub fn build_overlap_check(sampled: usize, existing: usize) -> OverlapCheck {
    let percentual = if sampled == 0 {
        0.0
    } else {
        existing as f64 / sampled as f64 * 100.0
    };
    let nivel = OverlapLevel::for_percentage(percentual);
    let mensagem = match nivel {
        OverlapLevel::Error => format!(
            "{:.0}% das linhas amostradas já existem - este arquivo provavelmente já foi importado",
            percentual
        ),
        OverlapLevel::Warning => format!(
            "{:.0}% das linhas amostradas já existem - confira se o arquivo não se sobrepõe a uma importação anterior",
            percentual
        ),
        OverlapLevel::Info => format!(
            "{:.0}% das linhas amostradas já existem",
            percentual
        ),
    };

    OverlapCheck {
        total_amostrado: sampled as i32,
        ja_existentes: existing as i32,
        percentual,
        nivel,
        mensagem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ingest::headers::resolve_columns;

    fn sheet_with_dates(dates: &[&str]) -> (SheetData, ColumnMap) {
        let headers = vec!["Data".to_string(), "SKU".to_string()];
        let rows = dates
            .iter()
            .map(|d| vec![d.to_string(), "ABC".to_string()])
            .collect();
        let sheet = SheetData {
            headers: headers.clone(),
            rows,
        };
        let map = resolve_columns(&headers);
        (sheet, map)
    }

    #[test]
    fn test_dominant_period_detected() {
        let (sheet, map) =
            sheet_with_dates(&["15/03/2024", "16/03/2024", "17/03/2024", "01/04/2024"]);
        let check = check_period(&sheet, &map, None);
        assert_eq!(
            check.periodo_detectado,
            Some(ExpectedPeriod { mes: 3, ano: 2024 })
        );
        assert_eq!(check.data_minima.as_deref(), Some("15/03/2024"));
        assert_eq!(check.data_maxima.as_deref(), Some("01/04/2024"));
        assert!(check.valido);
    }

    #[test]
    fn test_mismatch_is_invalid_but_not_blocking() {
        let (sheet, map) = sheet_with_dates(&["15/03/2024", "16/03/2024"]);
        let expected = ExpectedPeriod { mes: 4, ano: 2024 };
        let check = check_period(&sheet, &map, Some(expected));
        assert!(!check.valido);
        assert_eq!(
            check.periodo_detectado,
            Some(ExpectedPeriod { mes: 3, ano: 2024 })
        );
        assert_eq!(check.periodo_esperado, Some(expected));
    }

    #[test]
    fn test_implausible_dates_are_discarded() {
        let (sheet, map) = sheet_with_dates(&["15/03/1980", "15/03/2024", "16/03/2024"]);
        let check = check_period(&sheet, &map, None);
        assert_eq!(
            check.periodo_detectado,
            Some(ExpectedPeriod { mes: 3, ano: 2024 })
        );
        assert_eq!(check.data_minima.as_deref(), Some("15/03/2024"));
    }

    #[test]
    fn test_matching_period_is_valid() {
        let (sheet, map) = sheet_with_dates(&["15/03/2024", "20/03/2024"]);
        let check = check_period(&sheet, &map, Some(ExpectedPeriod { mes: 3, ano: 2024 }));
        assert!(check.valido);
    }

    #[test]
    fn test_overlap_bands() {
        assert_eq!(build_overlap_check(100, 96).nivel, OverlapLevel::Error);
        assert_eq!(build_overlap_check(100, 80).nivel, OverlapLevel::Warning);
        assert_eq!(build_overlap_check(100, 55).nivel, OverlapLevel::Warning);
        assert_eq!(build_overlap_check(100, 10).nivel, OverlapLevel::Info);
        assert_eq!(build_overlap_check(0, 0).nivel, OverlapLevel::Info);
    }
}
