use super::CandidateRow;
use crate::shared::format::{parse_brl, parse_date_flexible};
use crate::shared::ingest::headers::{cell, ColumnMap, LogicalField};

/// Parser genérico: lê os campos resolvidos por apelido sem particularidade
/// de canal. Base dos parsers específicos.
pub fn parse_row(
    row: &[String],
    map: &ColumnMap,
    row_number: u32,
) -> Result<CandidateRow, String> {
    if row.is_empty() {
        return Err(format!("linha {} vazia ou ilegível", row_number));
    }

    let date = cell(row, map, LogicalField::Date).and_then(parse_date_flexible);
    if date.is_none() && cell(row, map, LogicalField::Date).is_some() {
        return Err(format!(
            "linha {}: data inválida '{}'",
            row_number,
            cell(row, map, LogicalField::Date).unwrap_or_default()
        ));
    }

    Ok(CandidateRow {
        row_number,
        external_ref: cell(row, map, LogicalField::ExternalRef)
            .map(str::to_string)
            .or_else(|| cell(row, map, LogicalField::OrderId).map(str::to_string)),
        order_id: cell(row, map, LogicalField::OrderId).map(str::to_string),
        date,
        sku: cell(row, map, LogicalField::Sku).map(str::to_string),
        description: cell(row, map, LogicalField::Description).map(str::to_string),
        quantity: cell(row, map, LogicalField::Quantity).map(parse_quantity),
        unit_price: cell(row, map, LogicalField::UnitPrice).map(parse_brl),
        total_price: cell(row, map, LogicalField::TotalPrice).map(parse_brl),
        commission: cell(row, map, LogicalField::Commission).map(parse_fee),
        fixed_fee: cell(row, map, LogicalField::FixedFee).map(parse_fee),
        shipping_cost: cell(row, map, LogicalField::ShippingCost).map(parse_fee),
        ads_cost: cell(row, map, LogicalField::AdsCost).map(parse_fee),
        tax: cell(row, map, LogicalField::Tax).map(parse_fee),
        store_name: cell(row, map, LogicalField::StoreName).map(str::to_string),
        shipment_type: cell(row, map, LogicalField::ShipmentType).map(str::to_string),
    })
}

/// Quantidade mínima de 1: célula malformada ou zerada vira 1 unidade
pub fn parse_quantity(raw: &str) -> f64 {
    let parsed = parse_brl(raw);
    if parsed < 1.0 {
        1.0
    } else {
        parsed
    }
}

/// Tarifas vêm com sinal negativo em vários relatórios; o valor absoluto é
/// o que interessa
pub fn parse_fee(raw: &str) -> f64 {
    parse_brl(raw).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ingest::headers::resolve_columns;
    use chrono::NaiveDate;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_complete_row() {
        let header = headers(&[
            "Data",
            "SKU",
            "Quantidade",
            "Preço unitário",
            "Valor total",
            "Loja",
        ]);
        let map = resolve_columns(&header);
        let row = vec![
            "15/03/2024".to_string(),
            "ABC123".to_string(),
            "2".to_string(),
            "R$ 49,90".to_string(),
            "R$ 99,80".to_string(),
            "Mercado Livre SP".to_string(),
        ];
        let candidate = parse_row(&row, &map, 2).unwrap();
        assert_eq!(candidate.date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(candidate.sku.as_deref(), Some("ABC123"));
        assert_eq!(candidate.quantity, Some(2.0));
        assert_eq!(candidate.unit_price, Some(49.90));
        assert_eq!(candidate.total_price, Some(99.80));
        assert_eq!(candidate.store_name.as_deref(), Some("Mercado Livre SP"));
    }

    #[test]
    fn test_invalid_date_is_row_error() {
        let header = headers(&["Data", "SKU"]);
        let map = resolve_columns(&header);
        let row = vec!["não é data".to_string(), "ABC".to_string()];
        assert!(parse_row(&row, &map, 3).is_err());
    }

    #[test]
    fn test_quantity_is_at_least_one() {
        assert_eq!(parse_quantity("0"), 1.0);
        assert_eq!(parse_quantity("-"), 1.0);
        assert_eq!(parse_quantity("3"), 3.0);
    }

    #[test]
    fn test_fee_sign_is_discarded() {
        assert_eq!(parse_fee("-12,50"), 12.50);
    }
}
