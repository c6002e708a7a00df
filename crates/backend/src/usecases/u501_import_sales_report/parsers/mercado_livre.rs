use super::{generic, CandidateRow};
use crate::shared::ingest::headers::ColumnMap;

/// Parser do relatório de vendas do Mercado Livre. O "N.º de venda" é a
/// chave do pedido; a operação de repasse vem em relatório separado com a
/// coluna de id da operação.
pub fn parse_row(
    row: &[String],
    map: &ColumnMap,
    row_number: u32,
) -> Result<CandidateRow, String> {
    let mut candidate = generic::parse_row(row, map, row_number)?;

    // o relatório exporta o número da venda com prefixo '#'
    if let Some(order_id) = candidate.order_id.take() {
        candidate.order_id = Some(order_id.trim_start_matches('#').to_string());
    }

    // no ML a referência externa é o número da venda quando o relatório
    // não traz o id da operação
    candidate.external_ref = candidate
        .external_ref
        .take()
        .map(|r| r.trim_start_matches('#').to_string())
        .or_else(|| candidate.order_id.clone());

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ingest::headers::resolve_columns;

    #[test]
    fn test_order_id_becomes_external_ref() {
        let headers: Vec<String> = ["Data da venda", "N.º de venda", "SKU", "Tarifa de venda"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = resolve_columns(&headers);
        let row = vec![
            "15/03/2024".to_string(),
            "2000001".to_string(),
            "ABC".to_string(),
            "-12,50".to_string(),
        ];
        let candidate = parse_row(&row, &map, 2).unwrap();
        assert_eq!(candidate.external_ref.as_deref(), Some("2000001"));
        assert_eq!(candidate.order_id.as_deref(), Some("2000001"));
        assert_eq!(candidate.commission, Some(12.50));
    }
}
