use super::{generic, CandidateRow};

/// Parser do relatório de pedidos da Shopee. O pedido é a única chave que
/// o relatório traz; comissão e frete chegam em colunas próprias já
/// cobertas pelos apelidos.
pub fn parse_row(
    row: &[String],
    map: &crate::shared::ingest::headers::ColumnMap,
    row_number: u32,
) -> Result<CandidateRow, String> {
    let mut candidate = generic::parse_row(row, map, row_number)?;

    // a Shopee não tem id de operação separado: o pedido é a referência
    candidate.external_ref = candidate.order_id.clone().or(candidate.external_ref.take());

    Ok(candidate)
}
