use std::collections::HashMap;

/// Campos lógicos que os relatórios de canal podem trazer, com layouts e
/// nomes de coluna variados por canal e por versão de relatório
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    Date,
    Sku,
    Quantity,
    UnitPrice,
    TotalPrice,
    Description,
    StoreName,
    OrderId,
    ExternalRef,
    Commission,
    FixedFee,
    ShippingCost,
    AdsCost,
    Tax,
    ShipmentType,
}

/// Tabela de apelidos aceitos por campo lógico, avaliada em ordem. Dirigida
/// por dados para facilitar a inclusão de novos formatos de relatório sem
/// ramificar código.
const HEADER_ALIASES: &[(LogicalField, &[&str])] = &[
    (
        LogicalField::Date,
        &[
            "data da venda",
            "data do pedido",
            "data",
            "date",
            "dt_venda",
            "data_transacao",
        ],
    ),
    (
        LogicalField::Sku,
        &[
            "sku",
            "codigo do anuncio",
            "código do anúncio",
            "sku do anuncio",
            "item_sku",
            "codigo de referencia",
        ],
    ),
    (
        LogicalField::Quantity,
        &["quantidade", "qtd", "qtde", "unidades", "quantity"],
    ),
    (
        LogicalField::UnitPrice,
        &[
            "preco unitario",
            "preço unitário",
            "valor unitario",
            "preco unit",
            "unit price",
        ],
    ),
    (
        LogicalField::TotalPrice,
        &[
            "valor total",
            "total da venda",
            "receita por produtos",
            "total",
            "valor da venda",
        ],
    ),
    (
        LogicalField::Description,
        &[
            "titulo do anuncio",
            "título do anúncio",
            "descricao",
            "descrição",
            "produto",
            "nome do produto",
        ],
    ),
    (
        LogicalField::StoreName,
        &["loja", "conta", "nome da loja", "canal", "store"],
    ),
    (
        LogicalField::OrderId,
        &[
            "n.º de venda",
            "numero do pedido",
            "número do pedido",
            "id do pedido",
            "pedido",
            "order id",
        ],
    ),
    (
        LogicalField::ExternalRef,
        &[
            "id da operacao",
            "id da operação",
            "numero de rastreamento da operacao",
            "id da transacao",
            "operacao",
        ],
    ),
    (
        LogicalField::Commission,
        &[
            "tarifa de venda",
            "comissao",
            "comissão",
            "taxa de comissao",
            "commission",
        ],
    ),
    (
        LogicalField::FixedFee,
        &["tarifa fixa", "custo fixo", "taxa fixa"],
    ),
    (
        LogicalField::ShippingCost,
        &[
            "tarifas de envio",
            "custo de envio",
            "frete vendedor",
            "frete",
        ],
    ),
    (
        LogicalField::AdsCost,
        &["ads", "publicidade", "anuncios patrocinados", "product ads"],
    ),
    (LogicalField::Tax, &["impostos", "imposto retido", "tax"]),
    (
        LogicalField::ShipmentType,
        &["forma de entrega", "tipo de envio", "modalidade de envio"],
    ),
];

/// Mapa campo lógico → índice de coluna resolvido contra o cabeçalho real
pub type ColumnMap = HashMap<LogicalField, usize>;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Resolve as colunas por apelido: para cada campo lógico, o primeiro
/// apelido que casar (igualdade e depois substring, sem diferenciar
/// maiúsculas) vence. Colunas já tomadas por outro campo não são
/// reutilizadas.
pub fn resolve_columns(headers: &[String]) -> ColumnMap {
    let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
    let mut map = ColumnMap::new();
    let mut taken = vec![false; headers.len()];

    for (field, aliases) in HEADER_ALIASES {
        let mut found: Option<usize> = None;

        // passada exata primeiro
        'exact: for alias in *aliases {
            for (i, h) in normalized.iter().enumerate() {
                if !taken[i] && h.as_str() == *alias {
                    found = Some(i);
                    break 'exact;
                }
            }
        }
        // substring depois
        if found.is_none() {
            'substring: for alias in *aliases {
                for (i, h) in normalized.iter().enumerate() {
                    if !taken[i] && !h.is_empty() && h.contains(alias) {
                        found = Some(i);
                        break 'substring;
                    }
                }
            }
        }

        if let Some(idx) = found {
            taken[idx] = true;
            map.insert(*field, idx);
        }
    }

    map
}

/// Valor de uma célula pela coluna resolvida; None quando a coluna não
/// existe ou a célula está vazia
pub fn cell<'a>(row: &'a [String], map: &ColumnMap, field: LogicalField) -> Option<&'a str> {
    map.get(&field)
        .and_then(|idx| row.get(*idx))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let map = resolve_columns(&headers(&["Data", "SKU", "Quantidade"]));
        assert_eq!(map.get(&LogicalField::Date), Some(&0));
        assert_eq!(map.get(&LogicalField::Sku), Some(&1));
        assert_eq!(map.get(&LogicalField::Quantity), Some(&2));
    }

    #[test]
    fn test_substring_match() {
        let map = resolve_columns(&headers(&[
            "Data da venda (BRT)",
            "SKU do anúncio",
            "Qtde. vendida",
        ]));
        assert_eq!(map.get(&LogicalField::Date), Some(&0));
        assert_eq!(map.get(&LogicalField::Sku), Some(&1));
        assert_eq!(map.get(&LogicalField::Quantity), Some(&2));
    }

    #[test]
    fn test_missing_sku_column_leaves_field_unresolved() {
        let map = resolve_columns(&headers(&["Data", "Valor total"]));
        assert!(map.get(&LogicalField::Sku).is_none());
        assert_eq!(map.get(&LogicalField::TotalPrice), Some(&1));
    }

    #[test]
    fn test_cell_reads_by_logical_field() {
        let map = resolve_columns(&headers(&["Data", "SKU"]));
        let row = vec!["15/03/2024".to_string(), "ABC123".to_string()];
        assert_eq!(cell(&row, &map, LogicalField::Sku), Some("ABC123"));
        assert_eq!(cell(&row, &map, LogicalField::Quantity), None);
    }

    #[test]
    fn test_empty_cell_is_none() {
        let map = resolve_columns(&headers(&["Data", "SKU"]));
        let row = vec!["15/03/2024".to_string(), "  ".to_string()];
        assert_eq!(cell(&row, &map, LogicalField::Sku), None);
    }
}
