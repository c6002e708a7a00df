use super::repository::Model;
use chrono::NaiveDate;
use contracts::domain::a002_product::aggregate::Product;
use contracts::domain::a004_transaction::aggregate::{SalesChannel, TransactionItem};
use uuid::Uuid;

/// Identificador estável do item dentro do documento, usado como chave de
/// idempotência do CMV
pub fn item_ref(transaction_id: &str, item: &TransactionItem) -> String {
    format!("{}:{}", transaction_id, item.line_id)
}

/// Calcula o CMV de um item vinculado a produto:
///   unit_cost   = custo médio do produto
///   total_cost  = quantidade × unit_cost
///   revenue     = total da linha, ou unitário × quantidade
///   margem      = revenue − total_cost     (só com receita conhecida)
///   margem %    = margem / revenue × 100   (só com receita > 0)
/// Sem receita conhecida, os campos de margem ficam indefinidos - nunca
/// zero.
pub fn build_for_item(
    company_ref: &str,
    channel: SalesChannel,
    date: NaiveDate,
    transaction_id: &str,
    item: &TransactionItem,
    product: &Product,
) -> Model {
    let unit_cost = product.costs.average_cost;
    let total_cost = item.quantity * unit_cost;
    let revenue = item.revenue();

    let gross_margin = revenue.map(|r| r - total_cost);
    let margin_percent = match (revenue, gross_margin) {
        (Some(r), Some(margin)) if r > 0.0 => Some(margin / r * 100.0),
        _ => None,
    };

    Model {
        id: Uuid::new_v4().to_string(),
        company_ref: company_ref.to_string(),
        product_ref: product.base.id.value().to_string(),
        record_date: date.to_string(),
        channel: channel.as_str().to_string(),
        quantity: item.quantity,
        unit_cost,
        total_cost,
        unit_price: item.unit_price,
        total_revenue: revenue,
        gross_margin,
        margin_percent,
        registrator: transaction_id.to_string(),
        item_ref: item_ref(transaction_id, item),
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(average_cost: f64) -> Product {
        Product::new_for_insert(
            "PRD-1".into(),
            "Produto teste".into(),
            "c1".into(),
            "SKU-1".into(),
            "un".into(),
            average_cost,
            100.0,
        )
    }

    fn item(quantity: f64, unit_price: Option<f64>, total_price: Option<f64>) -> TransactionItem {
        TransactionItem {
            line_id: "1".into(),
            channel_sku: Some("ABC".into()),
            description: "Item".into(),
            quantity,
            unit_price,
            total_price,
            product_ref: Some(Uuid::new_v4().to_string()),
            sku_ref: None,
            source_row: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_cmv_with_total_price() {
        let record = build_for_item(
            "c1",
            SalesChannel::MercadoLivre,
            date(),
            "trx-1",
            &item(2.0, Some(50.0), Some(100.0)),
            &product(30.0),
        );
        assert_eq!(record.unit_cost, 30.0);
        assert_eq!(record.total_cost, 60.0);
        assert_eq!(record.total_revenue, Some(100.0));
        assert_eq!(record.gross_margin, Some(40.0));
        assert_eq!(record.margin_percent, Some(40.0));
        assert_eq!(record.item_ref, "trx-1:1");
    }

    #[test]
    fn test_cmv_revenue_falls_back_to_unit_price() {
        let record = build_for_item(
            "c1",
            SalesChannel::Shopee,
            date(),
            "trx-1",
            &item(3.0, Some(20.0), None),
            &product(10.0),
        );
        assert_eq!(record.total_revenue, Some(60.0));
        assert_eq!(record.gross_margin, Some(30.0));
        assert_eq!(record.margin_percent, Some(50.0));
    }

    #[test]
    fn test_cmv_without_revenue_leaves_margin_undefined() {
        let record = build_for_item(
            "c1",
            SalesChannel::Outro,
            date(),
            "trx-1",
            &item(2.0, None, None),
            &product(30.0),
        );
        assert_eq!(record.total_cost, 60.0);
        assert_eq!(record.total_revenue, None);
        assert_eq!(record.gross_margin, None);
        assert_eq!(record.margin_percent, None);
    }

    #[test]
    fn test_cmv_zero_revenue_has_no_margin_percent() {
        let record = build_for_item(
            "c1",
            SalesChannel::Outro,
            date(),
            "trx-1",
            &item(1.0, Some(0.0), None),
            &product(30.0),
        );
        assert_eq!(record.total_revenue, Some(0.0));
        assert_eq!(record.gross_margin, Some(-30.0));
        assert_eq!(record.margin_percent, None);
    }
}
