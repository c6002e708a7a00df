use super::repository;
use anyhow::Result;
use contracts::domain::a002_product::aggregate::Product;
use uuid::Uuid;

pub async fn save(mut product: Product) -> Result<Uuid> {
    product
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    product.before_write();
    repository::upsert(&product).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Product>> {
    repository::get_by_id(id).await
}

pub async fn list_by_company(company_ref: &str) -> Result<Vec<Product>> {
    repository::list_by_company(company_ref).await
}

pub async fn delete(id: Uuid) -> Result<bool> {
    repository::soft_delete(id).await
}

/// Ajusta o estoque do produto. Delta negativo consome (conciliação de
/// venda), positivo devolve (reabertura).
pub async fn adjust_stock(product_id: Uuid, delta: f64) -> Result<()> {
    let mut product = repository::get_by_id(product_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Product not found: {}", product_id))?;

    product.stock.quantity += delta;
    product.before_write();
    repository::upsert(&product).await?;

    tracing::debug!(
        "Adjusted stock for product {} by {} (now {})",
        product_id,
        delta,
        product.stock.quantity
    );
    Ok(())
}
