use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Configuração de todas as rotas da aplicação
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 Empresas
        // ========================================
        .route(
            "/api/companies",
            get(handlers::a001_company::list_all).post(handlers::a001_company::upsert),
        )
        .route(
            "/api/companies/:id",
            get(handlers::a001_company::get_by_id).delete(handlers::a001_company::delete),
        )
        // ========================================
        // A002 Produtos
        // ========================================
        .route(
            "/api/products",
            get(handlers::a002_product::list).post(handlers::a002_product::upsert),
        )
        .route(
            "/api/products/:id",
            get(handlers::a002_product::get_by_id).delete(handlers::a002_product::delete),
        )
        // ========================================
        // A003 Categorias
        // ========================================
        .route(
            "/api/categories",
            get(handlers::a003_category::list).post(handlers::a003_category::upsert),
        )
        .route(
            "/api/categories/:id",
            axum::routing::delete(handlers::a003_category::delete),
        )
        // ========================================
        // A004 Transações
        // ========================================
        .route("/api/transactions", get(handlers::a004_transaction::list))
        .route(
            "/api/transactions/:id",
            get(handlers::a004_transaction::get_by_id),
        )
        .route(
            "/api/transactions/:id/reconcile",
            post(handlers::a004_transaction::reconcile),
        )
        .route(
            "/api/transactions/:id/reopen",
            post(handlers::a004_transaction::reopen),
        )
        .route(
            "/api/transactions/:id/ignore",
            post(handlers::a004_transaction::ignore),
        )
        .route(
            "/api/transactions/:id/stock-validation",
            get(handlers::a004_transaction::validate_stock),
        )
        // ========================================
        // A005 Mapeamentos de SKU
        // ========================================
        .route("/api/sku-mappings", get(handlers::a005_sku_mapping::list))
        .route(
            "/api/sku-mappings/pending",
            get(handlers::a005_sku_mapping::list_pending),
        )
        // ========================================
        // A006 Conexões de marketplace (OAuth)
        // ========================================
        .route(
            "/api/connections",
            get(handlers::a006_marketplace_connection::list)
                .post(handlers::a006_marketplace_connection::create),
        )
        .route(
            "/api/connections/oauth/callback",
            get(handlers::a006_marketplace_connection::oauth_callback),
        )
        .route(
            "/api/connections/:id",
            axum::routing::delete(handlers::a006_marketplace_connection::delete),
        )
        // ========================================
        // A007 Jobs de importação (polling de progresso)
        // ========================================
        .route("/api/import-jobs", get(handlers::a007_import_job::list))
        .route(
            "/api/import-jobs/:id",
            get(handlers::a007_import_job::get_by_id),
        )
        .route(
            "/api/import-jobs/:id/cancel",
            post(handlers::a007_import_job::cancel),
        )
        // ========================================
        // A008/A009 Contas a pagar e a receber
        // ========================================
        .route(
            "/api/payables",
            get(handlers::a008_payable::list).post(handlers::a008_payable::upsert),
        )
        .route(
            "/api/payables/:id/settle",
            post(handlers::a008_payable::settle),
        )
        .route(
            "/api/payables/:id/reopen",
            post(handlers::a008_payable::reopen),
        )
        .route(
            "/api/payables/:id/cancel",
            post(handlers::a008_payable::cancel),
        )
        .route(
            "/api/receivables",
            get(handlers::a009_receivable::list).post(handlers::a009_receivable::upsert),
        )
        .route(
            "/api/receivables/:id/settle",
            post(handlers::a009_receivable::settle),
        )
        .route(
            "/api/receivables/:id/reopen",
            post(handlers::a009_receivable::reopen),
        )
        .route(
            "/api/receivables/:id/cancel",
            post(handlers::a009_receivable::cancel),
        )
        // ========================================
        // A010 Faturas de cartão
        // ========================================
        .route(
            "/api/card-invoices",
            get(handlers::a010_card_invoice::list).post(handlers::a010_card_invoice::upsert),
        )
        .route(
            "/api/card-invoices/:id",
            axum::routing::delete(handlers::a010_card_invoice::delete),
        )
        .route(
            "/api/card-invoices/:id/post",
            post(handlers::a010_card_invoice::post),
        )
        .route(
            "/api/card-invoices/:id/pay",
            post(handlers::a010_card_invoice::pay),
        )
        .route(
            "/api/card-invoices/:id/unpost",
            post(handlers::a010_card_invoice::unpost),
        )
        // ========================================
        // A011 Lançamentos manuais
        // ========================================
        .route(
            "/api/manual-entries",
            get(handlers::a011_manual_entry::list).post(handlers::a011_manual_entry::upsert),
        )
        .route(
            "/api/manual-entries/:id",
            axum::routing::delete(handlers::a011_manual_entry::delete),
        )
        // ========================================
        // Dashboards
        // ========================================
        .route("/api/dashboards/dre", get(handlers::dashboards::dre))
        .route(
            "/api/dashboards/cash-flow",
            get(handlers::dashboards::cash_flow),
        )
        .route(
            "/api/dashboards/aging/receivables",
            get(handlers::dashboards::receivables_aging),
        )
        .route(
            "/api/dashboards/aging/payables",
            get(handlers::dashboards::payables_aging),
        )
        .route(
            "/api/dashboards/projections",
            get(handlers::dashboards::projections),
        )
        // ========================================
        // Log de integração
        // ========================================
        .route(
            "/api/integration-log",
            get(handlers::integration_log::list),
        )
        // ========================================
        // Exportações
        // ========================================
        .route(
            "/api/exports/receivables",
            get(handlers::exports::receivables_workbook),
        )
        // ========================================
        // UseCases
        // ========================================
        .route(
            "/api/u501/import/validate",
            post(handlers::usecases::u501_validate),
        )
        .route(
            "/api/u501/import/start",
            post(handlers::usecases::u501_start_import),
        )
        .route("/api/u502/sync", post(handlers::usecases::u502_sync))
        .route(
            "/api/u503/statement/import",
            post(handlers::usecases::u503_import_statement),
        )
        .route(
            "/api/u504/recompute/start",
            post(handlers::usecases::u504_start_recompute),
        )
        .route(
            "/api/u504/recompute/:session_id/progress",
            get(handlers::usecases::u504_get_progress),
        )
        .route("/api/u505/map", post(handlers::usecases::u505_map_sku))
        .route(
            "/api/u505/reprocess/start",
            post(handlers::usecases::u505_start_reprocess),
        )
        .route(
            "/api/u505/reprocess/:session_id/progress",
            get(handlers::usecases::u505_get_progress),
        )
        // ========================================
        // Webhooks
        // ========================================
        .route(
            "/api/webhooks/mercado-livre",
            post(handlers::webhooks::mercado_livre),
        )
}
