use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

/// Bootstrap idempotente do schema (CREATE TABLE IF NOT EXISTS).
///
/// As constraints de unicidade aqui não são detalhe de armazenamento: a
/// chave natural de a004_transaction, a tupla de a005_sku_mapping e o par
/// (origin, external_ref) de p900 são invariantes do domínio - a violação
/// no insert é convertida em merge pela camada de serviço.
pub async fn run_migrations(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS a001_company (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            cnpj TEXT NOT NULL,
            legal_name TEXT NOT NULL,
            trade_name TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a002_product (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            sku TEXT NOT NULL,
            unit TEXT NOT NULL DEFAULT 'un',
            costs_json TEXT NOT NULL,
            stock_json TEXT NOT NULL,
            tax_json TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_a002_company_sku
            ON a002_product (company_ref, sku);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a003_category (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            category_type TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a004_transaction (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            channel TEXT NOT NULL,
            external_ref TEXT,
            kind TEXT NOT NULL,
            direction TEXT NOT NULL,
            status TEXT NOT NULL,
            transaction_date TEXT NOT NULL,
            header_json TEXT NOT NULL,
            amounts_json TEXT NOT NULL,
            state_json TEXT NOT NULL,
            items_json TEXT NOT NULL,
            source_meta_json TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_a004_natural_key
            ON a004_transaction (company_ref, channel, external_ref, kind, direction);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a005_sku_mapping (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            channel TEXT NOT NULL,
            channel_sku TEXT NOT NULL,
            product_ref TEXT,
            sku_ref TEXT,
            status TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_a005_company_channel_sku
            ON a005_sku_mapping (company_ref, channel, channel_sku);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a006_marketplace_connection (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            channel TEXT NOT NULL,
            seller_id TEXT,
            tokens_json TEXT,
            status TEXT NOT NULL,
            last_sync_at TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a007_import_job (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            channel TEXT,
            file_name TEXT NOT NULL,
            counters_json TEXT NOT NULL,
            status TEXT NOT NULL,
            error_message TEXT,
            finished_at TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a008_payable (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            supplier_name TEXT NOT NULL,
            amount REAL NOT NULL,
            due_date TEXT NOT NULL,
            paid_date TEXT,
            status TEXT NOT NULL,
            category_ref TEXT,
            cost_center_ref TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a009_receivable (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            client_name TEXT NOT NULL,
            amount REAL NOT NULL,
            due_date TEXT NOT NULL,
            received_date TEXT,
            status TEXT NOT NULL,
            category_ref TEXT,
            cost_center_ref TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a010_card_invoice (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            card_name TEXT NOT NULL,
            reference_month INTEGER NOT NULL,
            reference_year INTEGER NOT NULL,
            due_date TEXT NOT NULL,
            paid_date TEXT,
            status TEXT NOT NULL,
            lines_json TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS a011_manual_entry (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company_ref TEXT NOT NULL,
            entry_date TEXT NOT NULL,
            direction TEXT NOT NULL,
            amount REAL NOT NULL,
            category_ref TEXT,
            cost_center_ref TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_posted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS p900_financial_movements (
            id TEXT PRIMARY KEY NOT NULL,
            company_ref TEXT NOT NULL,
            movement_date TEXT NOT NULL,
            direction TEXT NOT NULL,
            origin TEXT NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            external_ref TEXT NOT NULL,
            category_ref TEXT,
            category_name TEXT,
            cost_center_ref TEXT,
            responsible_ref TEXT,
            regime TEXT NOT NULL,
            registrator TEXT NOT NULL,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_p900_origin_external_ref
            ON p900_financial_movements (origin, external_ref);
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS ix_p900_registrator
            ON p900_financial_movements (registrator);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS p901_cmv_records (
            id TEXT PRIMARY KEY NOT NULL,
            company_ref TEXT NOT NULL,
            product_ref TEXT NOT NULL,
            record_date TEXT NOT NULL,
            channel TEXT NOT NULL,
            quantity REAL NOT NULL,
            unit_cost REAL NOT NULL,
            total_cost REAL NOT NULL,
            unit_price REAL,
            total_revenue REAL,
            gross_margin REAL,
            margin_percent REAL,
            registrator TEXT NOT NULL,
            item_ref TEXT NOT NULL,
            created_at TEXT
        );
        "#,
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_p901_item_ref
            ON p901_cmv_records (item_ref);
        "#,
        r#"
        CREATE INDEX IF NOT EXISTS ix_p901_registrator
            ON p901_cmv_records (registrator);
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS document_raw_storage (
            id TEXT PRIMARY KEY NOT NULL,
            channel TEXT NOT NULL,
            document_type TEXT NOT NULL,
            document_no TEXT NOT NULL,
            raw_json TEXT NOT NULL,
            fetched_at TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS integration_log (
            id TEXT PRIMARY KEY NOT NULL,
            channel TEXT NOT NULL,
            operation TEXT NOT NULL,
            status TEXT NOT NULL,
            message TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    ];

    for sql in statements {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }

    tracing::info!("Schema bootstrap completed ({} statements)", statements.len());
    Ok(())
}
