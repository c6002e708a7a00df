pub mod a001_company;
pub mod a002_product;
pub mod a003_category;
pub mod a004_transaction;
pub mod a005_sku_mapping;
pub mod a006_marketplace_connection;
pub mod a007_import_job;
pub mod a008_payable;
pub mod a009_receivable;
pub mod a010_card_invoice;
pub mod a011_manual_entry;
