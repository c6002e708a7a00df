pub mod common;

pub mod u501_import_sales_report;
pub mod u502_sync_marketplace;
pub mod u503_import_bank_statement;
pub mod u504_recompute_cmv;
pub mod u505_match_skus;
