pub mod request;
pub mod response;

pub use request::{ExpectedPeriod, ImportRequest};
pub use response::{ImportSummary, OverlapCheck, OverlapLevel, PeriodCheck, RowError};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportSalesReport;

impl UseCaseMetadata for ImportSalesReport {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_sales_report"
    }

    fn display_name() -> &'static str {
        "Importação de relatório de vendas"
    }

    fn description() -> &'static str {
        "Importa relatórios de vendas (CSV/XLSX) dos canais, com deduplicação por chave natural e merge de campos complementares"
    }
}
