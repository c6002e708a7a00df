pub mod request;
pub mod response;

pub use request::StatementImportRequest;
pub use response::StatementImportSummary;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportBankStatement;

impl UseCaseMetadata for ImportBankStatement {
    fn usecase_index() -> &'static str {
        "u503"
    }

    fn usecase_name() -> &'static str {
        "import_bank_statement"
    }

    fn display_name() -> &'static str {
        "Importação de extrato bancário"
    }

    fn description() -> &'static str {
        "Importa extratos OFX para o hub de movimentos financeiros, com upsert idempotente por FITID"
    }
}
