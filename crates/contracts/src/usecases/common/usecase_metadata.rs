/// Metadados de UseCase para identificação e documentação
pub trait UseCaseMetadata {
    /// Índice do UseCase (ex.: "u501")
    fn usecase_index() -> &'static str;

    /// Nome técnico (ex.: "import_sales_report")
    fn usecase_name() -> &'static str;

    /// Nome de exibição (ex.: "Importação de relatório de vendas")
    fn display_name() -> &'static str;

    /// Descrição do UseCase
    fn description() -> &'static str {
        ""
    }

    /// Nome completo no formato "u501_import_sales_report"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
