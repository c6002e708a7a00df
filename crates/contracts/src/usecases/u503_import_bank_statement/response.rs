use serde::{Deserialize, Serialize};

/// Resumo da importação de extrato
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementImportSummary {
    /// Lançamentos encontrados no arquivo
    pub total: i32,
    /// Lançamentos novos gravados
    pub imported: i32,
    /// Lançamentos já existentes (mesmo FITID)
    pub duplicates: i32,
    /// Lançamentos com erro
    pub errors: i32,
}
