use serde::{Deserialize, Serialize};

/// Resumo da sincronização
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSummary {
    /// Pedidos retornados pela API
    pub fetched: i32,
    /// Registros novos criados
    pub imported: i32,
    /// Registros resolvidos por merge
    pub merged: i32,
    /// Pedidos com erro (registrados no log de integração)
    pub errors: i32,
}
