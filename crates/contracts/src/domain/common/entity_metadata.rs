use serde::{Deserialize, Serialize};

/// Metadados de ciclo de vida de um agregado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Data de criação do registro
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Data da última atualização
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Exclusão lógica (soft delete)
    pub is_deleted: bool,
    /// Lançado/conciliado (para documentos)
    pub is_posted: bool,
    /// Versão para optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    /// Criar metadados novos para um agregado novo
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            is_posted: false,
            version: 0,
        }
    }

    /// Atualizar o timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    /// Incrementar a versão
    pub fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
