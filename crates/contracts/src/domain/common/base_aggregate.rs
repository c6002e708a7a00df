use super::{EntityMetadata, EventStore};
use serde::{Deserialize, Serialize};

/// Agregado base com os campos obrigatórios de todos os agregados
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Identificador único do registro
    pub id: Id,
    /// Código de negócio do registro (ex.: "TRX-2025-001", "PRD-12345")
    pub code: String,
    /// Descrição/nome do registro
    pub description: String,
    /// Comentário
    pub comment: Option<String>,
    /// Metadados de ciclo de vida
    pub metadata: EntityMetadata,
    /// Armazenamento de eventos
    pub events: EventStore,
}

impl<Id> BaseAggregate<Id> {
    /// Criar um agregado novo
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
            events: EventStore::new(),
        }
    }

    /// Criar um agregado com metadados existentes (para carga do banco)
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
            events: EventStore::new(),
        }
    }

    /// Atualizar o timestamp
    pub fn touch(&mut self) {
        self.metadata.touch();
    }

    /// Definir o comentário
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}
