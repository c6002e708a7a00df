use serde::{Deserialize, Serialize};

/// Armazenamento de eventos de domínio (reservado para Event Sourcing futuro)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventStore {
    _placeholder: (),
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }
}
