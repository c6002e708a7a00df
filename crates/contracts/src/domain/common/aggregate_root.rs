use super::{EntityMetadata, EventStore, MovementOrigin};

/// Trait para a raiz de agregado
///
/// Define os métodos e metadados obrigatórios de todos os agregados do
/// sistema
pub trait AggregateRoot {
    /// Tipo do identificador do agregado
    type Id;

    // ========================================================================
    // Métodos de instância (dados do registro)
    // ========================================================================

    /// ID do registro
    fn id(&self) -> Self::Id;

    /// Código de negócio do registro (ex.: "TRX-2025-001")
    fn code(&self) -> &str;

    /// Descrição/nome do registro
    fn description(&self) -> &str;

    /// Metadados de ciclo de vida
    fn metadata(&self) -> &EntityMetadata;

    /// Metadados mutáveis
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Armazenamento de eventos
    fn events(&self) -> &EventStore;

    /// Armazenamento de eventos mutável
    fn events_mut(&mut self) -> &mut EventStore;

    // ========================================================================
    // Metadados da classe do agregado (dados estáticos)
    // ========================================================================

    /// Índice do agregado no sistema (ex.: "a004")
    fn aggregate_index() -> &'static str;

    /// Nome da coleção no banco (ex.: "transaction")
    fn collection_name() -> &'static str;

    /// Nome do elemento para exibição (singular, ex.: "Transação")
    fn element_name() -> &'static str;

    /// Nome da lista para exibição (plural, ex.: "Transações")
    fn list_name() -> &'static str;

    /// Origem de movimento associada ao agregado, quando houver
    fn movement_origin() -> Option<MovementOrigin>;
}
