use thiserror::Error;

/// Erros estruturais de ingestão. Erros de linha/célula NÃO passam por
/// aqui: são acumulados nos contadores do job e nunca abortam o lote.
/// Estes erros abortam o arquivo inteiro antes de qualquer persistência.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Extensão/conteúdo não suportado
    #[error("Formato de arquivo não suportado: {0}")]
    UnsupportedFormat(String),

    /// Arquivo ilegível (corrompido, planilha vazia)
    #[error("Falha ao ler o arquivo: {0}")]
    Unreadable(String),

    /// Estrutura inválida - ex.: nenhuma coluna de data ou de SKU encontrada
    #[error("Arquivo inválido: {0}")]
    Validation(String),
}
