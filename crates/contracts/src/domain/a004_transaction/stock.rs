use serde::{Deserialize, Serialize};

/// Item sem estoque suficiente para a conciliação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSemEstoque {
    /// ID da linha na transação
    pub line_id: String,
    /// SKU do canal
    pub channel_sku: Option<String>,
    /// Descrição do item
    pub descricao: String,
    /// Estoque disponível do produto
    pub estoque_disponivel: f64,
    /// Quantidade solicitada pela transação
    pub quantidade_solicitada: f64,
}

/// Resultado da validação de estoque feita antes de conciliar uma transação
/// com itens que afetam estoque. Transações sem itens vinculados sempre
/// passam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidacaoEstoque {
    pub valido: bool,
    /// Itens em falta, com o tamanho do déficit
    pub itens: Vec<ItemSemEstoque>,
}

impl ValidacaoEstoque {
    pub fn ok() -> Self {
        Self {
            valido: true,
            itens: Vec::new(),
        }
    }
}
