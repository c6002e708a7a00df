use super::request::ExpectedPeriod;
use serde::{Deserialize, Serialize};

/// Erro de linha registrado durante a importação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowError {
    /// Linha de origem no arquivo
    pub row: u32,
    /// Descrição do erro
    pub message: String,
}

/// Resumo final do job de importação
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    /// ID do job persistido (para polling)
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub total: i32,
    pub imported: i32,
    pub duplicates: i32,
    pub errors: i32,
    /// Primeiros erros registrados (amostra)
    #[serde(rename = "errorList", default)]
    pub error_list: Vec<RowError>,
}

/// Resultado da checagem de compatibilidade de período.
///
/// Aviso não bloqueante: a importação prossegue mesmo com `valido = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodCheck {
    pub valido: bool,
    /// Período dominante detectado na amostra (até 100 linhas)
    pub periodo_detectado: Option<ExpectedPeriod>,
    /// Período esperado pelo checklist
    pub periodo_esperado: Option<ExpectedPeriod>,
    /// Menor data vista na amostra (dd/mm/aaaa)
    pub data_minima: Option<String>,
    /// Maior data vista na amostra (dd/mm/aaaa)
    pub data_maxima: Option<String>,
}

/// Severidade do aviso de sobreposição
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapLevel {
    /// < 50% já importado
    Info,
    /// 50–95% já importado
    Warning,
    /// >= 95% - provavelmente o arquivo já foi importado
    Error,
}

/// Resultado da checagem de sobreposição com registros já importados
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapCheck {
    /// Linhas amostradas (até 100)
    pub total_amostrado: i32,
    /// Quantas já existem para a mesma empresa+canal
    pub ja_existentes: i32,
    /// Percentual de sobreposição (0–100)
    pub percentual: f64,
    /// Severidade
    pub nivel: OverlapLevel,
    /// Mensagem para o usuário
    pub mensagem: String,
}

impl OverlapLevel {
    /// Faixas definidas pelo fluxo de confirmação de importação:
    /// >= 95% erro, 50–95% aviso, < 50% informativo
    pub fn for_percentage(pct: f64) -> Self {
        if pct >= 95.0 {
            OverlapLevel::Error
        } else if pct >= 50.0 {
            OverlapLevel::Warning
        } else {
            OverlapLevel::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_level_bands() {
        assert_eq!(OverlapLevel::for_percentage(0.0), OverlapLevel::Info);
        assert_eq!(OverlapLevel::for_percentage(49.9), OverlapLevel::Info);
        assert_eq!(OverlapLevel::for_percentage(50.0), OverlapLevel::Warning);
        assert_eq!(OverlapLevel::for_percentage(80.0), OverlapLevel::Warning);
        assert_eq!(OverlapLevel::for_percentage(94.9), OverlapLevel::Warning);
        assert_eq!(OverlapLevel::for_percentage(95.0), OverlapLevel::Error);
        assert_eq!(OverlapLevel::for_percentage(100.0), OverlapLevel::Error);
    }
}
