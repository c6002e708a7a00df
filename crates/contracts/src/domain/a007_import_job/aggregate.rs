use crate::domain::a004_transaction::aggregate::SalesChannel;
use crate::domain::common::{
    AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, EventStore, MovementOrigin,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único do job de importação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportJobId(pub Uuid);

impl ImportJobId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ImportJobId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ImportJobId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Status do job. Processing é o único estado não terminal; um job
/// finalizado nunca é alterado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Processing,
    Done,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(JobStatus::Processing),
            "done" => Some(JobStatus::Done),
            "error" => Some(JobStatus::Error),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Processing)
    }
}

/// Contadores de linhas do job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobCounters {
    /// Total de linhas detectadas no arquivo
    pub total: i32,
    /// Linhas processadas até agora
    pub processed: i32,
    /// Linhas que geraram registros novos
    pub imported: i32,
    /// Linhas resolvidas por merge (já existiam)
    pub duplicates: i32,
    /// Linhas com erro (contadas, não interrompem o lote)
    pub errors: i32,
}

/// Job de importação de arquivo - registro persistido de progresso,
/// atualizado incrementalmente para permitir polling pela interface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportJob {
    #[serde(flatten)]
    pub base: BaseAggregate<ImportJobId>,

    /// Ref. da empresa
    pub company_ref: String,
    /// Canal (None para importação de produtos)
    pub channel: Option<SalesChannel>,
    /// Nome do arquivo importado
    pub file_name: String,
    /// Contadores
    pub counters: JobCounters,
    /// Status
    pub status: JobStatus,
    /// Mensagem de erro (status = error)
    pub error_message: Option<String>,
    /// Data/hora de término
    pub finished_at: Option<DateTime<Utc>>,
}

impl ImportJob {
    pub fn new_for_insert(
        company_ref: String,
        channel: Option<SalesChannel>,
        file_name: String,
        total: i32,
    ) -> Self {
        let code = format!("IMP-{}", &Uuid::new_v4().to_string()[..8]);
        let description = format!("Importação de {}", file_name);
        let base = BaseAggregate::new(ImportJobId::new_v4(), code, description);
        Self {
            base,
            company_ref,
            channel,
            file_name,
            counters: JobCounters {
                total,
                ..JobCounters::default()
            },
            status: JobStatus::Processing,
            error_message: None,
            finished_at: None,
        }
    }

    /// Finalizar o job com status terminal
    pub fn finish(&mut self, status: JobStatus, error_message: Option<String>) {
        self.status = status;
        self.error_message = error_message;
        self.finished_at = Some(Utc::now());
        self.base.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.company_ref.trim().is_empty() {
            return Err("Empresa é obrigatória".into());
        }
        if self.file_name.trim().is_empty() {
            return Err("Nome do arquivo é obrigatório".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for ImportJob {
    type Id = ImportJobId;

    fn id(&self) -> Self::Id {
        self.base.id
    }
    fn code(&self) -> &str {
        &self.base.code
    }
    fn description(&self) -> &str {
        &self.base.description
    }
    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }
    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }
    fn events(&self) -> &EventStore {
        &self.base.events
    }
    fn events_mut(&mut self) -> &mut EventStore {
        &mut self.base.events
    }
    fn aggregate_index() -> &'static str {
        "a007"
    }
    fn collection_name() -> &'static str {
        "import_job"
    }
    fn element_name() -> &'static str {
        "Job de Importação"
    }
    fn list_name() -> &'static str {
        "Jobs de Importação"
    }
    fn movement_origin() -> Option<MovementOrigin> {
        None
    }
}
