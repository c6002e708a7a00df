pub mod request;
pub mod response;

pub use request::SyncRequest;
pub use response::SyncSummary;

use crate::usecases::common::UseCaseMetadata;

pub struct SyncMarketplace;

impl UseCaseMetadata for SyncMarketplace {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "sync_marketplace"
    }

    fn display_name() -> &'static str {
        "Sincronização com marketplace"
    }

    fn description() -> &'static str {
        "Busca pedidos no marketplace via API/webhook e os grava pelo mesmo contrato de chave natural e merge da importação de arquivos"
    }
}
