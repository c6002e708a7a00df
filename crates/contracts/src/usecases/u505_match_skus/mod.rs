pub mod progress;
pub mod request;
pub mod response;

pub use progress::{ReprocessError, ReprocessProgress, ReprocessStatus};
pub use request::{MapSkuRequest, ReprocessRequest};
pub use response::{MapSkuResponse, ReprocessResponse, ReprocessStartStatus};

use crate::usecases::common::UseCaseMetadata;

pub struct MatchSkus;

impl UseCaseMetadata for MatchSkus {
    fn usecase_index() -> &'static str {
        "u505"
    }

    fn usecase_name() -> &'static str {
        "match_skus"
    }

    fn display_name() -> &'static str {
        "Mapeamento de SKUs"
    }

    fn description() -> &'static str {
        "Confirma o vínculo SKU do canal ↔ produto interno e propaga retroativamente aos itens históricos não vinculados"
    }
}
