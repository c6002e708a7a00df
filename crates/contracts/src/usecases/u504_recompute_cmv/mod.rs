pub mod progress;
pub mod request;
pub mod response;

pub use progress::{RecomputeError, RecomputeProgress, RecomputeStatus};
pub use request::RecomputeRequest;
pub use response::{RecomputeResponse, RecomputeStartStatus};

use crate::usecases::common::UseCaseMetadata;

pub struct RecomputeCmv;

impl UseCaseMetadata for RecomputeCmv {
    fn usecase_index() -> &'static str {
        "u504"
    }

    fn usecase_name() -> &'static str {
        "recompute_cmv"
    }

    fn display_name() -> &'static str {
        "Recomputação de CMV em lote"
    }

    fn description() -> &'static str {
        "Percorre as transações conciliadas sem CMV e calcula custo, receita e margem por item"
    }
}
