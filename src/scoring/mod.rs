//! Rule-based pre-approval scoring

mod engine;
mod rules;

pub use engine::{Assessment, RuleBasedScoring, ScoringError};
pub use rules::ScoringRules;

use crate::calculator::CalculationParameters;
use crate::client::ClientData;

/// Scoring seam mirroring [`crate::calculator::Calculator`]: one required
/// operation, one concrete implementation today.
pub trait ScoringEngine {
    fn assess_client(
        &self,
        client: &ClientData,
        params: &CalculationParameters,
    ) -> Result<Assessment, ScoringError>;
}
