//! Scoring policy thresholds

use serde::{Deserialize, Serialize};

/// Thresholds applied by [`super::RuleBasedScoring`].
///
/// Defaults carry the current underwriting policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Payment may not exceed this share of monthly income
    pub max_payment_to_income: f64,
    pub min_age: i32,
    pub max_age: i32,
    /// Minimum tenure at the current place of work, months
    pub min_experience_months: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            max_payment_to_income: 0.40,
            min_age: 21,
            max_age: 70,
            min_experience_months: 3,
        }
    }
}
