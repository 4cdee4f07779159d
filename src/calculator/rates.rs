//! Annual base rates by financing type and vehicle category

use serde::{Deserialize, Serialize};

use super::params::FinancingType;
use crate::vehicle::VehicleCategory;

/// Term above which the rate is surcharged
const LONG_TERM_MONTHS: u32 = 60;
/// Term below which the rate is discounted
const SHORT_TERM_MONTHS: u32 = 24;

/// Annual base-rate table keyed by (financing type, vehicle category).
///
/// Defaults carry the current pricing sheet; alternative tables can be
/// injected through [`super::AnnuityCalculator::with_rates`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    pub credit_new: f64,
    pub credit_used: f64,
    pub leasing_new: f64,
    pub leasing_used: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            credit_new: 0.159,
            credit_used: 0.189,
            leasing_new: 0.149,
            leasing_used: 0.179,
        }
    }
}

impl RateTable {
    /// Base annual rate before term adjustment
    pub fn base_rate(&self, financing: FinancingType, category: VehicleCategory) -> f64 {
        match (financing, category) {
            (FinancingType::Credit, VehicleCategory::New) => self.credit_new,
            (FinancingType::Credit, VehicleCategory::Used) => self.credit_used,
            (FinancingType::Leasing, VehicleCategory::New) => self.leasing_new,
            (FinancingType::Leasing, VehicleCategory::Used) => self.leasing_used,
        }
    }

    /// Term-adjusted annual rate: +2 points beyond 60 months, -1 point
    /// under 24 months.
    pub fn annual_rate(
        &self,
        financing: FinancingType,
        category: VehicleCategory,
        months: u32,
    ) -> f64 {
        let mut rate = self.base_rate(financing, category);
        if months > LONG_TERM_MONTHS {
            rate += 0.02;
        } else if months < SHORT_TERM_MONTHS {
            rate -= 0.01;
        }
        rate
    }
}
