//! Calculation request parameters

use serde::{Deserialize, Serialize};

use crate::vehicle::Vehicle;

/// Minimum initial payment as a fraction of the total amount
pub const MIN_INITIAL_RATIO: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingType {
    Credit,
    Leasing,
}

/// Parameters of a single financing calculation.
///
/// Comprehensive (CASCO) insurance is on by default; life insurance is
/// opt-in. Both riders surcharge the payment without being amortized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationParameters {
    pub financing_type: FinancingType,
    /// Total purchase amount
    pub amount: f64,
    pub initial_payment: f64,
    /// Term in months, 12..=84
    pub months: u32,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default = "default_true")]
    pub insurance_included: bool,
    #[serde(default)]
    pub life_insurance: bool,
}

fn default_true() -> bool {
    true
}

impl CalculationParameters {
    /// Parameters with the default rider selection (comprehensive insurance
    /// on, life insurance off).
    pub fn new(
        financing_type: FinancingType,
        amount: f64,
        initial_payment: f64,
        months: u32,
        vehicle: Option<Vehicle>,
    ) -> Self {
        Self {
            financing_type,
            amount,
            initial_payment,
            months,
            vehicle,
            insurance_included: true,
            life_insurance: false,
        }
    }

    /// Amount actually financed: total minus the initial payment
    pub fn financed_amount(&self) -> f64 {
        self.amount - self.initial_payment
    }
}
