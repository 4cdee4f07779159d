//! Rate & payment engine: base-rate tables, annuity math, riders, and
//! amortization schedule generation

mod engine;
mod params;
mod rates;
mod result;
mod schedule;

pub use engine::{AnnuityCalculator, CalcError, ParameterError};
pub use params::{CalculationParameters, FinancingType, MIN_INITIAL_RATIO};
pub use rates::RateTable;
pub use result::{ApprovalStatus, CalculationResult, Conditions};
pub use schedule::ScheduleEntry;

/// Payment calculator seam. Only one concrete implementation exists today
/// ([`AnnuityCalculator`]); the trait keeps the scoring and catalog
/// consumers independent of it.
pub trait Calculator {
    fn calculate(&self, params: &CalculationParameters) -> Result<CalculationResult, CalcError>;
}

/// Round a monetary figure to 2 decimal places. Applied at result
/// construction only, never during intermediate math.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a percentage to 1 decimal place for disclosure.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
