//! Annuity payment calculator

use chrono::{DateTime, Local};
use thiserror::Error;

use super::params::{CalculationParameters, FinancingType, MIN_INITIAL_RATIO};
use super::rates::RateTable;
use super::result::{calculation_id, ApprovalStatus, CalculationResult, Conditions};
use super::schedule::build_schedule;
use super::{round1, round2, Calculator};
use crate::vehicle::VehicleCategory;

/// Comprehensive (CASCO) insurance, annual rate applied to the total amount
const COMPREHENSIVE_INSURANCE_RATE: f64 = 0.005;
/// Life insurance, flat surcharge per period
const LIFE_INSURANCE_MONTHLY: f64 = 500.0;

const MIN_TERM_MONTHS: u32 = 12;
const MAX_TERM_MONTHS: u32 = 84;

/// Rejected calculation parameters, reported with the reason
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("initial payment must be at least {}% of the amount", MIN_INITIAL_RATIO * 100.0)]
    InitialPaymentBelowMinimum,
    #[error("term must be between {MIN_TERM_MONTHS} and {MAX_TERM_MONTHS} months, got {0}")]
    TermOutOfRange(u32),
}

/// Degenerate numeric input caught before the annuity math can produce
/// NaN or infinity
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("term of zero months cannot be amortized")]
    ZeroTerm,
    #[error("nothing to amortize: financed base {0:.2} is not positive")]
    NonPositiveFinancedBase(f64),
}

/// Annuity-based payment engine for credit and leasing.
///
/// `validate_parameters` and `calculate` are separate operations: the quote
/// path validates first, while the product matcher prices synthesized
/// parameter sets directly. `calculate` itself only guards against inputs
/// that would poison the arithmetic.
#[derive(Debug, Clone, Default)]
pub struct AnnuityCalculator {
    rates: RateTable,
}

impl AnnuityCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(rates: RateTable) -> Self {
        Self { rates }
    }

    /// Check a parameter set against the acceptance policy.
    pub fn validate_parameters(&self, params: &CalculationParameters) -> Result<(), ParameterError> {
        if params.amount <= 0.0 {
            return Err(ParameterError::NonPositiveAmount);
        }
        if params.initial_payment < params.amount * MIN_INITIAL_RATIO {
            return Err(ParameterError::InitialPaymentBelowMinimum);
        }
        if params.months < MIN_TERM_MONTHS || params.months > MAX_TERM_MONTHS {
            return Err(ParameterError::TermOutOfRange(params.months));
        }
        Ok(())
    }

    /// Fixed monthly payment fully amortizing `amount` over `months` at
    /// `annual_rate`. A near-zero rate degrades to straight division, so
    /// rate adjustments can never divide by zero.
    pub(crate) fn annuity_payment(amount: f64, annual_rate: f64, months: u32) -> f64 {
        let monthly_rate = annual_rate / 12.0;
        if monthly_rate.abs() < 1e-12 {
            return amount / months as f64;
        }
        let growth = (1.0 + monthly_rate).powi(months as i32);
        amount * (monthly_rate * growth) / (growth - 1.0)
    }

    // Simplified non-compounding annualization, kept bit-for-bit for
    // compatibility with existing disclosures. Not an IRR.
    fn effective_rate(financed_amount: f64, monthly_payment: f64, months: u32) -> f64 {
        let total_cost = monthly_payment * months as f64;
        ((total_cost / financed_amount) - 1.0) * (12.0 / months as f64) * 100.0
    }

    /// Deterministic variant of [`Calculator::calculate`] with an injected
    /// calculation instant.
    pub fn calculate_at(
        &self,
        params: &CalculationParameters,
        now: DateTime<Local>,
    ) -> Result<CalculationResult, CalcError> {
        if params.months == 0 {
            return Err(CalcError::ZeroTerm);
        }

        // Category defaults to used when no vehicle is attached
        let vehicle_category = params
            .vehicle
            .as_ref()
            .map(|v| v.category)
            .unwrap_or(VehicleCategory::Used);

        let annual_rate = self
            .rates
            .annual_rate(params.financing_type, vehicle_category, params.months);

        // Leasing amortizes only down to the end-of-term residual; the
        // buyout itself is appended to the total, not amortized.
        let residual_value = match (params.financing_type, &params.vehicle) {
            (FinancingType::Leasing, Some(vehicle)) => vehicle.residual_value(params.months),
            _ => 0.0,
        };

        let financed_amount = params.financed_amount();
        let annuity_base = financed_amount - residual_value;
        if annuity_base <= 0.0 {
            return Err(CalcError::NonPositiveFinancedBase(annuity_base));
        }

        let base_payment = Self::annuity_payment(annuity_base, annual_rate, params.months);

        let mut rider_monthly = 0.0;
        if params.insurance_included {
            rider_monthly += params.amount * COMPREHENSIVE_INSURANCE_RATE / 12.0;
        }
        if params.life_insurance {
            rider_monthly += LIFE_INSURANCE_MONTHLY;
        }
        let monthly_payment = base_payment + rider_monthly;

        let mut total_payment = monthly_payment * params.months as f64;
        if params.financing_type == FinancingType::Leasing {
            total_payment += residual_value;
        }
        let overpayment = total_payment - financed_amount;
        let effective_rate = Self::effective_rate(financed_amount, monthly_payment, params.months);

        let schedule = build_schedule(
            annuity_base,
            base_payment,
            rider_monthly,
            annual_rate,
            params.months,
            now,
        );

        let conditions = Conditions {
            base_rate: round1(annual_rate * 100.0),
            vehicle_category,
            residual_value: (residual_value > 0.0).then(|| round2(residual_value)),
            insurance_included: params.insurance_included,
            life_insurance: params.life_insurance,
        };

        Ok(CalculationResult {
            monthly_payment: round2(monthly_payment),
            total_payment: round2(total_payment),
            overpayment: round2(overpayment),
            effective_rate: round2(effective_rate),
            schedule,
            approval_status: ApprovalStatus::Pending,
            approval_probability: 0.0,
            conditions,
            calculation_id: calculation_id(now),
        })
    }
}

impl Calculator for AnnuityCalculator {
    fn calculate(&self, params: &CalculationParameters) -> Result<CalculationResult, CalcError> {
        self.calculate_at(params, Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{Vehicle, VehicleCategory};
    use approx::assert_relative_eq;

    fn credit_params() -> CalculationParameters {
        CalculationParameters {
            financing_type: FinancingType::Credit,
            amount: 1_000_000.0,
            initial_payment: 200_000.0,
            months: 36,
            vehicle: None,
            insurance_included: false,
            life_insurance: false,
        }
    }

    fn used_vehicle(price: f64) -> Vehicle {
        Vehicle {
            brand: "Skoda".to_string(),
            model: "Octavia".to_string(),
            year: 2021,
            price,
            vin: "TMBJJ7NE0L0000001".to_string(),
            category: VehicleCategory::Used,
        }
    }

    #[test]
    fn test_parameter_validation() {
        let calc = AnnuityCalculator::new();

        assert!(calc.validate_parameters(&credit_params()).is_ok());

        let mut p = credit_params();
        p.amount = 0.0;
        assert_eq!(calc.validate_parameters(&p), Err(ParameterError::NonPositiveAmount));

        let mut p = credit_params();
        p.initial_payment = 149_999.0;
        assert_eq!(
            calc.validate_parameters(&p),
            Err(ParameterError::InitialPaymentBelowMinimum)
        );

        let mut p = credit_params();
        p.months = 11;
        assert_eq!(calc.validate_parameters(&p), Err(ParameterError::TermOutOfRange(11)));
        p.months = 85;
        assert_eq!(calc.validate_parameters(&p), Err(ParameterError::TermOutOfRange(85)));
    }

    #[test]
    fn test_reference_credit_quote() {
        // 1,000,000 / 200,000 initial / 36 months / credit, no vehicle, no
        // riders: category defaults to used, base rate 18.9%, no term
        // adjustment, financed 800,000
        let calc = AnnuityCalculator::new();
        let result = calc.calculate_at(&credit_params(), Local::now()).unwrap();

        assert_eq!(result.conditions.base_rate, 18.9);
        assert_eq!(result.conditions.vehicle_category, VehicleCategory::Used);
        assert!(result.conditions.residual_value.is_none());

        let expected = AnnuityCalculator::annuity_payment(800_000.0, 0.189, 36);
        assert_relative_eq!(result.monthly_payment, round2(expected), epsilon = 0.01);
        assert_relative_eq!(result.total_payment, round2(expected * 36.0), epsilon = 0.01);
        assert_relative_eq!(
            result.overpayment,
            result.total_payment - 800_000.0,
            epsilon = 0.01
        );
        assert_eq!(result.schedule.len(), 36);
        assert_eq!(result.approval_status, ApprovalStatus::Pending);
    }

    #[test]
    fn test_payment_monotonic_in_rate() {
        let low = AnnuityCalculator::annuity_payment(800_000.0, 0.10, 36);
        let mid = AnnuityCalculator::annuity_payment(800_000.0, 0.15, 36);
        let high = AnnuityCalculator::annuity_payment(800_000.0, 0.20, 36);

        assert!(low < mid && mid < high);
    }

    #[test]
    fn test_payment_monotonic_in_term() {
        let short = AnnuityCalculator::annuity_payment(800_000.0, 0.189, 24);
        let long = AnnuityCalculator::annuity_payment(800_000.0, 0.189, 48);

        assert!(long < short);
    }

    #[test]
    fn test_zero_rate_guard() {
        let payment = AnnuityCalculator::annuity_payment(120_000.0, 0.0, 12);
        assert_relative_eq!(payment, 10_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_riders_inflate_payment_not_schedule() {
        let calc = AnnuityCalculator::new();
        let bare = calc.calculate_at(&credit_params(), Local::now()).unwrap();

        let mut insured = credit_params();
        insured.insurance_included = true;
        insured.life_insurance = true;
        let result = calc.calculate_at(&insured, Local::now()).unwrap();

        // 0.5%/12 of the amount plus the flat life surcharge
        let expected_riders = 1_000_000.0 * 0.005 / 12.0 + 500.0;
        assert_relative_eq!(
            result.monthly_payment,
            round2(bare.monthly_payment + expected_riders),
            epsilon = 0.02
        );

        // Schedule principal is unaffected by riders
        let bare_principal: f64 = bare.schedule.iter().map(|e| e.principal).sum();
        let insured_principal: f64 = result.schedule.iter().map(|e| e.principal).sum();
        assert_relative_eq!(bare_principal, insured_principal, epsilon = 0.5);
        assert_eq!(result.schedule[0].insurance, round2(expected_riders));
    }

    #[test]
    fn test_effective_rate_formula() {
        let calc = AnnuityCalculator::new();
        let result = calc.calculate_at(&credit_params(), Local::now()).unwrap();

        let expected = ((result.monthly_payment * 36.0 / 800_000.0) - 1.0) * (12.0 / 36.0) * 100.0;
        assert_relative_eq!(result.effective_rate, round2(expected), epsilon = 0.02);
    }

    #[test]
    fn test_leasing_residual_handling() {
        let calc = AnnuityCalculator::new();
        let vehicle = used_vehicle(1_000_000.0);
        let params = CalculationParameters {
            financing_type: FinancingType::Leasing,
            amount: 1_000_000.0,
            initial_payment: 200_000.0,
            months: 36,
            vehicle: Some(vehicle.clone()),
            insurance_included: false,
            life_insurance: false,
        };

        let result = calc.calculate_at(&params, Local::now()).unwrap();
        let residual = vehicle.residual_value(36);

        assert_eq!(result.conditions.residual_value, Some(round2(residual)));
        assert_eq!(result.conditions.base_rate, 17.9);

        // Payment amortizes only the base net of the residual, and the
        // buyout is appended once to the total
        let base_payment = AnnuityCalculator::annuity_payment(800_000.0 - residual, 0.179, 36);
        assert_relative_eq!(result.monthly_payment, round2(base_payment), epsilon = 0.01);
        assert_relative_eq!(
            result.total_payment,
            round2(result.monthly_payment * 36.0 + residual),
            epsilon = 0.5
        );

        // Schedule retires exactly the reduced base
        let principal_sum: f64 = result.schedule.iter().map(|e| e.principal).sum();
        assert_relative_eq!(principal_sum, 800_000.0 - residual, epsilon = 36.0 * 0.005 + 0.01);
        assert_eq!(result.schedule.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_computation_guards() {
        let calc = AnnuityCalculator::new();

        let mut p = credit_params();
        p.months = 0;
        assert!(matches!(
            calc.calculate_at(&p, Local::now()),
            Err(CalcError::ZeroTerm)
        ));

        let mut p = credit_params();
        p.initial_payment = p.amount;
        assert!(matches!(
            calc.calculate_at(&p, Local::now()),
            Err(CalcError::NonPositiveFinancedBase(_))
        ));

        // Residual larger than the financed amount must also fail fast
        let p = CalculationParameters {
            financing_type: FinancingType::Leasing,
            amount: 1_000_000.0,
            initial_payment: 850_000.0,
            months: 12,
            vehicle: Some(used_vehicle(1_000_000.0)),
            insurance_included: false,
            life_insurance: false,
        };
        assert!(matches!(
            calc.calculate_at(&p, Local::now()),
            Err(CalcError::NonPositiveFinancedBase(_))
        ));
    }
}
