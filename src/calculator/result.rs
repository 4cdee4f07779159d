//! Calculation result types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::schedule::ScheduleEntry;
use crate::vehicle::VehicleCategory;

/// Approval decision attached to a calculation by the scoring step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Not yet assessed
    Pending,
    PreApproved,
    ConditionalApproval,
    Rejected,
}

/// Disclosed terms of a calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditions {
    /// Term-adjusted annual rate, percent, 1 decimal
    pub base_rate: f64,
    pub vehicle_category: VehicleCategory,
    /// Leasing buyout amount at end of term, when present
    pub residual_value: Option<f64>,
    pub insurance_included: bool,
    pub life_insurance: bool,
}

/// Full outcome of one financing calculation.
///
/// Monetary figures are rounded to 2 decimal places at construction. The
/// approval fields start at `Pending`/0 and are set exactly once by the
/// scoring step; everything else is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    /// Total payment minus the financed amount
    pub overpayment: f64,
    /// Simplified non-compounding annualized cost, percent
    pub effective_rate: f64,
    pub schedule: Vec<ScheduleEntry>,
    pub approval_status: ApprovalStatus,
    /// 0.0..=1.0, derived from the scoring result
    pub approval_probability: f64,
    pub conditions: Conditions,
    /// `CALC_<YYYYMMDDHHMMSS>`
    pub calculation_id: String,
}

impl CalculationResult {
    /// Record the scoring outcome. Called once per result.
    pub fn set_approval(&mut self, status: ApprovalStatus, probability: f64) {
        self.approval_status = status;
        self.approval_probability = probability;
    }
}

/// Unique calculation identifier from the calculation instant
pub(crate) fn calculation_id(now: DateTime<Local>) -> String {
    format!("CALC_{}", now.format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_id_format() {
        let now = Local::now();
        let id = calculation_id(now);

        assert!(id.starts_with("CALC_"));
        assert_eq!(id.len(), "CALC_".len() + 14);
        assert!(id["CALC_".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_approval_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::PreApproved).unwrap(),
            "\"pre_approved\""
        );
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::ConditionalApproval).unwrap(),
            "\"conditional_approval\""
        );
        let parsed: ApprovalStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(parsed, ApprovalStatus::Rejected);
    }
}
