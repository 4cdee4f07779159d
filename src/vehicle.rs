//! Vehicle data and residual-value depreciation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vehicle condition category, drives base-rate selection and
/// product eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    New,
    Used,
}

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("vehicle price must be positive, got {0}")]
    NonPositivePrice(f64),
}

/// Vehicle being financed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Purchase price, the basis for all financed-amount math
    pub price: f64,
    pub vin: String,
    pub category: VehicleCategory,
}

impl Vehicle {
    pub fn validate(&self) -> Result<(), VehicleError> {
        if self.price <= 0.0 {
            return Err(VehicleError::NonPositivePrice(self.price));
        }
        Ok(())
    }

    /// Estimated residual value after `elapsed_months`, used as the leasing
    /// buyout amount.
    ///
    /// New vehicles lose 20% in the first year and a further 10% per year
    /// after that (linear in fractional years). Used vehicles depreciate
    /// straight-line at 15% per year. Clamped at zero for very long
    /// holding periods.
    pub fn residual_value(&self, elapsed_months: u32) -> f64 {
        let years = elapsed_months as f64 / 12.0;
        let value = match self.category {
            VehicleCategory::New => {
                if years <= 1.0 {
                    self.price * 0.80
                } else {
                    self.price * (0.80 - (years - 1.0) * 0.10)
                }
            }
            VehicleCategory::Used => self.price * (1.0 - years * 0.15),
        };
        value.max(0.0)
    }
}
