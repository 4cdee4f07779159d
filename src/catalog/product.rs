//! Product definitions and the default catalog

use serde::{Deserialize, Serialize};

use crate::vehicle::VehicleCategory;

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDefinition {
    pub id: String,
    pub name: String,
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_months: u32,
    pub max_months: u32,
    /// Minimum initial payment as a fraction of the vehicle price
    #[serde(default = "default_min_initial")]
    pub min_initial: f64,
    /// End-of-term residual fraction, leasing products only
    #[serde(default)]
    pub residual_percent: Option<f64>,
    #[serde(default)]
    pub available_for: Vec<VehicleCategory>,
}

fn default_min_initial() -> f64 {
    0.15
}

/// Configurable product list, split by financing type.
///
/// The default value is the built-in catalog used when no external
/// configuration document is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub credit_products: Vec<ProductDefinition>,
    #[serde(default)]
    pub leasing_products: Vec<ProductDefinition>,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self {
            credit_products: vec![
                ProductDefinition {
                    id: "credit_std".to_string(),
                    name: "Standard credit".to_string(),
                    min_amount: 100_000.0,
                    max_amount: 5_000_000.0,
                    min_months: 12,
                    max_months: 84,
                    min_initial: 0.15,
                    residual_percent: None,
                    available_for: vec![VehicleCategory::New, VehicleCategory::Used],
                },
                ProductDefinition {
                    id: "credit_premium".to_string(),
                    name: "Premium credit".to_string(),
                    min_amount: 500_000.0,
                    max_amount: 10_000_000.0,
                    min_months: 12,
                    max_months: 60,
                    min_initial: 0.20,
                    residual_percent: None,
                    available_for: vec![VehicleCategory::New],
                },
            ],
            leasing_products: vec![ProductDefinition {
                id: "leasing_std".to_string(),
                name: "Standard leasing".to_string(),
                min_amount: 300_000.0,
                max_amount: 10_000_000.0,
                min_months: 12,
                max_months: 60,
                min_initial: 0.10,
                residual_percent: Some(0.20),
                available_for: vec![VehicleCategory::New, VehicleCategory::Used],
            }],
        }
    }
}

impl ProductCatalog {
    /// Numeric sanity checks, run once at load time. A product with an
    /// inverted range must never reach calculation.
    pub fn validate(&self) -> Result<(), super::CatalogError> {
        for product in self.credit_products.iter().chain(&self.leasing_products) {
            product.validate()?;
        }
        Ok(())
    }
}

impl ProductDefinition {
    fn validate(&self) -> Result<(), super::CatalogError> {
        let fail = |reason: &str| {
            Err(super::CatalogError::InvalidProduct {
                id: self.id.clone(),
                reason: reason.to_string(),
            })
        };

        if self.min_amount <= 0.0 || self.max_amount < self.min_amount {
            return fail("amount range is empty or non-positive");
        }
        if self.min_months == 0 || self.max_months < self.min_months {
            return fail("term range is empty or zero");
        }
        if !(0.0..=1.0).contains(&self.min_initial) {
            return fail("minimum initial ratio must be within [0, 1]");
        }
        if let Some(residual) = self.residual_percent {
            if !(0.0..=1.0).contains(&residual) {
                return fail("residual percentage must be within [0, 1]");
            }
        }
        Ok(())
    }
}
