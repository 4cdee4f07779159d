//! Product eligibility matching and per-product estimates

use serde::{Deserialize, Serialize};

use super::product::{ProductCatalog, ProductDefinition};
use crate::calculator::{
    AnnuityCalculator, CalculationParameters, Calculator, FinancingType,
};
use crate::client::{ClientData, EmploymentType};
use crate::vehicle::Vehicle;

/// Representative term used for estimates, capped by the product's own
/// maximum
const ESTIMATE_TERM_MONTHS: u32 = 60;

/// Income above which the high-income recommendation rule fires
const HIGH_INCOME_THRESHOLD: f64 = 100_000.0;

/// An eligible product enriched with its financing type, a representative
/// cost estimate, and a short recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOffer {
    pub product: ProductDefinition,
    pub financing_type: FinancingType,
    pub monthly_payment: f64,
    /// Disclosed annual rate, percent
    pub rate: f64,
    pub recommendation: String,
}

/// Filters the catalog against a vehicle and produces offers.
///
/// Catalog order is preserved, credit products first. Eligibility checks
/// the vehicle category and price band only; the minimum-initial ratio
/// shapes the estimate but is not an eligibility filter, since the client
/// record carries nothing to check it against.
#[derive(Debug, Clone)]
pub struct ProductMatcher {
    catalog: ProductCatalog,
    calculator: AnnuityCalculator,
}

impl Default for ProductMatcher {
    fn default() -> Self {
        Self::new(ProductCatalog::default())
    }
}

impl ProductMatcher {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            catalog,
            calculator: AnnuityCalculator::new(),
        }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Offers for every catalog product the vehicle is eligible for.
    pub fn available_products(&self, vehicle: &Vehicle, client: &ClientData) -> Vec<ProductOffer> {
        let credit = self
            .catalog
            .credit_products
            .iter()
            .map(|p| (p, FinancingType::Credit));
        let leasing = self
            .catalog
            .leasing_products
            .iter()
            .map(|p| (p, FinancingType::Leasing));

        credit
            .chain(leasing)
            .filter(|(product, _)| is_eligible(product, vehicle))
            .filter_map(|(product, financing_type)| {
                self.make_offer(product, financing_type, vehicle, client)
            })
            .collect()
    }

    fn make_offer(
        &self,
        product: &ProductDefinition,
        financing_type: FinancingType,
        vehicle: &Vehicle,
        client: &ClientData,
    ) -> Option<ProductOffer> {
        let params = CalculationParameters::new(
            financing_type,
            vehicle.price,
            vehicle.price * product.min_initial,
            ESTIMATE_TERM_MONTHS.min(product.max_months),
            Some(vehicle.clone()),
        );

        // A product whose estimate cannot be priced is skipped, not an error
        let result = match self.calculator.calculate(&params) {
            Ok(result) => result,
            Err(err) => {
                log::warn!("skipping product {}: estimate failed: {}", product.id, err);
                return None;
            }
        };

        Some(ProductOffer {
            product: product.clone(),
            financing_type,
            monthly_payment: result.monthly_payment,
            rate: result.conditions.base_rate,
            recommendation: recommendation_reason(client, product, financing_type),
        })
    }
}

fn is_eligible(product: &ProductDefinition, vehicle: &Vehicle) -> bool {
    if !product.available_for.contains(&vehicle.category) {
        return false;
    }
    vehicle.price >= product.min_amount && vehicle.price <= product.max_amount
}

fn recommendation_reason(
    client: &ClientData,
    product: &ProductDefinition,
    financing_type: FinancingType,
) -> String {
    let mut reasons = Vec::new();

    if client.monthly_income > HIGH_INCOME_THRESHOLD && product.min_initial >= 0.2 {
        reasons.push("suited to high income");
    }
    if client.experience_months > 24 && financing_type == FinancingType::Credit {
        reasons.push("good credit history");
    }
    if client.employment_type == EmploymentType::BusinessOwner
        && financing_type == FinancingType::Leasing
    {
        reasons.push("leasing tax advantages");
    }

    if reasons.is_empty() {
        "standard offer".to_string()
    } else {
        reasons.join("; ")
    }
}
