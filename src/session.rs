//! Quote assembly: wires the calculator, scoring, and catalog matcher into
//! a single result. Owns no business rules of its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::{
    AnnuityCalculator, CalcError, CalculationParameters, CalculationResult, Calculator,
    ParameterError,
};
use crate::catalog::{ProductCatalog, ProductMatcher, ProductOffer};
use crate::client::{ClientData, ValidationError};
use crate::scoring::{Assessment, RuleBasedScoring, ScoringEngine, ScoringError};
use crate::vehicle::{Vehicle, VehicleError};

/// Fully-formed input for one quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub client: ClientData,
    pub vehicle: Vehicle,
    pub parameters: CalculationParameters,
}

/// Everything a collaborator needs to present or persist a quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingQuote {
    pub result: CalculationResult,
    pub assessment: Assessment,
    pub offers: Vec<ProductOffer>,
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("invalid client data: {0}")]
    Client(#[from] ValidationError),
    #[error("invalid vehicle: {0}")]
    Vehicle(#[from] VehicleError),
    #[error("invalid parameters: {0}")]
    Parameters(#[from] ParameterError),
    #[error("calculation failed: {0}")]
    Calculation(#[from] CalcError),
    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

/// One financing session: calculator, scoring engine, and product matcher
/// composed over a shared catalog.
#[derive(Debug, Clone)]
pub struct FinanceSession {
    calculator: AnnuityCalculator,
    scoring: RuleBasedScoring,
    matcher: ProductMatcher,
}

impl Default for FinanceSession {
    fn default() -> Self {
        Self::with_catalog(ProductCatalog::default())
    }
}

impl FinanceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: ProductCatalog) -> Self {
        Self {
            calculator: AnnuityCalculator::new(),
            scoring: RuleBasedScoring::new(),
            matcher: ProductMatcher::new(catalog),
        }
    }

    /// Run the full flow: validate inputs, calculate terms, assess the
    /// client, and collect alternative offers.
    ///
    /// A rejected score is a normal outcome carried in the quote's approval
    /// fields, not an error; the caller decides how to proceed.
    pub fn quote(&self, request: &QuoteRequest) -> Result<FinancingQuote, QuoteError> {
        request.client.validate()?;
        request.vehicle.validate()?;
        self.calculator.validate_parameters(&request.parameters)?;

        let mut result = self.calculator.calculate(&request.parameters)?;

        let assessment = self
            .scoring
            .assess_client(&request.client, &request.parameters)?;
        result.set_approval(assessment.status, assessment.score / 100.0);

        let offers = self
            .matcher
            .available_products(&request.vehicle, &request.client);

        Ok(FinancingQuote {
            result,
            assessment,
            offers,
        })
    }
}
