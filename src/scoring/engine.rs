//! Client assessment engine

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rules::ScoringRules;
use super::ScoringEngine;
use crate::calculator::{AnnuityCalculator, ApprovalStatus, CalcError, CalculationParameters};
use crate::client::{ClientData, EmploymentType, ValidationError};

const PRE_APPROVED_SCORE: f64 = 70.0;
const CONDITIONAL_SCORE: f64 = 50.0;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Client(#[from] ValidationError),
    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Scoring outcome: a 0-100 score, the derived decision, and the
/// deductions that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub score: f64,
    pub status: ApprovalStatus,
    pub reasons: Vec<String>,
}

/// Affordability and risk heuristic over client attributes.
///
/// Starts from 100 and applies independent deductions; the score is clamped
/// to [0,100] once at the end, so the payment-to-income deduction is
/// unbounded before the clamp. Re-derives the monthly payment through the
/// payment engine with the caller's own parameters.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedScoring {
    rules: ScoringRules,
    calculator: AnnuityCalculator,
}

impl RuleBasedScoring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ScoringRules) -> Self {
        Self {
            rules,
            calculator: AnnuityCalculator::new(),
        }
    }

    /// Deterministic variant of [`ScoringEngine::assess_client`] with an
    /// injected current year for the age check.
    pub fn assess_client_at(
        &self,
        client: &ClientData,
        params: &CalculationParameters,
        current_year: i32,
    ) -> Result<Assessment, ScoringError> {
        let mut score = 100.0;
        let mut reasons = Vec::new();

        let age = current_year - client.birth_year()?;
        if age < self.rules.min_age {
            score -= 30.0;
            reasons.push(format!("age under {} years", self.rules.min_age));
        } else if age > self.rules.max_age {
            score -= 20.0;
            reasons.push(format!("age over {} years", self.rules.max_age));
        }

        let payment = self
            .calculator
            .calculate_at(params, Local::now())
            .map_err(ScoringError::Calc)?
            .monthly_payment;
        let payment_to_income = payment / client.monthly_income;
        if payment_to_income > self.rules.max_payment_to_income {
            score -= (payment_to_income - self.rules.max_payment_to_income) * 100.0;
            reasons.push(format!(
                "high payment-to-income ratio: {:.1}%",
                payment_to_income * 100.0
            ));
        }

        if client.experience_months < self.rules.min_experience_months {
            score -= 15.0;
            reasons.push(format!(
                "short tenure at current place: {} months",
                client.experience_months
            ));
        }

        match client.employment_type {
            EmploymentType::SelfEmployed => {
                score -= 10.0;
                reasons.push("self-employed, elevated risk".to_string());
            }
            EmploymentType::BusinessOwner => {
                score -= 5.0;
                reasons.push("business owner, moderate risk".to_string());
            }
            EmploymentType::Employed => {}
        }

        let score = score.clamp(0.0, 100.0);
        let status = if score >= PRE_APPROVED_SCORE {
            ApprovalStatus::PreApproved
        } else if score >= CONDITIONAL_SCORE {
            ApprovalStatus::ConditionalApproval
        } else {
            ApprovalStatus::Rejected
        };

        Ok(Assessment {
            score,
            status,
            reasons,
        })
    }
}

impl ScoringEngine for RuleBasedScoring {
    fn assess_client(
        &self,
        client: &ClientData,
        params: &CalculationParameters,
    ) -> Result<Assessment, ScoringError> {
        self.assess_client_at(client, params, Local::now().year())
    }
}
