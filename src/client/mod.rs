//! Client records, input validation, and pseudonymous hashing

mod data;
mod validate;

pub use data::{ClientData, EmploymentType};
pub use validate::ValidationError;

/// Minimum acceptable monthly income
pub const MIN_MONTHLY_INCOME: f64 = 15_000.0;
