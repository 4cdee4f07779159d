//! Client data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::validate::{self, ValidationError};

/// Employment category, feeds the scoring deductions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Employed,
    SelfEmployed,
    BusinessOwner,
}

/// Personal and financial attributes of a financing applicant.
///
/// Constructed once per calculation request from an external source and
/// treated as immutable. The raw passport and birth-date fields never leave
/// the record; collaborators key external storage on [`ClientData::client_hash`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientData {
    /// Surname, given name, and patronymic, single-space separated
    pub full_name: String,
    /// `dd.mm.yyyy`
    pub birth_date: String,
    /// 4-digit passport series
    pub passport_series: String,
    /// 6-digit passport number
    pub passport_number: String,
    pub phone: String,
    pub email: String,
    pub monthly_income: f64,
    pub employment_type: EmploymentType,
    /// Tenure at the current place of work, in months
    pub experience_months: u32,
}

impl ClientData {
    /// Check the record against the input policy: name and passport
    /// patterns, birth-date format, and the minimum-income floor.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_client(self)
    }

    /// Birth year parsed from the `dd.mm.yyyy` birth date.
    pub fn birth_year(&self) -> Result<i32, ValidationError> {
        self.birth_date
            .rsplit('.')
            .next()
            .and_then(|y| y.parse().ok())
            .ok_or(ValidationError::MalformedBirthDate)
    }

    /// Pseudonymous identifier: first 16 hex characters of the SHA-256
    /// digest over passport series, number, and birth date.
    pub fn client_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.passport_series.as_bytes());
        hasher.update(self.passport_number.as_bytes());
        hasher.update(self.birth_date.as_bytes());
        let digest = hasher.finalize();

        hex::encode(&digest[..8])
    }
}
