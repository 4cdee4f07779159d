//! File-backed persistence collaborator.
//!
//! Saves serialized calculation results and keeps a short per-client
//! history keyed by the pseudonymous client hash. Lives outside the core:
//! callers invoke it strictly after the calculation flow.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::{ApprovalStatus, CalculationResult, FinancingType};
use crate::client::ClientData;

/// Most recent calculations retained per client
const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One line of a client's calculation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub calculation_id: String,
    pub created_at: DateTime<Local>,
    pub financing_type: FinancingType,
    pub amount: f64,
    pub monthly_payment: f64,
    pub approval_status: ApprovalStatus,
}

/// Directory-backed result store.
///
/// Results land in `calculation_<id>.json`; the per-client index in
/// `history_<hash>.json`, newest first, capped at [`HISTORY_LIMIT`].
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist a result and index it under the client's hash. Returns the
    /// path of the written result document.
    pub fn save(
        &self,
        client: &ClientData,
        financing_type: FinancingType,
        amount: f64,
        result: &CalculationResult,
    ) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.root)?;

        let result_path = self
            .root
            .join(format!("calculation_{}.json", result.calculation_id));
        fs::write(&result_path, serde_json::to_string_pretty(result)?)?;

        let entry = HistoryEntry {
            calculation_id: result.calculation_id.clone(),
            created_at: Local::now(),
            financing_type,
            amount,
            monthly_payment: result.monthly_payment,
            approval_status: result.approval_status,
        };
        self.push_history(&client.client_hash(), entry)?;

        log::info!(
            "saved calculation {} to {}",
            result.calculation_id,
            result_path.display()
        );
        Ok(result_path)
    }

    /// The client's saved calculations, newest first, at most
    /// [`HISTORY_LIMIT`]. An unknown hash yields an empty history.
    pub fn client_history(&self, client_hash: &str) -> Result<Vec<HistoryEntry>, StoreError> {
        let path = self.history_path(client_hash);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn push_history(&self, client_hash: &str, entry: HistoryEntry) -> Result<(), StoreError> {
        let mut history = self.client_history(client_hash)?;
        history.insert(0, entry);
        history.truncate(HISTORY_LIMIT);

        fs::write(
            self.history_path(client_hash),
            serde_json::to_string_pretty(&history)?,
        )?;
        Ok(())
    }

    fn history_path(&self, client_hash: &str) -> PathBuf {
        self.root.join(format!("history_{client_hash}.json"))
    }
}

impl AsRef<Path> for FileStore {
    fn as_ref(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{AnnuityCalculator, CalculationParameters};
    use crate::client::EmploymentType;
    use chrono::{Duration, Local};

    fn client() -> ClientData {
        ClientData {
            full_name: "Иванов Иван Иванович".to_string(),
            birth_date: "14.06.1988".to_string(),
            passport_series: "4512".to_string(),
            passport_number: "123456".to_string(),
            phone: "+79161234567".to_string(),
            email: "ivanov@example.com".to_string(),
            monthly_income: 95_000.0,
            employment_type: EmploymentType::Employed,
            experience_months: 36,
        }
    }

    fn result_at(seconds_offset: i64) -> CalculationResult {
        let calc = AnnuityCalculator::new();
        let params = CalculationParameters::new(
            FinancingType::Credit,
            1_000_000.0,
            200_000.0,
            36,
            None,
        );
        // Distinct instants yield distinct calculation ids
        calc.calculate_at(&params, Local::now() + Duration::seconds(seconds_offset))
            .unwrap()
    }

    #[test]
    fn test_save_and_read_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let client = client();

        let result = result_at(0);
        let path = store
            .save(&client, FinancingType::Credit, 1_000_000.0, &result)
            .unwrap();
        assert!(path.exists());

        let history = store.client_history(&client.client_hash()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].calculation_id, result.calculation_id);
        assert_eq!(history[0].monthly_payment, result.monthly_payment);
    }

    #[test]
    fn test_history_newest_first_and_capped() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let client = client();

        let mut last_id = String::new();
        for i in 0..12 {
            let result = result_at(i);
            store
                .save(&client, FinancingType::Credit, 1_000_000.0, &result)
                .unwrap();
            last_id = result.calculation_id.clone();
        }

        let history = store.client_history(&client.client_hash()).unwrap();
        assert_eq!(history.len(), 10);
        // The latest save leads
        assert_eq!(history[0].calculation_id, last_id);
    }

    #[test]
    fn test_unknown_client_has_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.client_history("deadbeefdeadbeef").unwrap().is_empty());
    }
}
