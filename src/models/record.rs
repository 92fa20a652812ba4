use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved network/email/secret triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub network: String,
    pub email: String,
    pub content: String,
    pub saved_at: DateTime<Utc>,
}

impl Record {
    /// Cells in the order of `constants::RECORD_COLUMNS`.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.network.clone(),
            self.email.clone(),
            self.content.clone(),
            self.saved_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

/// Aggregate figures for the statistics action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VaultStats {
    pub records: u64,
    pub distinct_networks: u64,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}
