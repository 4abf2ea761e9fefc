use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{PriorityVector, UserId};

/// Persisted priorities for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub user_id: UserId,
    pub priorities: PriorityVector,
    pub updated_at: DateTime<Utc>,
}

/// Key-value store for user priorities, kept outside the pure scoring path.
///
/// `set` overwrites unconditionally; concurrent saves for one user resolve as last write wins.
pub trait PreferenceRepository: Send + Sync {
    fn get(&self, user_id: &UserId) -> Result<Option<PreferenceRecord>, PreferenceError>;
    fn set(&self, record: PreferenceRecord) -> Result<(), PreferenceError>;
}

/// Error enumeration for preference store failures.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("preference record not found")]
    NotFound,
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}
