use campus_match::matching::{PreferenceError, PreferenceRecord, PreferenceRepository, UserId};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local preference store; a restart forgets every saved vector.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPreferenceRepository {
    records: Arc<Mutex<HashMap<UserId, PreferenceRecord>>>,
}

impl PreferenceRepository for InMemoryPreferenceRepository {
    fn get(&self, user_id: &UserId) -> Result<Option<PreferenceRecord>, PreferenceError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| PreferenceError::Unavailable("preference lock poisoned".to_string()))?;
        Ok(guard.get(user_id).cloned())
    }

    fn set(&self, record: PreferenceRecord) -> Result<(), PreferenceError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| PreferenceError::Unavailable("preference lock poisoned".to_string()))?;
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }
}
