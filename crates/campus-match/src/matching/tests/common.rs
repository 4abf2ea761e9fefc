use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::ScoringConfig;
use crate::matching::domain::{
    Candidate, CandidateAttributes, CandidateId, CandidateKind, CompatibilitySignal, GeoPoint,
    PriorityVector, UserId,
};
use crate::matching::ingest::CandidateRecord;
use crate::matching::repository::{PreferenceError, PreferenceRecord, PreferenceRepository};
use crate::matching::scoring::{NormalizationConfig, ScoringEngine};
use crate::matching::{matching_router, MatchingService};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(NormalizationConfig::default())
}

pub(super) fn budget_first() -> PriorityVector {
    PriorityVector::new(40, 30, 20, 10)
}

pub(super) fn candidate(
    id: &str,
    price: f64,
    distance_miles: f64,
    safety_rating: f64,
    compatibility_rating: f64,
) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        kind: CandidateKind::Property,
        label: format!("Listing {id}"),
        attributes: CandidateAttributes {
            price: Some(price),
            distance_miles: Some(distance_miles),
            safety_rating: Some(safety_rating),
            compatibility: Some(CompatibilitySignal::Rating(compatibility_rating)),
        },
    }
}

/// Close-in, well-rated studio near the engineering quad.
pub(super) fn candidate_a() -> Candidate {
    candidate("a", 950.0, 1.2, 8.9, 9.1)
}

/// Pricier two-bed further from campus.
pub(super) fn candidate_b() -> Candidate {
    candidate("b", 1800.0, 2.5, 7.8, 6.2)
}

pub(super) fn campus() -> GeoPoint {
    GeoPoint {
        latitude: 41.6611,
        longitude: -91.5302,
    }
}

pub(super) fn record(id: &str) -> CandidateRecord {
    CandidateRecord {
        id: id.to_string(),
        kind: Some(CandidateKind::Roommate),
        label: Some(format!("Roommate {id}")),
        price: Some(700.0),
        distance_miles: Some(0.5),
        safety_rating: Some(9.0),
        compatibility_rating: Some(8.0),
        ..CandidateRecord::default()
    }
}

pub(super) fn user() -> UserId {
    UserId("student-42".to_string())
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig {
        normalization: NormalizationConfig::default(),
        campus: Some(campus()),
    }
}

pub(super) fn build_service() -> (MatchingService<MemoryPreferences>, Arc<MemoryPreferences>) {
    let repository = Arc::new(MemoryPreferences::default());
    let service = MatchingService::new(repository.clone(), scoring_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryPreferences {
    pub(super) records: Arc<Mutex<HashMap<UserId, PreferenceRecord>>>,
}

impl MemoryPreferences {
    pub(super) fn writes_for(&self, user_id: &UserId) -> Option<PreferenceRecord> {
        self.records
            .lock()
            .expect("preference mutex poisoned")
            .get(user_id)
            .cloned()
    }
}

impl PreferenceRepository for MemoryPreferences {
    fn get(&self, user_id: &UserId) -> Result<Option<PreferenceRecord>, PreferenceError> {
        let guard = self.records.lock().expect("preference mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn set(&self, record: PreferenceRecord) -> Result<(), PreferenceError> {
        let mut guard = self.records.lock().expect("preference mutex poisoned");
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }
}

pub(super) struct UnavailablePreferences;

impl PreferenceRepository for UnavailablePreferences {
    fn get(&self, _user_id: &UserId) -> Result<Option<PreferenceRecord>, PreferenceError> {
        Err(PreferenceError::Unavailable("preference store offline".to_string()))
    }

    fn set(&self, _record: PreferenceRecord) -> Result<(), PreferenceError> {
        Err(PreferenceError::Unavailable("preference store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: MatchingService<MemoryPreferences>) -> axum::Router {
    matching_router(Arc::new(service))
}
