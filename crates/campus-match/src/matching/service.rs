use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{Candidate, PriorityError, PriorityPreset, PriorityVector, UserId};
use super::ingest::{CandidateIngest, CandidateRecord};
use super::repository::{PreferenceError, PreferenceRecord, PreferenceRepository};
use super::scoring::{RankedMatch, ScoringEngine};
use crate::config::ScoringConfig;

/// Service composing the preference repository with the stateless scoring engine.
pub struct MatchingService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
    ingest: Arc<CandidateIngest>,
    default_preset: PriorityPreset,
}

impl<R> MatchingService<R>
where
    R: PreferenceRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(ScoringEngine::new(config.normalization)),
            ingest: Arc::new(CandidateIngest::new(config.campus)),
            default_preset: PriorityPreset::Balanced,
        }
    }

    /// Preset handed to users who have never saved priorities.
    pub fn with_default_preset(mut self, preset: PriorityPreset) -> Self {
        self.default_preset = preset;
        self
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn ingest(&self) -> &CandidateIngest {
        &self.ingest
    }

    /// Stored priorities, or the default preset when the user has none.
    pub fn priorities(&self, user_id: &UserId) -> Result<PriorityView, MatchingServiceError> {
        let (priorities, source) = match self.repository.get(user_id)? {
            Some(record) => (record.priorities, PrioritySource::Stored),
            None => (self.default_preset.vector(), PrioritySource::Default),
        };

        Ok(PriorityView {
            user_id: user_id.clone(),
            priorities,
            complete: priorities.is_complete(),
            source,
        })
    }

    /// Persist priorities; only vectors totalling exactly 100 are accepted.
    pub fn save_priorities(
        &self,
        user_id: &UserId,
        priorities: PriorityVector,
    ) -> Result<PreferenceRecord, MatchingServiceError> {
        if let Err(err) = priorities.validate() {
            warn!(user = %user_id.0, error = %err, "rejected priority save");
            return Err(err.into());
        }

        let record = PreferenceRecord {
            user_id: user_id.clone(),
            priorities,
            updated_at: Utc::now(),
        };
        self.repository.set(record.clone())?;

        info!(
            user = %user_id.0,
            budget = priorities.budget,
            commute = priorities.commute,
            safety = priorities.safety,
            roommates = priorities.roommates,
            "saved priorities"
        );
        Ok(record)
    }

    /// Rank raw records for a user using their current priorities.
    pub fn recommend(
        &self,
        user_id: &UserId,
        records: Vec<CandidateRecord>,
    ) -> Result<Recommendations, MatchingServiceError> {
        let candidates = self.ingest.candidates(records);
        self.recommend_candidates(user_id, &candidates)
    }

    pub fn recommend_candidates(
        &self,
        user_id: &UserId,
        candidates: &[Candidate],
    ) -> Result<Recommendations, MatchingServiceError> {
        let view = self.priorities(user_id)?;
        let matches = self.engine.rank(&view.priorities, candidates);

        let warning = match view.priorities.validate() {
            Ok(()) => None,
            Err(err) => Some(format!("recommendations are incomplete: {err}")),
        };

        debug!(
            user = %user_id.0,
            candidates = candidates.len(),
            complete = view.complete,
            top_total = matches.first().map(RankedMatch::total),
            "ranked candidates"
        );

        Ok(Recommendations {
            user_id: user_id.clone(),
            priorities: view.priorities,
            complete: view.complete,
            warning,
            matches,
        })
    }

    /// Stateless scoring for callers that hold their own priorities.
    pub fn score(&self, priorities: &PriorityVector, candidates: &[Candidate]) -> Vec<RankedMatch> {
        self.engine.rank(priorities, candidates)
    }
}

/// Where a user's priorities came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrioritySource {
    Stored,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityView {
    pub user_id: UserId,
    pub priorities: PriorityVector,
    pub complete: bool,
    pub source: PrioritySource,
}

/// Ranked matches plus the completeness flag the UI uses to gate display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub user_id: UserId,
    pub priorities: PriorityVector,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub matches: Vec<RankedMatch>,
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    InvalidPriorities(#[from] PriorityError),
    #[error(transparent)]
    Repository(#[from] PreferenceError),
}
