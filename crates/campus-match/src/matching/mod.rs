//! Roommate and housing compatibility matching.
//!
//! Candidates enter through [`CandidateIngest`], are scored by the stateless [`ScoringEngine`]
//! against a user's [`PriorityVector`], and come back ranked. [`MatchingService`] adds the
//! preference repository around that pure pipeline, and [`matching_router`] exposes it over HTTP.

pub mod domain;
pub mod ingest;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Candidate, CandidateAttributes, CandidateId, CandidateKind, CompatibilitySignal, Dimension,
    GeoPoint, PriorityError, PriorityPreset, PriorityVector, UserId,
};
pub use ingest::{CandidateImportError, CandidateImporter, CandidateIngest, CandidateRecord};
pub use repository::{PreferenceError, PreferenceRecord, PreferenceRepository};
pub use router::matching_router;
pub use scoring::{NormalizationConfig, RankedMatch, ScoreBreakdown, ScoringEngine, SubScores};
pub use service::{
    MatchingService, MatchingServiceError, PrioritySource, PriorityView, Recommendations,
};
