mod config;
mod normalize;
mod rank;
mod scorer;

pub use config::NormalizationConfig;

use super::domain::{Candidate, CandidateAttributes, Dimension, PriorityVector};
use serde::{Deserialize, Serialize};

/// Stateless scorer running `normalize → weigh → rank` with a fixed normalization config.
///
/// Every method is a pure function of its arguments, so one engine can be shared across threads
/// and re-run on every slider change.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: NormalizationConfig,
}

impl ScoringEngine {
    pub fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    pub fn normalize(&self, attributes: &CandidateAttributes) -> SubScores {
        normalize::normalize(attributes, &self.config)
    }

    pub fn score(&self, priorities: &PriorityVector, candidate: &Candidate) -> ScoreBreakdown {
        let sub_scores = self.normalize(&candidate.attributes);
        scorer::weigh(&sub_scores, priorities)
    }

    /// Scores every candidate and returns them best first.
    pub fn rank(&self, priorities: &PriorityVector, candidates: &[Candidate]) -> Vec<RankedMatch> {
        let scored: Vec<RankedMatch> = candidates
            .iter()
            .map(|candidate| RankedMatch {
                candidate: candidate.clone(),
                breakdown: self.score(priorities, candidate),
            })
            .collect();

        rank::rank(&scored)
    }

    /// Re-orders already scored matches without rescoring them.
    pub fn order(scored: &[RankedMatch]) -> Vec<RankedMatch> {
        rank::rank(scored)
    }
}

/// Normalized 0–100 goodness per dimension, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub budget: f64,
    pub commute: f64,
    pub safety: f64,
    pub roommates: f64,
}

impl SubScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Budget => self.budget,
            Dimension::Commute => self.commute,
            Dimension::Safety => self.safety,
            Dimension::Roommates => self.roommates,
        }
    }
}

/// Per-dimension points; `total` is always their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub budget: u32,
    pub commute: u32,
    pub safety: u32,
    pub roommates: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    pub fn contribution(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Budget => self.budget,
            Dimension::Commute => self.commute,
            Dimension::Safety => self.safety,
            Dimension::Roommates => self.roommates,
        }
    }
}

/// A candidate paired with its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub candidate: Candidate,
    pub breakdown: ScoreBreakdown,
}

impl RankedMatch {
    pub fn total(&self) -> u32 {
        self.breakdown.total
    }
}
