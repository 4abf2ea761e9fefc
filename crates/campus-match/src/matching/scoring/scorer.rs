use super::super::domain::{Dimension, PriorityVector};
use super::{ScoreBreakdown, SubScores};

/// Tolerance so products that should land exactly on `.5` still round up despite float error.
const HALF_UP_EPSILON: f64 = 1e-9;

/// Applies the weights dimension by dimension, rounding each contribution half-up before summing
/// so the breakdown always adds up to the total.
pub(crate) fn weigh(sub_scores: &SubScores, priorities: &PriorityVector) -> ScoreBreakdown {
    let contribution = |dimension: Dimension| {
        let weight = f64::from(priorities.effective_weight(dimension));
        round_half_up(sub_scores.get(dimension) * weight / 100.0)
    };

    let budget = contribution(Dimension::Budget);
    let commute = contribution(Dimension::Commute);
    let safety = contribution(Dimension::Safety);
    let roommates = contribution(Dimension::Roommates);

    ScoreBreakdown {
        budget,
        commute,
        safety,
        roommates,
        total: budget + commute + safety + roommates,
    }
}

fn round_half_up(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value + 0.5 + HALF_UP_EPSILON).floor() as u32
}
