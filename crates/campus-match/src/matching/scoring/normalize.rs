use super::super::domain::CandidateAttributes;
use super::config::NormalizationConfig;
use super::SubScores;

const MAX_SCORE: f64 = 100.0;

pub(crate) fn normalize(attributes: &CandidateAttributes, config: &NormalizationConfig) -> SubScores {
    SubScores {
        budget: budget_score(attributes.price, config),
        commute: commute_score(attributes.distance_miles, config),
        safety: rating_score(attributes.safety_rating),
        roommates: rating_score(
            attributes
                .compatibility
                .map(|signal| signal.as_rating()),
        ),
    }
}

pub(crate) fn budget_score(price: Option<f64>, config: &NormalizationConfig) -> f64 {
    let Some(price) = usable(price) else {
        return 0.0;
    };
    if !(config.price_scale.is_finite() && config.price_scale > 0.0) {
        return 0.0;
    }

    clamp_score(MAX_SCORE - (price - config.baseline_price) / config.price_scale)
}

pub(crate) fn commute_score(distance_miles: Option<f64>, config: &NormalizationConfig) -> f64 {
    let Some(distance) = usable(distance_miles) else {
        return 0.0;
    };
    let penalty = config.distance_penalty_per_mile.max(0.0);

    clamp_score(MAX_SCORE - distance * penalty)
}

/// Ratings on a 0–10 scale.
pub(crate) fn rating_score(rating: Option<f64>) -> f64 {
    usable(rating)
        .map(|rating| clamp_score(rating * 10.0))
        .unwrap_or(0.0)
}

/// Missing, negative and NaN inputs are unusable.
fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite() && *value >= 0.0)
}

fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_SCORE)
    } else {
        0.0
    }
}
