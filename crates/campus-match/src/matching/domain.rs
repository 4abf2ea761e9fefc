use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for the user owning a set of priorities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Stable identifier of a roommate or property candidate; also the ranking tie-break key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four dimensions a user weighs against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Budget,
    Commute,
    Safety,
    Roommates,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Budget,
        Dimension::Commute,
        Dimension::Safety,
        Dimension::Roommates,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Budget => "budget",
            Dimension::Commute => "commute",
            Dimension::Safety => "safety",
            Dimension::Roommates => "roommates",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-chosen percentages for each dimension.
///
/// Components are stored as entered so that partially edited vectors (negative, above 100, or not
/// summing to 100) stay representable. Scoring goes through [`PriorityVector::effective_weight`];
/// saving goes through [`PriorityVector::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityVector {
    pub budget: i32,
    pub commute: i32,
    pub safety: i32,
    pub roommates: i32,
}

impl PriorityVector {
    pub const REQUIRED_TOTAL: i32 = 100;

    pub fn new(budget: i32, commute: i32, safety: i32, roommates: i32) -> Self {
        Self {
            budget,
            commute,
            safety,
            roommates,
        }
    }

    pub fn get(&self, dimension: Dimension) -> i32 {
        match dimension {
            Dimension::Budget => self.budget,
            Dimension::Commute => self.commute,
            Dimension::Safety => self.safety,
            Dimension::Roommates => self.roommates,
        }
    }

    /// Raw weight clamped to `0..=100`.
    pub fn effective_weight(&self, dimension: Dimension) -> u32 {
        self.get(dimension).clamp(0, Self::REQUIRED_TOTAL) as u32
    }

    /// Sum of the raw components, widened so extreme edits cannot overflow.
    pub fn sum(&self) -> i64 {
        Dimension::ALL
            .iter()
            .map(|dimension| i64::from(self.get(*dimension)))
            .sum()
    }

    pub fn validate(&self) -> Result<(), PriorityError> {
        for dimension in Dimension::ALL {
            let value = self.get(dimension);
            if !(0..=Self::REQUIRED_TOTAL).contains(&value) {
                return Err(PriorityError::OutOfRange { dimension, value });
            }
        }

        let sum = self.sum();
        if sum != i64::from(Self::REQUIRED_TOTAL) {
            return Err(PriorityError::SumMismatch { sum });
        }

        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for PriorityVector {
    fn default() -> Self {
        PriorityPreset::Balanced.vector()
    }
}

/// Starting points offered before a user has tuned anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityPreset {
    Balanced,
    BudgetFirst,
}

impl PriorityPreset {
    pub fn vector(&self) -> PriorityVector {
        match self {
            PriorityPreset::Balanced => PriorityVector::new(25, 25, 25, 25),
            PriorityPreset::BudgetFirst => PriorityVector::new(40, 30, 20, 10),
        }
    }
}

/// Reasons a priority vector cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriorityError {
    #[error("{dimension} weight {value} is outside 0..=100")]
    OutOfRange { dimension: Dimension, value: i32 },
    #[error("priorities total {sum}% but must total 100%")]
    SumMismatch { sum: i64 },
}

/// Whether the candidate is a person to share with or a place to live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Roommate,
    #[default]
    Property,
}

/// Compatibility as delivered by the upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scale", content = "value", rename_all = "snake_case")]
pub enum CompatibilitySignal {
    /// Rating on a 0–10 scale.
    Rating(f64),
    /// Percentage on a 0–100 scale.
    Percent(f64),
}

impl CompatibilitySignal {
    /// Expresses the signal on the 0–10 rating scale.
    pub fn as_rating(&self) -> f64 {
        match self {
            CompatibilitySignal::Rating(rating) => *rating,
            CompatibilitySignal::Percent(percent) => percent / 10.0,
        }
    }
}

/// Raw attributes; `None` means the source did not supply a usable value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateAttributes {
    pub price: Option<f64>,
    pub distance_miles: Option<f64>,
    pub safety_rating: Option<f64>,
    pub compatibility: Option<CompatibilitySignal>,
}

/// A roommate or property being scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub kind: CandidateKind,
    pub label: String,
    pub attributes: CandidateAttributes,
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    const EARTH_RADIUS_MILES: f64 = 3958.8;

    /// Great-circle (haversine) distance in miles.
    pub fn distance_miles(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Self::EARTH_RADIUS_MILES * c
    }
}
