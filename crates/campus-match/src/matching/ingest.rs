//! Boundary where loosely shaped candidate rows become typed [`Candidate`] values.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{
    Candidate, CandidateAttributes, CandidateId, CandidateKind, CompatibilitySignal, GeoPoint,
};

/// Candidate as delivered by a listing export or a JSON request body. Every attribute is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: String,
    #[serde(default)]
    pub kind: Option<CandidateKind>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub distance_miles: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub safety_rating: Option<f64>,
    #[serde(default)]
    pub compatibility_rating: Option<f64>,
    #[serde(default)]
    pub compatibility_percent: Option<f64>,
}

/// Resolves defaulting rules once so the scorer only ever sees typed attributes.
#[derive(Debug, Clone, Default)]
pub struct CandidateIngest {
    campus: Option<GeoPoint>,
}

impl CandidateIngest {
    pub fn new(campus: Option<GeoPoint>) -> Self {
        Self { campus }
    }

    pub fn candidate(&self, record: CandidateRecord) -> Candidate {
        let distance_miles =
            finite(record.distance_miles).or_else(|| self.derived_distance(&record));

        let compatibility = finite(record.compatibility_rating)
            .map(CompatibilitySignal::Rating)
            .or_else(|| finite(record.compatibility_percent).map(CompatibilitySignal::Percent));

        let label = record
            .label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| record.id.clone());

        Candidate {
            id: CandidateId(record.id),
            kind: record.kind.unwrap_or_default(),
            label,
            attributes: CandidateAttributes {
                price: finite(record.price),
                distance_miles,
                safety_rating: finite(record.safety_rating),
                compatibility,
            },
        }
    }

    pub fn candidates<I>(&self, records: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = CandidateRecord>,
    {
        records
            .into_iter()
            .map(|record| self.candidate(record))
            .collect()
    }

    fn derived_distance(&self, record: &CandidateRecord) -> Option<f64> {
        let campus = self.campus?;
        let location = GeoPoint {
            latitude: finite(record.latitude)?,
            longitude: finite(record.longitude)?,
        };
        Some(campus.distance_miles(&location))
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

#[derive(Debug)]
pub enum CandidateImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CandidateImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateImportError::Io(err) => write!(f, "failed to read candidate export: {}", err),
            CandidateImportError::Csv(err) => write!(f, "invalid candidate CSV data: {}", err),
        }
    }
}

impl std::error::Error for CandidateImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CandidateImportError::Io(err) => Some(err),
            CandidateImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CandidateImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CandidateImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads candidate CSV exports whose headers match the [`CandidateRecord`] field names.
pub struct CandidateImporter;

impl CandidateImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        ingest: &CandidateIngest,
    ) -> Result<Vec<Candidate>, CandidateImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, ingest)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        ingest: &CandidateIngest,
    ) -> Result<Vec<Candidate>, CandidateImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut candidates = Vec::new();
        for row in csv_reader.deserialize::<CandidateRecord>() {
            candidates.push(ingest.candidate(row?));
        }

        tracing::debug!(count = candidates.len(), "imported candidate rows");
        Ok(candidates)
    }
}
