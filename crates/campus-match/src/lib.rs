//! Weighted roommate and housing compatibility scoring.
//!
//! The [`matching`] module hosts the pure `normalize → score → rank` pipeline together with the
//! preference repository seam, the matching service and its HTTP router.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
