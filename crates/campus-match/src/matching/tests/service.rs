use std::sync::Arc;

use super::common::*;
use crate::matching::domain::{Dimension, PriorityError, PriorityPreset, PriorityVector};
use crate::matching::repository::{PreferenceError, PreferenceRecord, PreferenceRepository};
use crate::matching::{MatchingService, MatchingServiceError, PrioritySource};

#[test]
fn unknown_user_gets_balanced_default() {
    let (service, _) = build_service();

    let view = service.priorities(&user()).expect("priorities load");

    assert_eq!(view.priorities, PriorityVector::new(25, 25, 25, 25));
    assert_eq!(view.source, PrioritySource::Default);
    assert!(view.complete);
}

#[test]
fn default_preset_is_configurable() {
    let (service, _) = build_service();
    let service = service.with_default_preset(PriorityPreset::BudgetFirst);

    let view = service.priorities(&user()).expect("priorities load");

    assert_eq!(view.priorities, budget_first());
}

#[test]
fn saved_priorities_are_returned() {
    let (service, repository) = build_service();

    let record = service
        .save_priorities(&user(), budget_first())
        .expect("valid vector saves");

    assert_eq!(record.priorities, budget_first());
    assert_eq!(repository.writes_for(&user()), Some(record));
    let view = service.priorities(&user()).expect("priorities load");
    assert_eq!(view.source, PrioritySource::Stored);
    assert_eq!(view.priorities, budget_first());
}

#[test]
fn rejects_vectors_not_totalling_one_hundred() {
    let (service, repository) = build_service();

    let err = service
        .save_priorities(&user(), PriorityVector::new(40, 30, 20, 5))
        .expect_err("95% is rejected");

    assert!(matches!(
        err,
        MatchingServiceError::InvalidPriorities(PriorityError::SumMismatch { sum: 95 })
    ));
    assert!(repository.writes_for(&user()).is_none());
}

#[test]
fn rejects_negative_components_even_when_sum_matches() {
    let (service, _) = build_service();

    let err = service
        .save_priorities(&user(), PriorityVector::new(-10, 50, 30, 30))
        .expect_err("negative weight is rejected");

    assert!(matches!(
        err,
        MatchingServiceError::InvalidPriorities(PriorityError::OutOfRange {
            dimension: Dimension::Budget,
            value: -10,
        })
    ));
}

#[test]
fn last_write_wins() {
    let (service, _) = build_service();

    service
        .save_priorities(&user(), budget_first())
        .expect("first save");
    service
        .save_priorities(&user(), PriorityVector::new(10, 10, 10, 70))
        .expect("second save");

    let view = service.priorities(&user()).expect("priorities load");
    assert_eq!(view.priorities, PriorityVector::new(10, 10, 10, 70));
}

#[test]
fn recommendations_use_stored_priorities() {
    let (service, _) = build_service();
    service
        .save_priorities(&user(), budget_first())
        .expect("save");

    let recommendations = service
        .recommend_candidates(&user(), &[candidate_b(), candidate_a()])
        .expect("recommendations");

    assert!(recommendations.complete);
    assert!(recommendations.warning.is_none());
    assert_eq!(recommendations.priorities, budget_first());
    assert_eq!(recommendations.matches[0].total(), 87);
    assert_eq!(recommendations.matches[1].total(), 45);
}

#[test]
fn incomplete_stored_priorities_flag_recommendations() {
    let (service, repository) = build_service();
    repository
        .set(PreferenceRecord {
            user_id: user(),
            priorities: PriorityVector::new(40, 30, 0, 0),
            updated_at: chrono::Utc::now(),
        })
        .expect("seed partial vector");

    let recommendations = service
        .recommend_candidates(&user(), &[candidate_a()])
        .expect("recommendations");

    assert!(!recommendations.complete);
    let warning = recommendations.warning.expect("warning present");
    assert!(warning.contains("70%"), "{warning}");
    assert_eq!(recommendations.matches.len(), 1);
    assert_eq!(recommendations.matches[0].total(), 60);
}

#[test]
fn recommend_ingests_records_with_campus_distance() {
    let (service, _) = build_service();
    let mut near = record("near");
    near.distance_miles = None;
    near.latitude = Some(41.6611);
    near.longitude = Some(-91.5302);
    let mut unknown = record("unknown");
    unknown.distance_miles = None;

    let recommendations = service
        .recommend(&user(), vec![unknown, near])
        .expect("recommendations");

    let first = &recommendations.matches[0];
    assert_eq!(first.candidate.id.0, "near");
    assert_eq!(first.breakdown.commute, 25);
    assert_eq!(recommendations.matches[1].breakdown.commute, 0);
}

#[test]
fn repository_failures_surface() {
    let service = MatchingService::new(Arc::new(UnavailablePreferences), scoring_config());

    let err = service
        .recommend_candidates(&user(), &[candidate_a()])
        .expect_err("store offline");

    assert!(matches!(
        err,
        MatchingServiceError::Repository(PreferenceError::Unavailable(_))
    ));
}
