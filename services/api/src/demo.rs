use crate::infra::InMemoryPreferenceRepository;
use crate::rank::render_ranking;
use campus_match::config::AppConfig;
use campus_match::error::AppError;
use campus_match::matching::{
    CandidateKind, CandidateRecord, MatchingService, PriorityPreset, PriorityVector, UserId,
};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// User id to save demo priorities under
    #[arg(long, default_value = "demo-student")]
    pub(crate) user: String,
    /// Skip the rejected-save and incomplete-priorities walkthrough
    #[arg(long)]
    pub(crate) skip_validation: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        user,
        skip_validation,
    } = args;

    let config = AppConfig::load()?;
    let repository = Arc::new(InMemoryPreferenceRepository::default());
    let service = MatchingService::new(repository, config.scoring.clone());
    let user_id = UserId(user);

    println!("Campus match demo");
    let view = service.priorities(&user_id)?;
    println!(
        "- {} starts with {:?} priorities (complete: {})",
        user_id.0, view.source, view.complete
    );

    let record = service.save_priorities(&user_id, PriorityPreset::BudgetFirst.vector())?;
    println!(
        "- Saved budget-first priorities at {}",
        record.updated_at.to_rfc3339()
    );

    let recommendations = service.recommend(&user_id, demo_candidates())?;
    println!("\nRecommendations");
    render_ranking(&recommendations.priorities, &recommendations.matches);

    if skip_validation {
        return Ok(());
    }

    println!("\nPriority validation");
    let draft = PriorityVector::new(40, 30, 20, 5);
    match service.save_priorities(&user_id, draft) {
        Ok(_) => println!("- Draft unexpectedly accepted"),
        Err(err) => println!("- Draft rejected: {err}"),
    }

    let preview = service.score(&draft, &service.ingest().candidates(demo_candidates()));
    if let Some(best) = preview.first() {
        println!(
            "- Preview with the draft still ranks {} first (total {}), but the UI marks it incomplete",
            best.candidate.label,
            best.total()
        );
    }

    Ok(())
}

fn demo_candidates() -> Vec<CandidateRecord> {
    vec![
        CandidateRecord {
            id: "riverside-studio".to_string(),
            kind: Some(CandidateKind::Property),
            label: Some("Riverside Studio".to_string()),
            price: Some(950.0),
            distance_miles: Some(1.2),
            safety_rating: Some(8.9),
            compatibility_rating: Some(9.1),
            ..CandidateRecord::default()
        },
        CandidateRecord {
            id: "eastside-2b".to_string(),
            kind: Some(CandidateKind::Property),
            label: Some("Eastside Two Bed".to_string()),
            price: Some(1800.0),
            distance_miles: Some(2.5),
            safety_rating: Some(7.8),
            compatibility_rating: Some(6.2),
            ..CandidateRecord::default()
        },
        CandidateRecord {
            id: "jordan".to_string(),
            kind: Some(CandidateKind::Roommate),
            label: Some("Jordan (sublet share)".to_string()),
            price: Some(725.0),
            distance_miles: Some(0.8),
            compatibility_percent: Some(78.0),
            ..CandidateRecord::default()
        },
    ]
}
