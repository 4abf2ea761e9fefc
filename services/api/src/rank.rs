use campus_match::config::AppConfig;
use campus_match::error::AppError;
use campus_match::matching::{
    CandidateImporter, CandidateIngest, Dimension, PriorityPreset, PriorityVector, RankedMatch,
    ScoringEngine,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum PresetArg {
    #[default]
    Balanced,
    BudgetFirst,
}

impl From<PresetArg> for PriorityPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Balanced => PriorityPreset::Balanced,
            PresetArg::BudgetFirst => PriorityPreset::BudgetFirst,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// CSV export with id, kind, label, price, distance_miles, latitude, longitude,
    /// safety_rating, compatibility_rating and compatibility_percent columns
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Starting priority preset; individual weights below override it
    #[arg(long, value_enum, default_value_t = PresetArg::Balanced)]
    pub(crate) preset: PresetArg,
    /// Budget weight (percent)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) budget: Option<i32>,
    /// Commute weight (percent)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) commute: Option<i32>,
    /// Safety weight (percent)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) safety: Option<i32>,
    /// Roommate compatibility weight (percent)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) roommates: Option<i32>,
    /// Only print the best N candidates
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Emit JSON instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

impl RankArgs {
    pub(crate) fn priorities(&self) -> PriorityVector {
        let preset = PriorityPreset::from(self.preset).vector();
        PriorityVector {
            budget: self.budget.unwrap_or(preset.budget),
            commute: self.commute.unwrap_or(preset.commute),
            safety: self.safety.unwrap_or(preset.safety),
            roommates: self.roommates.unwrap_or(preset.roommates),
        }
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let ingest = CandidateIngest::new(config.scoring.campus);
    let engine = ScoringEngine::new(config.scoring.normalization);

    let priorities = args.priorities();
    let candidates = CandidateImporter::from_path(&args.candidates, &ingest)?;
    let mut ranked = engine.rank(&priorities, &candidates);
    if let Some(top) = args.top {
        ranked.truncate(top);
    }

    if let Err(err) = priorities.validate() {
        eprintln!("warning: {err}; rankings are incomplete");
    }

    if args.json {
        let rendered = serde_json::to_string_pretty(&ranked).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_ranking(&priorities, &ranked);
    }

    Ok(())
}

pub(crate) fn render_ranking(priorities: &PriorityVector, ranked: &[RankedMatch]) {
    let weights: Vec<String> = Dimension::ALL
        .iter()
        .map(|dimension| format!("{} {}%", dimension, priorities.get(*dimension)))
        .collect();
    println!("Priorities: {}", weights.join(" | "));

    if ranked.is_empty() {
        println!("No candidates to rank");
        return;
    }

    for (position, entry) in ranked.iter().enumerate() {
        let breakdown = entry.breakdown;
        println!(
            "{:>2}. {} ({}) total {} | budget {} | commute {} | safety {} | roommates {}",
            position + 1,
            entry.candidate.label,
            entry.candidate.id,
            breakdown.total,
            breakdown.budget,
            breakdown.commute,
            breakdown.safety,
            breakdown.roommates
        );
    }
}
