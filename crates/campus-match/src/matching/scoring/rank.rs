use std::cmp::Ordering;

use super::RankedMatch;

/// Orders by total descending, then candidate id ascending. The sort is stable, so entries that
/// share both keep their input order. The input is left untouched.
pub(crate) fn rank(scored: &[RankedMatch]) -> Vec<RankedMatch> {
    let mut ranked = scored.to_vec();
    ranked.sort_by(compare);
    ranked
}

fn compare(a: &RankedMatch, b: &RankedMatch) -> Ordering {
    b.breakdown
        .total
        .cmp(&a.breakdown.total)
        .then_with(|| a.candidate.id.cmp(&b.candidate.id))
}
