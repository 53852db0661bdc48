//! The margin-plus-floor abstention rule.

use tracing::debug;

use crate::ranking::RankedScore;

use super::config::Thresholds;
use super::types::Classification;

/// Gap between the best and second-best score; a missing runner-up counts as 0.
pub fn margin(ranked: &[RankedScore]) -> f32 {
    match ranked {
        [] => 0.0,
        [top] => top.score,
        [top, second, ..] => top.score - second.score,
    }
}

/// Applies the abstention policy to a descending ranked list.
///
/// Accepts the top category only when the margin exceeds `thresholds.margin`
/// and the best score reaches `thresholds.absolute`; abstains otherwise,
/// including on an empty or NaN ranking.
pub fn decide(ranked: &[RankedScore], thresholds: &Thresholds) -> Classification {
    let Some(top) = ranked.first() else {
        return Classification::abstain(0.0);
    };

    let margin = margin(ranked);

    // Written as the accept condition so a NaN score never passes.
    if margin > thresholds.margin && top.score >= thresholds.absolute {
        return Classification::accept(top.category.clone(), top.score);
    }

    debug!(
        top = %top.category,
        top_score = top.score,
        margin,
        margin_threshold = thresholds.margin,
        absolute_threshold = thresholds.absolute,
        "Abstaining"
    );
    Classification::abstain(margin)
}
