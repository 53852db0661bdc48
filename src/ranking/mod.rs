//! Cosine ranking of an embedding against registry centroids.


use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::registry::CategoryRegistry;

/// One category's similarity to the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedScore {
    pub category: String,
    pub score: f32,
}

impl RankedScore {
    pub fn new(category: impl Into<String>, score: f32) -> Self {
        Self {
            category: category.into(),
            score,
        }
    }
}

/// Cosine similarity; 0.0 for mismatched lengths, empty input or zero norms.
///
/// Accumulates in `f64` so large-magnitude vectors do not overflow.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&av, &bv)| {
            let (av, bv) = (f64::from(av), f64::from(bv));
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot / (norm_a * norm_b);
    if score.is_finite() {
        score.clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}

/// Scores every category and sorts descending.
///
/// The sort is stable, so equal scores keep registry insertion order.
pub fn rank(embedding: &[f32], registry: &CategoryRegistry) -> Vec<RankedScore> {
    let mut ranked: Vec<RankedScore> = registry
        .iter()
        .map(|category| {
            RankedScore::new(
                category.name(),
                cosine_similarity(embedding, category.centroid()),
            )
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    debug!(
        categories = ranked.len(),
        top = ranked.first().map(|r| r.category.as_str()),
        top_score = ranked.first().map(|r| r.score),
        "Ranked categories"
    );

    ranked
}
