//! @acp:module "Score Breakdown"
//! @acp:summary "Per-category score, weight share and contribution to the tree score"
//! @acp:domain scoring
//! @acp:layer logic

use serde::Serialize;

use super::{category_score, category_weight, Weighting};
use crate::model::FactorTree;

/// One category's part in a tree score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub id: String,
    pub name: String,
    /// None for categories without factors
    pub score: Option<f64>,
    pub weight: f64,
    /// Fraction of the total weight, 0-1
    pub share: f64,
    /// `score * share`; contributions add up to the tree score
    pub contribution: f64,
    /// User view only: a score override or a weight away from market
    pub overridden: bool,
}

/// @acp:summary "Break a tree score down by category"
///
/// Excluded categories (no factors) are listed with zero share so consumers
/// can still render them.
pub fn breakdown(tree: &FactorTree, weighting: Weighting) -> Vec<CategoryBreakdown> {
    let scored: Vec<_> = tree
        .iter()
        .map(|c| (c, category_score(c, weighting), category_weight(c, weighting)))
        .collect();

    // scaled by the largest weight so the sum cannot overflow
    let scale = scored
        .iter()
        .filter(|(_, score, _)| score.is_some())
        .map(|(_, _, w)| *w)
        .fold(0.0, f64::max);
    let total_weight: f64 = if scale > 0.0 && scale.is_finite() {
        scored
            .iter()
            .filter(|(_, score, _)| score.is_some())
            .map(|(_, _, w)| w / scale)
            .sum()
    } else {
        0.0
    };

    scored
        .into_iter()
        .map(|(category, score, weight)| {
            let share = match score {
                Some(_) if total_weight > 0.0 => (weight / scale) / total_weight,
                _ => 0.0,
            };
            CategoryBreakdown {
                id: category.id.clone(),
                name: category.name.clone(),
                score,
                weight,
                share,
                contribution: score.unwrap_or(0.0) * share,
                overridden: matches!(weighting, Weighting::User(_))
                    && (category.has_overrides() || category.is_reweighted()),
            }
        })
        .collect()
}
