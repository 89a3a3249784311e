//! @acp:module "Scoring Engine"
//! @acp:summary "Reduce a factor tree to a single 0-100 bubble score"
//! @acp:domain scoring
//! @acp:layer logic
//!
//! Category scores are unweighted means of their factors. The tree score is a
//! weighted mean of category scores, using `marketWeight` for the market view
//! and `userWeight` for the user view. Categories without factors are left
//! out of both numerator and denominator.

pub mod breakdown;

use serde::Serialize;

use crate::model::{clamp_user_weight, clamp_value, Category, EditMode, FactorTree, VALUE_MAX, VALUE_MIN};

pub use breakdown::{breakdown, CategoryBreakdown};

/// @acp:summary "Which weights and values a score is computed from"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// Baseline values, category `marketWeight`
    Market,
    /// User overrides per edit mode, category `userWeight`
    User(EditMode),
}

/// Market and user scores from one recomputation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub market_score: f64,
    pub user_score: f64,
}

impl Scores {
    /// `user - market`; positive means the user sees more bubble risk
    pub fn difference(&self) -> f64 {
        self.user_score - self.market_score
    }
}

/// @acp:summary "Consensus score from baseline values and market weights"
pub fn market_score(tree: &FactorTree) -> f64 {
    score(tree, Weighting::Market)
}

/// @acp:summary "User score from overrides and user weights"
pub fn user_score(tree: &FactorTree, mode: EditMode) -> f64 {
    score(tree, Weighting::User(mode))
}

/// Both scores for the same tree
pub fn score_both(tree: &FactorTree, mode: EditMode) -> Scores {
    Scores {
        market_score: market_score(tree),
        user_score: user_score(tree, mode),
    }
}

/// Weighted mean of category scores under `weighting`
pub fn score(tree: &FactorTree, weighting: Weighting) -> f64 {
    weighted_mean(
        tree.iter()
            .filter_map(|c| category_score(c, weighting).map(|s| (s, category_weight(c, weighting)))),
    )
}

/// @acp:summary "Score of one category; None when it has no factors"
pub fn category_score(category: &Category, weighting: Weighting) -> Option<f64> {
    match weighting {
        Weighting::Market => baseline_mean(category),
        Weighting::User(EditMode::Advanced) => {
            mean(category.indexes.iter().map(|f| f.effective_value()))
        }
        Weighting::User(EditMode::Normal) => {
            // Normal mode never reads factor-level overrides
            let baseline = baseline_mean(category)?;
            Some(category.user_category_score.value().map(sanitize_value).unwrap_or(baseline))
        }
    }
}

/// Mean of the baseline factor values
pub fn baseline_mean(category: &Category) -> Option<f64> {
    mean(category.indexes.iter().map(|f| f.value))
}

/// Aggregation weight of a category under `weighting`, clamped to its domain
pub fn category_weight(category: &Category, weighting: Weighting) -> f64 {
    match weighting {
        Weighting::Market => finite_or_zero(category.market_weight).max(0.0),
        Weighting::User(_) => clamp_user_weight(finite_or_zero(category.user_weight)),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + sanitize_value(v), count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Weighted mean bounded to [0, 100]; zero total weight yields 0
///
/// Weights are scaled by the largest one first so very large finite weights
/// cannot overflow the sums.
fn weighted_mean(pairs: impl Iterator<Item = (f64, f64)>) -> f64 {
    let pairs: Vec<(f64, f64)> = pairs.collect();
    let scale = pairs.iter().map(|&(_, w)| w).fold(0.0, f64::max);
    if !(scale > 0.0 && scale.is_finite()) {
        return 0.0;
    }

    let (total, weight) = pairs
        .iter()
        .fold((0.0, 0.0), |(total, weight), &(s, w)| (total + s * (w / scale), weight + w / scale));
    let mean = total / weight;
    if mean.is_finite() {
        mean.clamp(VALUE_MIN, VALUE_MAX)
    } else {
        0.0
    }
}

fn sanitize_value(v: f64) -> f64 {
    clamp_value(finite_or_zero(v))
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
