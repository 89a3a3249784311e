//! @acp:module "Edit Reconciler"
//! @acp:summary "Apply one user edit to the user tree, touching only the fields it owns"
//! @acp:domain scoring
//! @acp:layer logic
//!
//! Every operation either commits fully or fails with `NotFound` /
//! `InvalidRange` and leaves the tree as it was. Numeric inputs are clamped
//! into their domain; only non-finite inputs are rejected.

use serde::{Deserialize, Serialize};

use crate::error::{BubbleError, Result};
use crate::model::{
    clamp_user_weight, clamp_value, Category, FactorTree, Override, DEFAULT_USER_WEIGHT,
};
use crate::scoring::baseline_mean;

/// @acp:summary "Optional reconciliation variants (both off by default)"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOptions {
    /// Scale factor overrides by `new / old` when a category weight changes
    #[serde(default)]
    pub rescale_overrides_on_weight: bool,

    /// Recompute the category weight from factor overrides after each factor edit
    #[serde(default)]
    pub derive_weight_from_factors: bool,
}

/// @acp:summary "A single user action against the user tree"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Edit {
    CategoryWeight { category: String, weight: f64 },
    FactorValue { category: String, factor: String, value: f64 },
    CategoryScore { category: String, score: f64 },
    Reset,
}

/// @acp:summary "Applies edits against a fixed market baseline"
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'a> {
    market: &'a FactorTree,
    options: ReconcileOptions,
}

impl<'a> Reconciler<'a> {
    pub fn new(market: &'a FactorTree, options: ReconcileOptions) -> Self {
        Self { market, options }
    }

    /// Dispatch an [`Edit`]
    pub fn apply(&self, tree: &mut FactorTree, edit: &Edit) -> Result<()> {
        match edit {
            Edit::CategoryWeight { category, weight } => {
                self.set_category_weight(tree, category, *weight)
            }
            Edit::FactorValue {
                category,
                factor,
                value,
            } => self.set_factor_value(tree, category, factor, *value),
            Edit::CategoryScore { category, score } => {
                self.set_category_score(tree, category, *score)
            }
            Edit::Reset => {
                self.reset(tree);
                Ok(())
            }
        }
    }

    /// @acp:summary "Set a category's user weight, clamped to [0, 200]"
    pub fn set_category_weight(&self, tree: &mut FactorTree, category_id: &str, weight: f64) -> Result<()> {
        let weight = clamp_user_weight(finite("userWeight", weight)?);
        let category = tree.find_category_mut(category_id)?;
        let old = category.user_weight;

        if self.options.rescale_overrides_on_weight {
            rescale_overrides(category, old, weight);
        }
        category.user_weight = weight;

        tracing::debug!("{}: userWeight {} -> {}", category_id, old, weight);
        Ok(())
    }

    /// @acp:summary "Override one factor's value, clamped to [0, 100]"
    pub fn set_factor_value(
        &self,
        tree: &mut FactorTree,
        category_id: &str,
        factor_id: &str,
        value: f64,
    ) -> Result<()> {
        let value = clamp_value(finite("userValue", value)?);
        let category = tree.find_category_mut(category_id)?;
        category.find_factor_mut(factor_id)?.user_value = Override::Set(value);

        if self.options.derive_weight_from_factors {
            category.user_weight = derived_weight(category);
        }

        tracing::debug!("{}/{}: userValue = {}", category_id, factor_id, value);
        Ok(())
    }

    /// @acp:summary "Set a category's direct score, clamped to [0, 100]"
    ///
    /// Only Normal-mode scoring reads this override.
    pub fn set_category_score(&self, tree: &mut FactorTree, category_id: &str, score: f64) -> Result<()> {
        let score = clamp_value(finite("userCategoryScore", score)?);
        tree.find_category_mut(category_id)?.user_category_score = Override::Set(score);

        tracing::debug!("{}: userCategoryScore = {}", category_id, score);
        Ok(())
    }

    /// @acp:summary "Replace the user tree with a fresh copy of the market tree"
    pub fn reset(&self, tree: &mut FactorTree) {
        *tree = self.market.user_copy();
        tracing::debug!("User tree reset to market baseline");
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BubbleError::InvalidRange { field, value })
    }
}

fn rescale_overrides(category: &mut Category, old: f64, new: f64) {
    if old <= 0.0 {
        return;
    }
    let ratio = new / old;
    for factor in &mut category.indexes {
        if let Override::Set(v) = factor.user_value {
            factor.user_value = Override::Set(clamp_value(v * ratio));
        }
    }
}

/// `(override mean / baseline mean) * 100`, or 100 when the baseline mean is 0
fn derived_weight(category: &Category) -> f64 {
    let baseline = baseline_mean(category).unwrap_or(0.0);
    if baseline <= 0.0 {
        return DEFAULT_USER_WEIGHT;
    }
    let count = category.indexes.len() as f64;
    let user: f64 = category.indexes.iter().map(|f| f.effective_value()).sum::<f64>() / count;
    clamp_user_weight(user / baseline * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Factor;

    fn market() -> FactorTree {
        FactorTree::new(vec![
            Category::new(
                "a",
                "A",
                100.0,
                vec![Factor::new("a1", "A1", 80.0, 50.0), Factor::new("a2", "A2", 40.0, 50.0)],
            ),
            Category::new("b", "B", 100.0, vec![Factor::new("b1", "B1", 0.0, 100.0)]),
        ])
    }

    #[test]
    fn test_weight_is_clamped() {
        let market = market();
        let mut tree = market.user_copy();
        let r = Reconciler::new(&market, ReconcileOptions::default());

        r.set_category_weight(&mut tree, "a", 500.0).unwrap();
        assert_eq!(tree.find_category("a").unwrap().user_weight, 200.0);
        r.set_category_weight(&mut tree, "a", -3.0).unwrap();
        assert_eq!(tree.find_category("a").unwrap().user_weight, 0.0);
    }

    #[test]
    fn test_unknown_ids_leave_tree_untouched() {
        let market = market();
        let mut tree = market.user_copy();
        let r = Reconciler::new(&market, ReconcileOptions::default());
        let before = tree.clone();

        assert!(r.set_category_weight(&mut tree, "nope", 10.0).unwrap_err().is_not_found());
        assert!(r.set_factor_value(&mut tree, "a", "nope", 10.0).unwrap_err().is_not_found());
        assert!(r.set_factor_value(&mut tree, "nope", "a1", 10.0).unwrap_err().is_not_found());
        assert!(r.set_category_score(&mut tree, "nope", 10.0).unwrap_err().is_not_found());
        assert_eq!(tree, before);
    }

    #[test]
    fn test_non_finite_rejected() {
        let market = market();
        let mut tree = market.user_copy();
        let r = Reconciler::new(&market, ReconcileOptions::default());

        let err = r.set_factor_value(&mut tree, "a", "a1", f64::NAN).unwrap_err();
        assert!(matches!(err, BubbleError::InvalidRange { field: "userValue", .. }));
        assert_eq!(tree, market.user_copy());
    }

    #[test]
    fn test_factor_edit_touches_only_its_factor() {
        let market = market();
        let mut tree = market.user_copy();
        let r = Reconciler::new(&market, ReconcileOptions::default());

        r.set_factor_value(&mut tree, "a", "a2", 140.0).unwrap();
        let a = tree.find_category("a").unwrap();
        assert_eq!(a.indexes[1].user_value, Override::Set(100.0));
        assert!(a.indexes[0].user_value.is_unset());
        assert_eq!(a.user_weight, 100.0);
    }

    #[test]
    fn test_category_score_zero_is_an_override() {
        let market = market();
        let mut tree = market.user_copy();
        let r = Reconciler::new(&market, ReconcileOptions::default());

        r.set_category_score(&mut tree, "a", 0.0).unwrap();
        assert_eq!(tree.find_category("a").unwrap().user_category_score, Override::Set(0.0));
    }

    #[test]
    fn test_rescale_variant() {
        let market = market();
        let mut tree = market.user_copy();
        let options = ReconcileOptions {
            rescale_overrides_on_weight: true,
            ..Default::default()
        };
        let r = Reconciler::new(&market, options);

        r.set_factor_value(&mut tree, "a", "a1", 40.0).unwrap();
        r.set_category_weight(&mut tree, "a", 150.0).unwrap();
        let a = tree.find_category("a").unwrap();
        assert_eq!(a.indexes[0].user_value, Override::Set(60.0));
        assert!(a.indexes[1].user_value.is_unset());

        // Zero old weight leaves overrides alone
        r.set_category_weight(&mut tree, "a", 0.0).unwrap();
        r.set_category_weight(&mut tree, "a", 100.0).unwrap();
        assert_eq!(tree.find_category("a").unwrap().indexes[0].user_value, Override::Set(0.0));
    }

    #[test]
    fn test_derive_weight_variant() {
        let market = market();
        let mut tree = market.user_copy();
        let options = ReconcileOptions {
            derive_weight_from_factors: true,
            ..Default::default()
        };
        let r = Reconciler::new(&market, options);

        // baseline mean 60, user mean (90 + 40) / 2 = 65
        r.set_factor_value(&mut tree, "a", "a1", 90.0).unwrap();
        let weight = tree.find_category("a").unwrap().user_weight;
        assert!((weight - 65.0 / 60.0 * 100.0).abs() < 1e-9);

        // baseline mean 0 keeps the default weight
        r.set_factor_value(&mut tree, "b", "b1", 70.0).unwrap();
        assert_eq!(tree.find_category("b").unwrap().user_weight, 100.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let market = market();
        let mut tree = market.user_copy();
        let r = Reconciler::new(&market, ReconcileOptions::default());

        r.apply(&mut tree, &Edit::CategoryWeight { category: "a".into(), weight: 10.0 }).unwrap();
        r.apply(&mut tree, &Edit::CategoryScore { category: "b".into(), score: 10.0 }).unwrap();
        r.apply(&mut tree, &Edit::FactorValue { category: "a".into(), factor: "a1".into(), value: 1.0 })
            .unwrap();
        r.apply(&mut tree, &Edit::Reset).unwrap();

        assert_eq!(tree, market.user_copy());
    }
}
