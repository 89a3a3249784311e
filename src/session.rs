//! @acp:module "Session"
//! @acp:summary "Explicit application state: market tree, user tree, mode and store"
//! @acp:domain scoring
//! @acp:layer service
//!
//! Every mutation runs edit -> persist, after which consumers read scores and
//! the tree from a fresh snapshot. Nothing else holds the user tree.

use serde::Serialize;

use crate::error::Result;
use crate::model::{Category, EditMode, FactorTree};
use crate::reconcile::{Edit, ReconcileOptions, Reconciler};
use crate::scoring::{self, breakdown, CategoryBreakdown, Scores, Weighting};
use crate::store::{self, KeyValueStore};

/// @acp:summary "Read-only view handed to presentation consumers"
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub market_score: f64,
    pub user_score: f64,
    pub mode: EditMode,
    pub categories: &'a FactorTree,
}

/// @acp:summary "Owns the user tree and routes every write through the reconciler"
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    market: FactorTree,
    tree: FactorTree,
    mode: EditMode,
    store: S,
    options: ReconcileOptions,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore saved state from `store`, falling back to the market tree
    pub fn open(market: FactorTree, store: S, options: ReconcileOptions) -> Self {
        let (tree, mode) = store::load(&store, &market);
        tracing::debug!("Session opened in {} mode", mode);
        Self {
            market,
            tree,
            mode,
            store,
            options,
        }
    }

    pub fn market(&self) -> &FactorTree {
        &self.market
    }

    pub fn tree(&self) -> &FactorTree {
        &self.tree
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scores(&self) -> Scores {
        Scores {
            market_score: scoring::market_score(&self.market),
            user_score: scoring::user_score(&self.tree, self.mode),
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let scores = self.scores();
        Snapshot {
            market_score: scores.market_score,
            user_score: scores.user_score,
            mode: self.mode,
            categories: &self.tree,
        }
    }

    /// Per-category breakdown of the user score in the current mode
    pub fn user_breakdown(&self) -> Vec<CategoryBreakdown> {
        breakdown(&self.tree, Weighting::User(self.mode))
    }

    pub fn find_category(&self, id: &str) -> Result<&Category> {
        self.tree.find_category(id)
    }

    /// @acp:summary "Apply one edit, persist, and return the new scores"
    pub fn apply(&mut self, edit: &Edit) -> Result<Scores> {
        Reconciler::new(&self.market, self.options).apply(&mut self.tree, edit)?;
        self.persist()?;
        Ok(self.scores())
    }

    pub fn set_category_weight(&mut self, category: &str, weight: f64) -> Result<Scores> {
        self.apply(&Edit::CategoryWeight {
            category: category.to_string(),
            weight,
        })
    }

    pub fn set_factor_value(&mut self, category: &str, factor: &str, value: f64) -> Result<Scores> {
        self.apply(&Edit::FactorValue {
            category: category.to_string(),
            factor: factor.to_string(),
            value,
        })
    }

    pub fn set_category_score(&mut self, category: &str, score: f64) -> Result<Scores> {
        if self.mode.is_advanced() {
            tracing::debug!("Category score for {} only affects Normal mode", category);
        }
        self.apply(&Edit::CategoryScore {
            category: category.to_string(),
            score,
        })
    }

    pub fn reset(&mut self) -> Result<Scores> {
        self.apply(&Edit::Reset)
    }

    /// Switch edit granularity; the tree itself is not touched
    pub fn set_mode(&mut self, mode: EditMode) -> Result<Scores> {
        self.mode = mode;
        self.persist()?;
        Ok(self.scores())
    }

    fn persist(&mut self) -> Result<()> {
        store::save(&mut self.store, &self.tree, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog;
    use crate::store::MemoryStore;

    fn open() -> Session<MemoryStore> {
        Session::open(catalog::builtin().unwrap(), MemoryStore::new(), ReconcileOptions::default())
    }

    #[test]
    fn test_fresh_session_matches_market() {
        let session = open();
        let scores = session.scores();
        assert_eq!(session.mode(), EditMode::Normal);
        assert!((scores.user_score - scores.market_score).abs() < 1e-9);
        // (78.25 + 81 + 75.25 + 65 + 74.6) / 5
        assert!((scores.market_score - 74.82).abs() < 1e-9);
    }

    #[test]
    fn test_edit_is_persisted() {
        let mut session = open();
        session.set_category_weight("macro", 0.0).unwrap();
        let saved = session.store().get(store::TREE_KEY).unwrap().unwrap();
        assert!(saved.contains("\"userWeight\":0.0"));
    }

    #[test]
    fn test_failed_edit_not_persisted() {
        let mut session = open();
        assert!(session.set_category_weight("crypto", 50.0).is_err());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_market_score_unaffected_by_edits() {
        let mut session = open();
        let before = session.scores().market_score;
        session.set_category_score("valuation", 10.0).unwrap();
        session.set_factor_value("macro", "vix", 0.0).unwrap();
        assert_eq!(session.scores().market_score, before);
    }

    #[test]
    fn test_mode_switch_changes_which_overrides_count() {
        let mut session = open();
        session.set_factor_value("sentiment", "media-mentions", 0.0).unwrap();
        let normal = session.scores().user_score;
        let advanced = session.set_mode(EditMode::Advanced).unwrap().user_score;
        assert!(advanced < normal);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let session = open();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert!(json.get("marketScore").is_some());
        assert_eq!(json["mode"], "normal");
        assert_eq!(json["categories"].as_array().unwrap().len(), 5);
    }
}
