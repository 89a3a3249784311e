//! @acp:module "Persistence Adapter"
//! @acp:summary "Save and restore the user tree and edit mode; fail-soft on load"
//! @acp:domain storage
//! @acp:layer io
//!
//! A corrupt or missing entry never blocks start-up: `load` logs and falls
//! back to the market tree and Normal mode.

use super::KeyValueStore;
use crate::error::{BubbleError, Result};
use crate::model::{EditMode, FactorTree};

/// Key holding the serialized user tree
pub const TREE_KEY: &str = "userCategories";
/// Key holding the advanced-mode flag
pub const MODE_KEY: &str = "advancedMode";

/// @acp:summary "Write tree and mode under their fixed keys"
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, tree: &FactorTree, mode: EditMode) -> Result<()> {
    store.set(TREE_KEY, &serde_json::to_string(tree)?)?;
    store.set(MODE_KEY, &serde_json::to_string(&mode.is_advanced())?)?;
    Ok(())
}

/// @acp:summary "Restore tree and mode, substituting defaults for bad entries"
///
/// A stored tree is only accepted if it has the same shape as `market`;
/// otherwise it belongs to a different catalog and is discarded.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, market: &FactorTree) -> (FactorTree, EditMode) {
    let tree = match store.get(TREE_KEY).and_then(|raw| raw.map(|r| decode_tree(&r, market)).transpose()) {
        Ok(Some(tree)) => tree,
        Ok(None) => {
            tracing::debug!("No saved {}, starting from market tree", TREE_KEY);
            market.user_copy()
        }
        Err(e) => {
            tracing::warn!("Discarding saved user tree: {}", e);
            market.user_copy()
        }
    };

    let mode = match store.get(MODE_KEY).and_then(|raw| raw.map(|r| decode_mode(&r)).transpose()) {
        Ok(Some(mode)) => mode,
        Ok(None) => EditMode::Normal,
        Err(e) => {
            tracing::warn!("Discarding saved edit mode: {}", e);
            EditMode::Normal
        }
    };

    (tree, mode)
}

fn decode_tree(raw: &str, market: &FactorTree) -> Result<FactorTree> {
    let tree: FactorTree = serde_json::from_str(raw).map_err(|e| BubbleError::Deserialization {
        key: TREE_KEY.to_string(),
        reason: e.to_string(),
    })?;
    if !tree.same_shape(market) {
        return Err(BubbleError::Deserialization {
            key: TREE_KEY.to_string(),
            reason: "category/factor ids do not match the market catalog".to_string(),
        });
    }
    Ok(tree)
}

fn decode_mode(raw: &str) -> Result<EditMode> {
    serde_json::from_str::<bool>(raw)
        .map(EditMode::from_advanced)
        .map_err(|e| BubbleError::Deserialization {
            key: MODE_KEY.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{catalog, Override};
    use crate::store::MemoryStore;

    #[test]
    fn test_empty_store_gives_defaults() {
        let market = catalog::builtin().unwrap();
        let store = MemoryStore::new();
        let (tree, mode) = load(&store, &market);
        assert_eq!(tree, market.user_copy());
        assert_eq!(mode, EditMode::Normal);
    }

    #[test]
    fn test_mode_stored_as_boolean() {
        let market = catalog::builtin().unwrap();
        let mut store = MemoryStore::new();
        save(&mut store, &market, EditMode::Advanced).unwrap();
        assert_eq!(store.get(MODE_KEY).unwrap().as_deref(), Some("true"));
        assert!(store.get(TREE_KEY).unwrap().unwrap().starts_with('['));
    }

    #[test]
    fn test_corrupt_entries_fall_back_independently() {
        let market = catalog::builtin().unwrap();
        let mut store = MemoryStore::new();
        store.set(TREE_KEY, "{not json").unwrap();
        store.set(MODE_KEY, "true").unwrap();

        let (tree, mode) = load(&store, &market);
        assert_eq!(tree, market.user_copy());
        assert_eq!(mode, EditMode::Advanced);

        store.set(MODE_KEY, "\"sideways\"").unwrap();
        assert_eq!(load(&store, &market).1, EditMode::Normal);
    }

    #[test]
    fn test_foreign_shape_discarded() {
        let market = catalog::builtin().unwrap();
        let mut store = MemoryStore::new();
        store.set(TREE_KEY, r#"[{"id":"other","name":"Other","indexes":[]}]"#).unwrap();
        assert_eq!(load(&store, &market).0, market.user_copy());
    }

    #[test]
    fn test_inexact_floats_survive_save_and_load() {
        let market = catalog::builtin().unwrap();
        let mut tree = market.user_copy();
        let samples = [0.09101338197586613, 42.300000499999996, 33.3, 0.1 + 0.2, 65.0 / 60.0 * 100.0];
        let ids: Vec<String> = market.iter().map(|c| c.id.clone()).collect();
        for (id, sample) in ids.iter().zip(samples) {
            let category = tree.find_category_mut(id).unwrap();
            category.user_weight = 118.01793343883841;
            category.user_category_score = Override::Set(sample);
            for (i, factor) in category.indexes.iter_mut().enumerate() {
                factor.user_value = Override::Set(sample * (i as f64 + 1.0) / 7.0);
            }
        }

        let mut store = MemoryStore::new();
        save(&mut store, &tree, EditMode::Advanced).unwrap();
        let (loaded, mode) = load(&store, &market);
        assert_eq!(loaded, tree);
        assert_eq!(mode, EditMode::Advanced);
    }
}
