//! @acp:module "Market Catalog"
//! @acp:summary "Load and validate the market tree from embedded or on-disk JSON"
//! @acp:domain scoring
//! @acp:layer io

use std::collections::HashSet;
use std::path::Path;

use super::types::{FactorTree, VALUE_MAX, VALUE_MIN};
use crate::error::{BubbleError, Result};

/// Seed catalog compiled into the binary
const BUILTIN_CATALOG: &str = include_str!("../../data/market.json");

/// @acp:summary "Parse the built-in market tree"
pub fn builtin() -> Result<FactorTree> {
    parse(BUILTIN_CATALOG)
}

/// @acp:summary "Load a market tree from a JSON file, replacing the built-in one"
pub fn load<P: AsRef<Path>>(path: P) -> Result<FactorTree> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let tree = parse(&content)?;
    tracing::debug!(
        "Loaded catalog from {:?}: {} categories, {} factors",
        path.as_ref(),
        tree.len(),
        tree.factor_count()
    );
    Ok(tree)
}

/// Load `path` if given, otherwise the built-in catalog
pub fn load_or_builtin(path: Option<&Path>) -> Result<FactorTree> {
    match path {
        Some(p) => load(p),
        None => builtin(),
    }
}

/// Parse and validate catalog JSON. Any user overrides in the input are dropped.
pub fn parse(json: &str) -> Result<FactorTree> {
    let tree: FactorTree = serde_json::from_str(json)?;
    validate(&tree)?;
    Ok(tree.user_copy())
}

/// @acp:summary "Check id uniqueness and value domains"
///
/// Ids must be unique across the whole tree, categories and factors alike.
/// Factor weights are not required to sum to 100.
pub fn validate(tree: &FactorTree) -> Result<()> {
    let mut seen = HashSet::new();

    for category in tree {
        if category.id.is_empty() {
            return Err(BubbleError::InvalidCatalog("category with empty id".to_string()));
        }
        if !seen.insert(category.id.as_str()) {
            return Err(BubbleError::InvalidCatalog(format!("duplicate id: {}", category.id)));
        }
        if !category.market_weight.is_finite() || category.market_weight < 0.0 {
            return Err(BubbleError::InvalidCatalog(format!(
                "category {} has invalid market weight {}",
                category.id, category.market_weight
            )));
        }
        if category.indexes.is_empty() {
            tracing::warn!("Category {} has no factors and will not be scored", category.id);
        }

        for factor in &category.indexes {
            if factor.id.is_empty() {
                return Err(BubbleError::InvalidCatalog(format!(
                    "factor with empty id in {}",
                    category.id
                )));
            }
            if !seen.insert(factor.id.as_str()) {
                return Err(BubbleError::InvalidCatalog(format!("duplicate id: {}", factor.id)));
            }
            if !in_domain(factor.value) {
                return Err(BubbleError::InvalidCatalog(format!(
                    "factor {} value {} outside [0, 100]",
                    factor.id, factor.value
                )));
            }
            if !in_domain(factor.market_weight) {
                return Err(BubbleError::InvalidCatalog(format!(
                    "factor {} weight {} outside [0, 100]",
                    factor.id, factor.market_weight
                )));
            }
        }
    }

    Ok(())
}

fn in_domain(v: f64) -> bool {
    v.is_finite() && (VALUE_MIN..=VALUE_MAX).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let tree = builtin().expect("built-in catalog must parse");
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.factor_count(), 22);
        assert!(tree.find_category("valuation").is_ok());
        assert!(tree.find_category("fundamentals").unwrap().find_factor("capex-cycle").is_ok());
    }

    #[test]
    fn test_builtin_factor_weights_sum_to_100() {
        let tree = builtin().unwrap();
        for category in &tree {
            let sum: f64 = category.indexes.iter().map(|f| f.market_weight).sum();
            assert!((sum - 100.0).abs() < 1e-9, "{} sums to {}", category.id, sum);
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id":"a","name":"A","indexes":[{"id":"x","name":"X","value":1,"marketWeight":1}]},
            {"id":"b","name":"B","indexes":[{"id":"x","name":"X","value":1,"marketWeight":1}]}
        ]"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(err, BubbleError::InvalidCatalog(_)));
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let json = r#"[{"id":"a","name":"A","indexes":[{"id":"x","name":"X","value":140,"marketWeight":1}]}]"#;
        assert!(matches!(parse(json), Err(BubbleError::InvalidCatalog(_))));
    }

    #[test]
    fn test_parse_drops_overrides() {
        let json = r#"[{"id":"a","name":"A","marketWeight":50,"userWeight":3,"userCategoryScore":9,
            "indexes":[{"id":"x","name":"X","value":10,"marketWeight":100,"userValue":99}]}]"#;
        let tree = parse(json).unwrap();
        let a = tree.find_category("a").unwrap();
        assert!(!a.has_overrides());
        assert_eq!(a.user_weight, 50.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, BUILTIN_CATALOG).unwrap();
        let tree = load(&path).unwrap();
        assert_eq!(tree, builtin().unwrap());
    }
}
