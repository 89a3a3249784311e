//! @acp:module "Factor Model Types"
//! @acp:summary "Factor, category and tree definitions with override markers"
//! @acp:domain scoring
//! @acp:layer types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BubbleError, Result};

/// Lower bound for factor values, category scores and weights
pub const VALUE_MIN: f64 = 0.0;
/// Upper bound for factor values and category scores
pub const VALUE_MAX: f64 = 100.0;
/// Upper bound for a category's user weight
pub const USER_WEIGHT_MAX: f64 = 200.0;
/// User weight that matches market consensus influence
pub const DEFAULT_USER_WEIGHT: f64 = 100.0;

/// Clamp a factor value or category score into [0, 100]
pub fn clamp_value(value: f64) -> f64 {
    value.clamp(VALUE_MIN, VALUE_MAX)
}

/// Clamp a user weight into [0, 200]
pub fn clamp_user_weight(weight: f64) -> f64 {
    weight.clamp(VALUE_MIN, USER_WEIGHT_MAX)
}

/// @acp:summary "Marks whether the user replaced a derived value"
///
/// Presence, not magnitude, means "touched": `Set(0.0)` is a real override.
/// Serialized as an optional number so the persisted layout stays a plain
/// nullable field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Override {
    #[default]
    Unset,
    Set(f64),
}

impl Override {
    pub fn is_unset(&self) -> bool {
        matches!(self, Override::Unset)
    }

    pub fn is_set(&self) -> bool {
        !self.is_unset()
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Override::Unset => None,
            Override::Set(v) => Some(*v),
        }
    }

    /// Override value, or `fallback` when unset
    pub fn or(&self, fallback: f64) -> f64 {
        self.value().unwrap_or(fallback)
    }
}

impl From<Option<f64>> for Override {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Override::Set(v),
            None => Override::Unset,
        }
    }
}

impl From<Override> for Option<f64> {
    fn from(value: Override) -> Self {
        value.value()
    }
}

/// @acp:summary "Leaf metric with a market baseline and optional user override"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Market-observed baseline, 0-100
    pub value: f64,
    /// Share of this factor inside its category, 0-100
    #[serde(default)]
    pub market_weight: f64,
    /// Advanced-mode override
    #[serde(default, skip_serializing_if = "Override::is_unset")]
    pub user_value: Override,
}

impl Factor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: f64, market_weight: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            value,
            market_weight,
            user_value: Override::Unset,
        }
    }

    /// Value seen by Advanced-mode scoring
    pub fn effective_value(&self) -> f64 {
        self.user_value.or(self.value)
    }
}

fn default_market_weight() -> f64 {
    DEFAULT_USER_WEIGHT
}

fn default_user_weight() -> f64 {
    DEFAULT_USER_WEIGHT
}

/// @acp:summary "Named group of factors with market and user weights"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub indexes: Vec<Factor>,
    /// Aggregation weight for the market score
    #[serde(default = "default_market_weight")]
    pub market_weight: f64,
    /// User importance multiplier, 0-200
    #[serde(default = "default_user_weight")]
    pub user_weight: f64,
    /// Normal-mode direct score override
    #[serde(default, skip_serializing_if = "Override::is_unset")]
    pub user_category_score: Override,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, market_weight: f64, indexes: Vec<Factor>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            indexes,
            market_weight,
            user_weight: DEFAULT_USER_WEIGHT,
            user_category_score: Override::Unset,
        }
    }

    pub fn find_factor(&self, id: &str) -> Result<&Factor> {
        self.indexes
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| BubbleError::factor_not_found(&self.id, id))
    }

    pub fn find_factor_mut(&mut self, id: &str) -> Result<&mut Factor> {
        let category_id = self.id.clone();
        self.indexes
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| BubbleError::factor_not_found(&category_id, id))
    }

    /// True if any override is present on the category or its factors
    pub fn has_overrides(&self) -> bool {
        self.user_category_score.is_set() || self.indexes.iter().any(|f| f.user_value.is_set())
    }

    /// True if the user weight differs from what a reset would restore
    pub fn is_reweighted(&self) -> bool {
        self.user_weight != clamp_user_weight(self.market_weight)
    }

    /// Copy with all overrides cleared and the user weight back at market influence
    fn reset_copy(&self) -> Self {
        Self {
            indexes: self
                .indexes
                .iter()
                .map(|f| Factor {
                    user_value: Override::Unset,
                    ..f.clone()
                })
                .collect(),
            user_weight: clamp_user_weight(self.market_weight),
            user_category_score: Override::Unset,
            ..self.clone()
        }
    }
}

/// @acp:summary "Ordered category sequence; market baseline or user working copy"
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorTree {
    categories: Vec<Category>,
}

impl FactorTree {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// @acp:summary "Look up a category by id"
    pub fn find_category(&self, id: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| BubbleError::category_not_found(id))
    }

    pub fn find_category_mut(&mut self, id: &str) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BubbleError::category_not_found(id))
    }

    /// @acp:summary "Deep copy suitable as a fresh user tree"
    ///
    /// Clears every override and sets each user weight to the category's own
    /// market weight, so Normal-mode user scoring reproduces the market score.
    pub fn user_copy(&self) -> Self {
        Self {
            categories: self.categories.iter().map(Category::reset_copy).collect(),
        }
    }

    /// True when both trees hold the same category and factor ids in the same order
    pub fn same_shape(&self, other: &FactorTree) -> bool {
        self.categories.len() == other.categories.len()
            && self.categories.iter().zip(&other.categories).all(|(a, b)| {
                a.id == b.id
                    && a.indexes.len() == b.indexes.len()
                    && a.indexes.iter().zip(&b.indexes).all(|(fa, fb)| fa.id == fb.id)
            })
    }

    /// Total number of factors across all categories
    pub fn factor_count(&self) -> usize {
        self.categories.iter().map(|c| c.indexes.len()).sum()
    }
}

impl From<Vec<Category>> for FactorTree {
    fn from(categories: Vec<Category>) -> Self {
        Self::new(categories)
    }
}

impl<'a> IntoIterator for &'a FactorTree {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

/// @acp:summary "User editing granularity"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Category-level edits: weights and direct category scores
    #[default]
    Normal,
    /// Factor-level edits: individual factor values
    Advanced,
}

impl EditMode {
    pub fn is_advanced(&self) -> bool {
        matches!(self, EditMode::Advanced)
    }

    pub fn from_advanced(advanced: bool) -> Self {
        if advanced {
            EditMode::Advanced
        } else {
            EditMode::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditMode::Normal => "normal",
            EditMode::Advanced => "advanced",
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(EditMode::Normal),
            "advanced" => Ok(EditMode::Advanced),
            _ => Err(format!("Unknown edit mode: {} (expected normal or advanced)", s)),
        }
    }
}
