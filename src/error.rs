//! @acp:module "Errors"
//! @acp:summary "Error taxonomy shared by the scoring, reconcile and storage layers"
//! @acp:domain scoring
//! @acp:layer types

use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, BubbleError>;

/// @acp:summary "Every failure the core can report"
#[derive(Error, Debug)]
pub enum BubbleError {
    /// A category or factor id does not exist in the tree
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// An input value cannot be brought into its domain (NaN, infinity)
    #[error("invalid value for {field}: {value}")]
    InvalidRange { field: &'static str, value: f64 },

    /// The market catalog violates a structural rule
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Persisted state could not be decoded
    #[error("failed to decode {key}: {reason}")]
    Deserialization { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BubbleError {
    pub fn category_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "category",
            id: id.to_string(),
        }
    }

    pub fn factor_not_found(category_id: &str, factor_id: &str) -> Self {
        Self::NotFound {
            kind: "factor",
            id: format!("{}/{}", category_id, factor_id),
        }
    }

    /// True for the NotFound variant, regardless of kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        let err = BubbleError::category_not_found("valuation");
        assert_eq!(err.to_string(), "category not found: valuation");
        assert!(err.is_not_found());

        let err = BubbleError::factor_not_found("macro", "vix");
        assert_eq!(err.to_string(), "factor not found: macro/vix");
    }

    #[test]
    fn test_invalid_range_is_not_not_found() {
        let err = BubbleError::InvalidRange {
            field: "userWeight",
            value: f64::NAN,
        };
        assert!(!err.is_not_found());
    }
}
