#![forbid(unsafe_code)]

//! @acp:module "Bubble Index Library"
//! @acp:summary "Weighted composite scoring of AI market bubble risk"
//! @acp:domain scoring
//! @acp:layer api
//! @acp:stability experimental
//!
//! # Bubble Index
//!
//! Turns a tree of weighted market factors into a single 0-100 bubble score,
//! once from market consensus and once from the user's own weights and
//! overrides.
//!
//! ## Features
//!
//! - **Two views**: market consensus vs. user analysis, side by side
//! - **Two edit grains**: Normal (category scores and weights) and Advanced (factor values)
//! - **Fail-soft persistence**: corrupt saved state falls back to the market baseline
//! - **Scenario analysis**: stance, key adjustments, positioning, AI exposure and risk notes
//!
//! ## Example
//!
//! ```rust,no_run
//! use bubble::{catalog, MemoryStore, ReconcileOptions, Session};
//!
//! fn main() -> anyhow::Result<()> {
//!     let market = catalog::builtin()?;
//!     let mut session = Session::open(market, MemoryStore::new(), ReconcileOptions::default());
//!
//!     let scores = session.set_category_weight("sentiment", 200.0)?;
//!     println!("market {:.1}, yours {:.1}", scores.market_score, scores.user_score);
//!
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod insight;
pub mod model;
pub mod reconcile;
pub mod scoring;
pub mod session;
pub mod store;

// Re-exports
pub use config::{Config, InsightConfig};
pub use error::{BubbleError, Result};
pub use insight::{analyze, Allocation, Analysis, Positioning, RiskLevel, RiskNote, Stance};
pub use model::{catalog, Category, EditMode, Factor, FactorTree, Override};
pub use reconcile::{Edit, ReconcileOptions, Reconciler};
pub use scoring::{market_score, score_both, user_score, CategoryBreakdown, Scores, Weighting};
pub use session::{Session, Snapshot};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
