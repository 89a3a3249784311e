//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each command opens its own session from a [`SessionSource`], does one
//! thing, and prints the result.

pub mod analyze;
pub mod catalog;
pub mod category;
pub mod edit;
pub mod mode;
pub mod reset;
pub mod show;
pub mod source;

pub use analyze::{execute_analyze, AnalyzeOptions};
pub use catalog::{execute_catalog, CatalogOptions};
pub use category::{execute_category, CategoryOptions};
pub use edit::{execute_edit, EditOptions};
pub use mode::{execute_mode, ModeOptions};
pub use reset::{execute_reset, ResetOptions};
pub use show::{execute_show, ShowOptions};
pub use source::SessionSource;
