//! @acp:module "Factor Model"
//! @acp:summary "Market catalog and the category/factor tree types"
//! @acp:domain scoring
//! @acp:layer model

pub mod catalog;
pub mod types;

pub use types::*;
