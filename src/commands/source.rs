//! @acp:module "Session Source"
//! @acp:summary "Resolve catalog, store and reconcile options into an open session"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::model::catalog;
use crate::reconcile::ReconcileOptions;
use crate::session::Session;
use crate::store::FileStore;

/// Where a command's session state comes from
#[derive(Debug, Clone)]
pub struct SessionSource {
    /// Store directory
    pub store: PathBuf,
    /// Custom market catalog, built-in when None
    pub catalog: Option<PathBuf>,
    /// Reconcile variants
    pub reconcile: ReconcileOptions,
}

impl SessionSource {
    /// Config values, with an optional `--store` override
    pub fn from_config(config: &Config, store: Option<PathBuf>) -> Self {
        Self {
            store: store.unwrap_or_else(|| config.store_dir()),
            catalog: config.catalog.clone(),
            reconcile: config.reconcile,
        }
    }

    /// Load the market catalog and restore saved user state
    pub fn open(&self) -> Result<Session<FileStore>> {
        let market = catalog::load_or_builtin(self.catalog.as_deref()).with_context(|| match &self.catalog {
            Some(path) => format!("Failed to load catalog from {:?}", path),
            None => "Failed to parse built-in catalog".to_string(),
        })?;
        tracing::debug!("Using store at {:?}", self.store);
        Ok(Session::open(market, FileStore::new(&self.store), self.reconcile))
    }
}
