//! @acp:module "Catalog Command"
//! @acp:summary "Print the market catalog"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::source::SessionSource;
use crate::scoring::baseline_mean;

/// Options for the catalog command
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub source: SessionSource,
    /// Output as JSON
    pub json: bool,
}

/// Execute the catalog command
pub fn execute_catalog(options: CatalogOptions) -> Result<()> {
    let session = options.source.open()?;
    let market = session.market();

    if options.json {
        println!("{}", serde_json::to_string_pretty(market)?);
        return Ok(());
    }

    println!(
        "Market catalog ({} categories, {} factors):\n",
        market.len(),
        market.factor_count()
    );
    for category in market {
        let mean = baseline_mean(category).map(|m| format!("{:.1}", m)).unwrap_or_else(|| "-".into());
        println!(
            "  {:14} {}  weight {:.0}  level {}",
            style(&category.id).cyan(),
            category.name,
            category.market_weight,
            mean
        );
        for factor in &category.indexes {
            println!("    {:20} {:>5.0}  {:>4.0}%", factor.id, factor.value, factor.market_weight);
        }
    }

    Ok(())
}
