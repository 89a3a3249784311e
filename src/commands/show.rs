//! @acp:module "Show Command"
//! @acp:summary "Print market and user scores with a per-category breakdown"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::source::SessionSource;
use crate::insight::RiskLevel;
use crate::scoring::{breakdown, Weighting};

/// Options for the show command
#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub source: SessionSource,
    /// Output as JSON
    pub json: bool,
}

/// Execute the show command
pub fn execute_show(options: ShowOptions) -> Result<()> {
    let session = options.source.open()?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        return Ok(());
    }

    let scores = session.scores();
    println!("{}", style("AI Bubble Index").bold());
    println!("{}", "=".repeat(60));
    println!(
        "  Market consensus: {}  ({})",
        style(format!("{:.1}", scores.market_score)).cyan().bold(),
        RiskLevel::from_level(scores.market_score)
    );
    println!(
        "  Your analysis:    {}  ({})",
        style(format!("{:.1}", scores.user_score)).green().bold(),
        RiskLevel::from_level(scores.user_score)
    );
    println!("  Edit mode:        {}", session.mode());
    println!();

    let market_rows = breakdown(session.market(), Weighting::Market);
    let user_rows = session.user_breakdown();
    println!(
        "  {:32} {:>7} {:>7} {:>7} {:>8}",
        "Category", "Market", "Yours", "Weight", "Share"
    );
    for (row, market) in user_rows.iter().zip(&market_rows) {
        let marker = if row.overridden { style("*").yellow().to_string() } else { " ".to_string() };
        println!(
            "{} {:32} {:>7} {:>7} {:>7.0} {:>7.1}%",
            marker,
            row.name,
            fmt_score(market.score),
            fmt_score(row.score),
            row.weight,
            row.share * 100.0
        );
    }

    if user_rows.iter().any(|r| r.overridden) {
        println!("\n  {} category differs from market (weight or overrides)", style("*").yellow());
    }

    Ok(())
}

fn fmt_score(score: Option<f64>) -> String {
    score.map(|s| format!("{:.1}", s)).unwrap_or_else(|| "-".to_string())
}
