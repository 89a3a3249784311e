//! @acp:module "Analyze Command"
//! @acp:summary "Scenario analysis: stance, adjustments, positioning, exposure and risks"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::source::SessionSource;
use crate::config::InsightConfig;
use crate::insight::{analyze, Stance};

/// Options for the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub source: SessionSource,
    /// Commentary thresholds
    pub insight: InsightConfig,
    /// Output as JSON
    pub json: bool,
}

/// Execute the analyze command
pub fn execute_analyze(options: AnalyzeOptions) -> Result<()> {
    let session = options.source.open()?;
    let analysis = analyze(session.tree(), &session.scores(), &options.insight);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{}", style("Scenario Analysis").bold());
    println!("{}", "=".repeat(60));
    let diff = match analysis.stance {
        Stance::Optimistic => style(format!("{:+.0}", analysis.difference)).green(),
        Stance::Cautious => style(format!("{:+.0}", analysis.difference)).red(),
        Stance::Aligned => style(format!("{:+.0}", analysis.difference)),
    };
    println!(
        "  Yours: {:.0}   Market: {:.0}   Difference: {}",
        analysis.user_score, analysis.market_score, diff
    );
    println!();
    println!("{}", analysis.summary);
    println!();
    println!("Scenario likelihood: {}", style(analysis.likelihood).bold());

    if !analysis.adjustments.is_empty() {
        println!("\n{}", style("Key assumptions").bold());
        for adj in &analysis.adjustments {
            let direction = if adj.raises_risk() {
                style("higher risk than market perceives").yellow()
            } else {
                style("lower risk than market perceives").green()
            };
            println!(
                "  • {}: {} (you: {:.0}, market: {:.0})",
                adj.category, direction, adj.user_score, adj.market_score
            );
        }
    }

    println!("\n{}", style(analysis.positioning.title()).bold());
    for suggestion in analysis.positioning.suggestions() {
        println!("  • {}", suggestion);
    }

    println!(
        "\n{} {}",
        style("Suggested AI exposure:").bold(),
        style(analysis.allocation.exposure()).cyan()
    );
    println!("  {}", analysis.allocation.reasoning);

    println!("\n{}", style("Risk management").bold());
    for note in &analysis.risks {
        println!("  {} {}: {}", style("!").yellow(), note.risk, note.action);
    }

    Ok(())
}
