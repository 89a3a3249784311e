//! @acp:module "Edit Command"
//! @acp:summary "Apply a weight, factor or category-score edit to the user tree"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::source::SessionSource;
use crate::reconcile::Edit;

/// Options for the weight / factor / score commands
#[derive(Debug, Clone)]
pub struct EditOptions {
    pub source: SessionSource,
    /// The edit to apply
    pub edit: Edit,
}

/// Execute an edit command
pub fn execute_edit(options: EditOptions) -> Result<()> {
    let mut session = options.source.open()?;
    let before = session.scores().user_score;

    let scores = match session.apply(&options.edit) {
        Ok(scores) => scores,
        Err(e) if e.is_not_found() => {
            eprintln!("{} {}", style("✗").red(), e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!("{} {}", style("✓").green(), describe(&options.edit));
    let delta = scores.user_score - before;
    println!(
        "  Your analysis: {:.1} ({}{:.1})",
        scores.user_score,
        if delta >= 0.0 { "+" } else { "" },
        delta
    );
    println!("  Market:        {:.1}", scores.market_score);

    if matches!(options.edit, Edit::FactorValue { .. }) && !session.mode().is_advanced() {
        println!(
            "  {} Factor overrides count in advanced mode; run {}",
            style("⚠").yellow(),
            style("bubble mode advanced").cyan()
        );
    }
    if matches!(options.edit, Edit::CategoryScore { .. }) && session.mode().is_advanced() {
        println!(
            "  {} Category scores count in normal mode; run {}",
            style("⚠").yellow(),
            style("bubble mode normal").cyan()
        );
    }

    Ok(())
}

fn describe(edit: &Edit) -> String {
    match edit {
        Edit::CategoryWeight { category, weight } => format!("Set {} weight to {}", category, weight),
        Edit::FactorValue { category, factor, value } => {
            format!("Set {}/{} value to {}", category, factor, value)
        }
        Edit::CategoryScore { category, score } => format!("Set {} score to {}", category, score),
        Edit::Reset => "Reset to market consensus".to_string(),
    }
}
