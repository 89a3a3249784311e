//! @acp:module "Mode Command"
//! @acp:summary "Show or switch the edit mode"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::source::SessionSource;
use crate::model::EditMode;

/// Options for the mode command
#[derive(Debug, Clone)]
pub struct ModeOptions {
    pub source: SessionSource,
    /// New mode; prints the current one when None
    pub mode: Option<EditMode>,
}

/// Execute the mode command
pub fn execute_mode(options: ModeOptions) -> Result<()> {
    let mut session = options.source.open()?;

    let Some(mode) = options.mode else {
        println!("{}", session.mode());
        return Ok(());
    };

    let scores = session.set_mode(mode)?;
    println!("{} Edit mode set to {}", style("✓").green(), style(mode).bold());
    println!("  Your analysis: {:.1}", scores.user_score);

    Ok(())
}
