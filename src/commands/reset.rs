//! @acp:module "Reset Command"
//! @acp:summary "Discard all user overrides and return to market consensus"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use super::source::SessionSource;

/// Options for the reset command
#[derive(Debug, Clone)]
pub struct ResetOptions {
    pub source: SessionSource,
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// Execute the reset command
pub fn execute_reset(options: ResetOptions) -> Result<()> {
    let mut session = options.source.open()?;

    if !options.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Discard all weights and overrides?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{} Reset cancelled", style("•").dim());
            return Ok(());
        }
    }

    let scores = session.reset()?;
    println!("{} Reset to market consensus", style("✓").green());
    println!("  Your analysis: {:.1}", scores.user_score);

    Ok(())
}
