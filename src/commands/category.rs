//! @acp:module "Category Command"
//! @acp:summary "Drill down into one category and its factors"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::source::SessionSource;
use crate::insight::RiskLevel;
use crate::model::{Category, EditMode};
use crate::scoring::{baseline_mean, category_score, Weighting};

/// Options for the category command
#[derive(Debug, Clone)]
pub struct CategoryOptions {
    pub source: SessionSource,
    /// Category id
    pub id: String,
    /// Output as JSON
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryDetail<'a> {
    #[serde(flatten)]
    category: &'a Category,
    market_score: Option<f64>,
    user_score: Option<f64>,
    risk: Option<RiskLevel>,
}

/// Execute the category command
pub fn execute_category(options: CategoryOptions) -> Result<()> {
    let session = options.source.open()?;

    let category = match session.find_category(&options.id) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            let ids: Vec<&str> = session.tree().iter().map(|c| c.id.as_str()).collect();
            eprintln!("  Available: {}", ids.join(", "));
            std::process::exit(1);
        }
    };

    let market_score = baseline_mean(category);
    let user_score = category_score(category, Weighting::User(session.mode()));

    if options.json {
        let detail = CategoryDetail {
            category,
            market_score,
            user_score,
            risk: market_score.map(RiskLevel::from_level),
        };
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!("{}", style(&category.name).bold());
    println!("{}", "=".repeat(60));
    if !category.description.is_empty() {
        println!("{}\n", category.description);
    }

    match market_score {
        Some(level) => println!(
            "  Current level: {}  ({})",
            style(format!("{:.0}", level)).cyan().bold(),
            RiskLevel::from_level(level)
        ),
        None => println!("  {} No factors; excluded from scoring", style("•").dim()),
    }
    if let Some(score) = user_score {
        println!("  Your score:    {:.1}  ({} mode)", score, session.mode());
    }
    println!("  Weight:        {:.0} (market {:.0})", category.user_weight, category.market_weight);
    println!();

    for factor in &category.indexes {
        let risk = RiskLevel::from_level(factor.value);
        let risk_label = match risk {
            RiskLevel::High => style(risk.label()).red(),
            RiskLevel::Elevated => style(risk.label()).yellow(),
            RiskLevel::Moderate => style(risk.label()).green(),
        };
        println!(
            "  {:28} {:>5.0}  {:>4.0}%  {}",
            factor.name, factor.value, factor.market_weight, risk_label
        );
        if let Some(v) = factor.user_value.value() {
            let note = if session.mode() == EditMode::Advanced { "" } else { " (advanced mode only)" };
            println!("  {:28} {:>5.0}  yours{}", "", v, note);
        }
        if !factor.description.is_empty() {
            println!("    {}", style(&factor.description).dim());
        }
        println!("    {}", style(risk.commentary()).dim());
    }

    Ok(())
}
