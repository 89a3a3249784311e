//! @acp:module "Insight"
//! @acp:summary "Scenario commentary derived from market vs user scores"
//! @acp:domain scoring
//! @acp:layer logic
//!
//! Pure derivations over a scored tree: stance, significant category
//! adjustments, positioning advice, risk notes, exposure bands and risk
//! levels. No state of its own.

pub mod guidance;
pub mod risk;

use serde::Serialize;

use crate::config::InsightConfig;
use crate::model::{EditMode, FactorTree};
use crate::scoring::{baseline_mean, category_score, Scores, Weighting};

pub use guidance::{risk_notes, Allocation, RiskNote};
pub use risk::RiskLevel;

/// @acp:summary "How the user's view compares to market consensus"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    /// User sees less bubble risk than the market
    Optimistic,
    /// User sees more bubble risk than the market
    Cautious,
    Aligned,
}

impl Stance {
    pub fn classify(scores: &Scores, threshold: f64) -> Self {
        let diff = scores.difference();
        if diff < -threshold {
            Stance::Optimistic
        } else if diff > threshold {
            Stance::Cautious
        } else {
            Stance::Aligned
        }
    }

    pub fn likelihood(&self) -> &'static str {
        match self {
            Stance::Optimistic => "Moderate-to-High",
            Stance::Cautious => "Moderate",
            Stance::Aligned => "High",
        }
    }

    fn opening(&self) -> &'static str {
        match self {
            Stance::Optimistic => "You're taking a more optimistic stance than the market consensus.",
            Stance::Cautious => "You're taking a more cautious view than the market consensus.",
            Stance::Aligned => "Your analysis aligns closely with market consensus.",
        }
    }
}

/// A category whose user score departs from its baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub category_id: String,
    pub category: String,
    pub user_score: f64,
    pub market_score: f64,
    /// `user - market`
    pub diff: f64,
}

impl Adjustment {
    pub fn raises_risk(&self) -> bool {
        self.diff > 0.0
    }

    /// One sentence describing the adjustment
    pub fn describe(&self) -> String {
        let you = format!("your score: {:.0} vs market: {:.0}", self.user_score, self.market_score);
        match (self.category_id.as_str(), self.raises_risk()) {
            ("valuation", false) => format!(
                "You believe AI valuations are more justified than the market thinks ({}), suggesting stronger fundamentals behind current prices.",
                you
            ),
            ("valuation", true) => format!(
                "You see AI valuations as more stretched than the market consensus ({}), implying P/E ratios and revenue multiples look unsustainably high.",
                you
            ),
            ("sentiment", false) => format!(
                "You're less concerned about sentiment and hype ({}), suggesting the enthusiasm is warranted.",
                you
            ),
            ("sentiment", true) => format!(
                "You see sentiment and hype as more excessive than the market ({}), indicating media coverage and social buzz have run ahead.",
                you
            ),
            ("macro", true) => format!(
                "You're more worried about macro conditions and liquidity ({}), suggesting concern about rates or tighter financial conditions.",
                you
            ),
            ("fundamentals", false) => format!(
                "You're more confident in AI infrastructure and profitability ({}), expecting revenue growth and adoption to accelerate.",
                you
            ),
            ("fundamentals", true) => format!(
                "You're skeptical about AI fundamentals and profitability ({}), suggesting concern about CapEx sustainability or margins.",
                you
            ),
            (_, false) => format!(
                "You rated {} lower ({:.0}) than market consensus ({:.0}), suggesting reduced concerns in this area.",
                self.category, self.user_score, self.market_score
            ),
            (_, true) => format!(
                "You rated {} higher ({:.0}) than market consensus ({:.0}), indicating heightened concerns.",
                self.category, self.user_score, self.market_score
            ),
        }
    }
}

/// @acp:summary "Categories whose Normal-mode score moved beyond `threshold`"
pub fn significant_adjustments(tree: &FactorTree, threshold: f64) -> Vec<Adjustment> {
    tree.iter()
        .filter_map(|c| {
            let market_score = baseline_mean(c)?;
            let user_score = category_score(c, Weighting::User(EditMode::Normal))?;
            let diff = user_score - market_score;
            (diff.abs() > threshold).then(|| Adjustment {
                category_id: c.id.clone(),
                category: c.name.clone(),
                user_score,
                market_score,
                diff,
            })
        })
        .collect()
}

/// @acp:summary "Portfolio positioning suggested by stance and user score"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Positioning {
    AggressiveGrowth,
    SelectiveGrowth,
    Defensive,
    Cautious,
    Balanced,
}

impl Positioning {
    pub fn choose(stance: Stance, user_score: f64) -> Self {
        match stance {
            Stance::Optimistic if user_score < 60.0 => Positioning::AggressiveGrowth,
            Stance::Optimistic => Positioning::SelectiveGrowth,
            Stance::Cautious if user_score > 75.0 => Positioning::Defensive,
            Stance::Cautious => Positioning::Cautious,
            Stance::Aligned => Positioning::Balanced,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Positioning::AggressiveGrowth => "Aggressive Growth Positioning",
            Positioning::SelectiveGrowth => "Selective Growth Positioning",
            Positioning::Defensive => "Defensive/Hedged Positioning",
            Positioning::Cautious => "Cautious Positioning",
            Positioning::Balanced => "Balanced Positioning",
        }
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Positioning::AggressiveGrowth => &[
                "Consider overweight positions in AI leaders with strong revenue growth",
                "Look at cloud infrastructure providers benefiting from AI compute demand",
                "Explore semiconductor companies supplying AI chips and accelerators",
                "Consider AI software platforms with high gross margins and recurring revenue",
            ],
            Positioning::SelectiveGrowth => &[
                "Focus on AI companies with proven profitability and reasonable valuations",
                "Consider enterprise AI companies with long-term contracts",
                "Look at AI infrastructure plays with pricing power and expanding margins",
                "Balance growth exposure with companies showing sustainable cash flow",
            ],
            Positioning::Defensive => &[
                "Reduce exposure to high-valuation AI names with no clear path to profitability",
                "Consider taking profits on positions with stretched multiples",
                "Look at portfolio hedges on AI-heavy indices",
                "Rotate into AI beneficiaries with lower valuations",
            ],
            Positioning::Cautious => &[
                "Trim positions trading at peak valuations without earnings support",
                "Focus on AI companies with strong balance sheets and positive free cash flow",
                "Prefer profitable AI businesses with durable moats",
                "Diversify beyond pure-play AI names to reduce concentration risk",
            ],
            Positioning::Balanced => &[
                "Maintain market-weight exposure to the AI sector",
                "Balance growth leaders and value opportunities within the AI ecosystem",
                "Consider both direct AI plays and indirect beneficiaries",
                "Rebalance regularly to keep target allocations",
            ],
        }
    }
}

/// @acp:summary "Full scenario analysis for one recomputation"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub market_score: f64,
    pub user_score: f64,
    pub difference: f64,
    pub stance: Stance,
    pub likelihood: &'static str,
    pub adjustments: Vec<Adjustment>,
    pub positioning: Positioning,
    pub allocation: Allocation,
    pub risks: Vec<RiskNote>,
    pub summary: String,
}

/// Build the analysis for a user tree and its scores
pub fn analyze(tree: &FactorTree, scores: &Scores, config: &InsightConfig) -> Analysis {
    let stance = Stance::classify(scores, config.stance_threshold);
    let adjustments = significant_adjustments(tree, config.significant_diff);

    let summary = std::iter::once(stance.opening().to_string())
        .chain(adjustments.iter().map(Adjustment::describe))
        .collect::<Vec<_>>()
        .join(" ");

    Analysis {
        market_score: scores.market_score,
        user_score: scores.user_score,
        difference: scores.difference(),
        stance,
        likelihood: stance.likelihood(),
        positioning: Positioning::choose(stance, scores.user_score),
        allocation: Allocation::choose(stance, scores.user_score),
        risks: risk_notes(tree, scores.user_score),
        adjustments,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{catalog, Override};

    fn scores(market: f64, user: f64) -> Scores {
        Scores {
            market_score: market,
            user_score: user,
        }
    }

    #[test]
    fn test_stance_thresholds() {
        assert_eq!(Stance::classify(&scores(70.0, 64.0), 5.0), Stance::Optimistic);
        assert_eq!(Stance::classify(&scores(70.0, 65.0), 5.0), Stance::Aligned);
        assert_eq!(Stance::classify(&scores(70.0, 75.5), 5.0), Stance::Cautious);
    }

    #[test]
    fn test_positioning_choice() {
        assert_eq!(Positioning::choose(Stance::Optimistic, 55.0), Positioning::AggressiveGrowth);
        assert_eq!(Positioning::choose(Stance::Optimistic, 60.0), Positioning::SelectiveGrowth);
        assert_eq!(Positioning::choose(Stance::Cautious, 80.0), Positioning::Defensive);
        assert_eq!(Positioning::choose(Stance::Cautious, 75.0), Positioning::Cautious);
        assert_eq!(Positioning::choose(Stance::Aligned, 99.0), Positioning::Balanced);
        assert_eq!(Positioning::Balanced.suggestions().len(), 4);
    }

    #[test]
    fn test_significant_adjustments_use_category_scores() {
        let mut tree = catalog::builtin().unwrap().user_copy();
        // valuation baseline 78.25
        tree.find_category_mut("valuation").unwrap().user_category_score = Override::Set(60.0);
        // macro baseline 65, within threshold
        tree.find_category_mut("macro").unwrap().user_category_score = Override::Set(70.0);

        let adjustments = significant_adjustments(&tree, 10.0);
        assert_eq!(adjustments.len(), 1);
        assert_eq!(adjustments[0].category_id, "valuation");
        assert!(!adjustments[0].raises_risk());
        assert!(adjustments[0].describe().contains("more justified"));
    }

    #[test]
    fn test_generic_description_for_unknown_category() {
        let adj = Adjustment {
            category_id: "positioning".to_string(),
            category: "Positioning & Flows".to_string(),
            user_score: 90.0,
            market_score: 75.25,
            diff: 14.75,
        };
        assert_eq!(
            adj.describe(),
            "You rated Positioning & Flows higher (90) than market consensus (75), indicating heightened concerns."
        );
    }

    #[test]
    fn test_analyze_summary() {
        let tree = catalog::builtin().unwrap().user_copy();
        let analysis = analyze(&tree, &scores(74.82, 74.82), &InsightConfig::default());
        assert_eq!(analysis.stance, Stance::Aligned);
        assert_eq!(analysis.positioning, Positioning::Balanced);
        assert!(analysis.adjustments.is_empty());
        assert_eq!(analysis.allocation.exposure(), "15-20%");
        // 74.82 is above the high-risk line
        assert_eq!(analysis.risks.len(), 1);
        assert_eq!(analysis.risks[0].risk, "High Bubble Risk Environment");
        assert_eq!(analysis.summary, "Your analysis aligns closely with market consensus.");
    }
}
