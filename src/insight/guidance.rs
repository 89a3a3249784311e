//! @acp:module "Portfolio Guidance"
//! @acp:summary "Risk-management notes and AI exposure bands for an analysis"
//! @acp:domain scoring
//! @acp:layer logic

use serde::Serialize;

use super::Stance;
use crate::model::FactorTree;

/// User score above which the whole environment is flagged
pub const HIGH_RISK_SCORE: f64 = 70.0;
/// Valuation category score above which valuation is flagged
pub const VALUATION_CONCERN_SCORE: f64 = 75.0;
/// Sentiment category score above which sentiment is flagged
pub const EXTREME_SENTIMENT_SCORE: f64 = 80.0;

/// One risk and the action suggested for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskNote {
    pub risk: &'static str,
    pub action: &'static str,
}

const HIGH_BUBBLE_RISK: RiskNote = RiskNote {
    risk: "High Bubble Risk Environment",
    action: "Set tight stop-losses and consider trimming positions that have exceeded targets. Monitor sentiment indicators closely.",
};

const VALUATION_CONCERNS: RiskNote = RiskNote {
    risk: "Valuation Concerns",
    action: "Avoid adding to positions with P/E ratios above industry averages. Focus on companies with revenue visibility and margin expansion potential.",
};

const EXTREME_SENTIMENT: RiskNote = RiskNote {
    risk: "Extreme Sentiment",
    action: "Be contrarian when retail participation peaks. Consider fading extreme moves and taking profits on momentum-driven rallies.",
};

const MARKET_VOLATILITY: RiskNote = RiskNote {
    risk: "Market Volatility",
    action: "Maintain disciplined position sizing and avoid overconcentration. Use options for downside protection if concerned.",
};

/// @acp:summary "Risk notes triggered by the user score and direct category scores"
///
/// Category checks read only a direct `userCategoryScore`; an unset override
/// never triggers. Always returns at least one note.
pub fn risk_notes(tree: &FactorTree, user_score: f64) -> Vec<RiskNote> {
    let direct_score = |id: &str| {
        tree.find_category(id)
            .ok()
            .and_then(|c| c.user_category_score.value())
            .unwrap_or(0.0)
    };

    let mut notes = Vec::new();
    if user_score > HIGH_RISK_SCORE {
        notes.push(HIGH_BUBBLE_RISK);
    }
    if direct_score("valuation") > VALUATION_CONCERN_SCORE {
        notes.push(VALUATION_CONCERNS);
    }
    if direct_score("sentiment") > EXTREME_SENTIMENT_SCORE {
        notes.push(EXTREME_SENTIMENT);
    }
    if notes.is_empty() {
        notes.push(MARKET_VOLATILITY);
    }
    notes
}

/// @acp:summary "Suggested share of a portfolio in AI names"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub min_percent: u8,
    pub max_percent: u8,
    pub reasoning: &'static str,
}

impl Allocation {
    pub fn choose(stance: Stance, user_score: f64) -> Self {
        match stance {
            Stance::Optimistic if user_score < 50.0 => Self {
                min_percent: 25,
                max_percent: 35,
                reasoning: "Your optimistic view supports higher AI allocation. Consider overweighting relative to market cap weights.",
            },
            Stance::Optimistic => Self {
                min_percent: 15,
                max_percent: 25,
                reasoning: "Moderate optimism supports market-weight to slight overweight in AI. Balance conviction with valuation discipline.",
            },
            Stance::Cautious if user_score > 80.0 => Self {
                min_percent: 5,
                max_percent: 10,
                reasoning: "Significant bubble concerns suggest minimal AI exposure. Focus on quality names and maintain tight risk controls.",
            },
            Stance::Cautious => Self {
                min_percent: 10,
                max_percent: 15,
                reasoning: "Elevated caution suggests underweight positioning. Emphasize defensive characteristics and profitability.",
            },
            Stance::Aligned => Self {
                min_percent: 15,
                max_percent: 20,
                reasoning: "Neutral view aligns with market-weight exposure. Diversify across AI value chain to manage single-stock risk.",
            },
        }
    }

    /// Band as printed, e.g. `15-20%`
    pub fn exposure(&self) -> String {
        format!("{}-{}%", self.min_percent, self.max_percent)
    }
}
