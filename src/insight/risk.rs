//! @acp:module "Risk Bands"
//! @acp:summary "Map a 0-100 level to a coarse risk label"
//! @acp:domain scoring
//! @acp:layer logic

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Moderate,
    Elevated,
    High,
}

impl RiskLevel {
    /// High from 70, Elevated from 50, Moderate below
    pub fn from_level(level: f64) -> Self {
        if level >= 70.0 {
            RiskLevel::High
        } else if level >= 50.0 {
            RiskLevel::Elevated
        } else {
            RiskLevel::Moderate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Elevated => "Elevated",
            RiskLevel::Moderate => "Moderate",
        }
    }

    pub fn commentary(&self) -> &'static str {
        match self {
            RiskLevel::High => "Elevated bubble risk; historically vulnerable to corrections.",
            RiskLevel::Elevated => "Moderate concern; worth monitoring but not critical yet.",
            RiskLevel::Moderate => "Within healthy ranges; no immediate bubble concern.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
