//! Static forecast window configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tier::MembershipTier;
use crate::errors::{MindcastError, RegistryError};

/// A named future time horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ForecastWindow {
    #[serde(rename = "24_hour")]
    Hours24,
    #[serde(rename = "3_day")]
    Days3,
    #[serde(rename = "7_day")]
    Days7,
    #[serde(rename = "30_day")]
    Days30,
}

impl ForecastWindow {
    pub const ALL: [ForecastWindow; 4] = [Self::Hours24, Self::Days3, Self::Days7, Self::Days30];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hours24 => "24_hour",
            Self::Days3 => "3_day",
            Self::Days7 => "7_day",
            Self::Days30 => "30_day",
        }
    }

    /// Minimum membership tier required to receive this window.
    pub fn min_membership(&self) -> MembershipTier {
        match self {
            Self::Hours24 | Self::Days3 => MembershipTier::Basic,
            Self::Days7 => MembershipTier::Premium,
            Self::Days30 => MembershipTier::Platinum,
        }
    }

    pub fn update_frequency(&self) -> UpdateFrequency {
        match self {
            Self::Hours24 => UpdateFrequency::Hourly,
            Self::Days3 => UpdateFrequency::SixHours,
            Self::Days7 => UpdateFrequency::Daily,
            Self::Days30 => UpdateFrequency::Weekly,
        }
    }

    /// How far into the future the window reaches.
    pub fn horizon(&self) -> chrono::Duration {
        match self {
            Self::Hours24 => chrono::Duration::hours(24),
            Self::Days3 => chrono::Duration::days(3),
            Self::Days7 => chrono::Duration::days(7),
            Self::Days30 => chrono::Duration::days(30),
        }
    }

    /// Cache lifetime, derived from the update cadence.
    pub fn ttl(&self) -> chrono::Duration {
        self.update_frequency().ttl()
    }

    /// Algorithms applied, in order, when building this window.
    pub fn algorithms(&self) -> &'static [Algorithm] {
        use Algorithm::*;
        match self {
            Self::Hours24 => &[ImmediateRisk, TemporalPatterns, BiologicalCycles, CascadePrediction],
            Self::Days3 => &[TemporalPatterns, CascadePrediction, BiologicalCycles, CorrelationRisks],
            Self::Days7 => &[WeeklyPatterns, TemporalPatterns, BiologicalCycles, CorrelationRisks],
            Self::Days30 => &[SeasonalPatterns, LongTermTrends, BiologicalCycles, CorrelationRisks],
        }
    }

    /// Windows refreshed on the given cadence.
    pub fn with_frequency(frequency: UpdateFrequency) -> Vec<ForecastWindow> {
        Self::ALL
            .into_iter()
            .filter(|w| w.update_frequency() == frequency)
            .collect()
    }
}

impl fmt::Display for ForecastWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastWindow {
    type Err = MindcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| {
                RegistryError::UnknownTag {
                    kind: "forecast_window".to_string(),
                    tag: s.to_string(),
                }
                .into()
            })
    }
}

/// How often a window is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateFrequency {
    #[serde(rename = "hourly")]
    Hourly,
    #[serde(rename = "6_hours")]
    SixHours,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
}

impl UpdateFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::SixHours => "6_hours",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        match self {
            Self::Hourly => chrono::Duration::hours(1),
            Self::SixHours => chrono::Duration::hours(6),
            Self::Daily => chrono::Duration::hours(24),
            Self::Weekly => chrono::Duration::hours(168),
        }
    }
}

/// Named forecast adjustment algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    ImmediateRisk,
    TemporalPatterns,
    BiologicalCycles,
    CascadePrediction,
    WeeklyPatterns,
    CorrelationRisks,
    SeasonalPatterns,
    LongTermTrends,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Self::ImmediateRisk,
        Self::TemporalPatterns,
        Self::BiologicalCycles,
        Self::CascadePrediction,
        Self::WeeklyPatterns,
        Self::CorrelationRisks,
        Self::SeasonalPatterns,
        Self::LongTermTrends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImmediateRisk => "immediate_risk",
            Self::TemporalPatterns => "temporal_patterns",
            Self::BiologicalCycles => "biological_cycles",
            Self::CascadePrediction => "cascade_prediction",
            Self::WeeklyPatterns => "weekly_patterns",
            Self::CorrelationRisks => "correlation_risks",
            Self::SeasonalPatterns => "seasonal_patterns",
            Self::LongTermTrends => "long_term_trends",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = MindcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                RegistryError::UnknownTag {
                    kind: "algorithm".to_string(),
                    tag: s.to_string(),
                }
                .into()
            })
    }
}
