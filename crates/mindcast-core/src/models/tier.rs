//! Canonical membership tiers.
//!
//! The surrounding system used two vocabularies: `basic/premium/platinum` for
//! forecasts and `all/explorer/navigator/voyager` for correlation access. Only
//! the first is canonical here; legacy names go through [`MembershipTier::from_legacy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{MindcastError, RegistryError};

/// Membership tier, ordered from least to most entitled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    /// No active membership.
    #[default]
    Free,
    Basic,
    Premium,
    Platinum,
}

impl MembershipTier {
    pub const ALL: [MembershipTier; 4] = [Self::Free, Self::Basic, Self::Premium, Self::Platinum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Platinum => "platinum",
        }
    }

    /// Map a legacy correlation-side tier name onto the canonical ladder.
    ///
    /// `all` is only meaningful as a requirement ("anyone") and maps to `Free`.
    pub fn from_legacy(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "all" => Some(Self::Free),
            "explorer" => Some(Self::Basic),
            "navigator" => Some(Self::Premium),
            "voyager" => Some(Self::Platinum),
            _ => None,
        }
    }

    /// Parse either a canonical or a legacy tier name.
    pub fn parse_any(name: &str) -> Option<Self> {
        name.parse().ok().or_else(|| Self::from_legacy(name))
    }

    /// Whether this tier satisfies `required`.
    pub fn meets(self, required: MembershipTier) -> bool {
        self >= required
    }

    /// Highest tier among the active ones, `Free` when there are none.
    pub fn highest(tiers: impl IntoIterator<Item = MembershipTier>) -> Self {
        tiers.into_iter().max().unwrap_or_default()
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = MindcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| {
                RegistryError::UnknownTag {
                    kind: "membership_tier".to_string(),
                    tag: s.to_string(),
                }
                .into()
            })
    }
}
