use std::fmt;

use serde::{Deserialize, Serialize};

/// Menstrual cycle phase reported by the user's biological tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    /// Additive risk for each phase.
    pub fn risk(&self) -> f64 {
        match self {
            Self::Menstrual => 0.2,
            Self::Follicular => 0.0,
            Self::Ovulation => 0.1,
            Self::Luteal => 0.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menstrual => "menstrual",
            Self::Follicular => "follicular",
            Self::Ovulation => "ovulation",
            Self::Luteal => "luteal",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coping strategy with its recorded effectiveness for this user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopingStrategy {
    pub name: String,
    /// Mean self-rated effectiveness (0–1).
    pub effectiveness: f64,
    pub times_used: u32,
}
