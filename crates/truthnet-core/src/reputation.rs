//! User validation tiers derived from a 0–100 reputation score.

use serde::{Deserialize, Serialize};

use crate::claim::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReputationTier {
    New,
    Regular,
    Trusted,
    Expert,
}

impl ReputationTier {
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            85.. => Self::Expert,
            70..=84 => Self::Trusted,
            50..=69 => Self::Regular,
            _ => Self::New,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Regular => "Regular",
            Self::Trusted => "Trusted",
            Self::Expert => "Expert",
        }
    }
}

/// A user's recent verification track record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub correct_claims: u32,
    pub incorrect_claims: u32,
    pub debates_won: u32,
}

impl RecentActivity {
    /// Share of claims judged correctly, or `None` with no history.
    pub fn accuracy(&self) -> Option<Score> {
        let total = u64::from(self.correct_claims) + u64::from(self.incorrect_claims);
        if total == 0 {
            return None;
        }
        Some(Score::from_fraction(
            (f64::from(self.correct_claims) / total as f64) as f32,
        ))
    }
}
