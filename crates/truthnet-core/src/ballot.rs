//! Reader votes on an article: trust, neutrality, and clarity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BallotError {
    #[error("trust votes must be +1 or -1, got {0}")]
    InvalidTrustVote(i8),

    #[error("neutrality must be between 0 and 100, got {0}")]
    NeutralityOutOfRange(u8),

    #[error("clarity must be between 1 and 5, got {0}")]
    ClarityOutOfRange(u8),
}

/// Aggregated reader votes for one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Net trust: +1 per trust vote, -1 per distrust vote.
    pub trust: i64,
    /// 0 = strongly biased, 100 = perfectly neutral.
    pub neutrality: u8,
    /// 1 (very unclear) to 5 (very clear).
    pub clarity: u8,
    pub has_voted: bool,
}

impl Default for Ballot {
    fn default() -> Self {
        Self {
            trust: 0,
            neutrality: 50,
            clarity: 3,
            has_voted: false,
        }
    }
}

impl Ballot {
    pub fn vote_trust(&mut self, delta: i8) -> Result<i64, BallotError> {
        if delta != 1 && delta != -1 {
            return Err(BallotError::InvalidTrustVote(delta));
        }
        self.trust += i64::from(delta);
        self.has_voted = true;
        Ok(self.trust)
    }

    pub fn set_neutrality(&mut self, value: u8) -> Result<(), BallotError> {
        if value > 100 {
            return Err(BallotError::NeutralityOutOfRange(value));
        }
        self.neutrality = value;
        self.has_voted = true;
        Ok(())
    }

    pub fn rate_clarity(&mut self, rating: u8) -> Result<(), BallotError> {
        if !(1..=5).contains(&rating) {
            return Err(BallotError::ClarityOutOfRange(rating));
        }
        self.clarity = rating;
        self.has_voted = true;
        Ok(())
    }

    pub fn clarity_label(&self) -> &'static str {
        match self.clarity {
            1 => "Very unclear",
            2 => "Somewhat unclear",
            3 => "Moderate",
            4 => "Mostly clear",
            _ => "Very clear",
        }
    }
}
