//! Two-sided debate arguments and the debate phase machine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::claim::Score;

/// Which side of the claim an argument takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Supports the claim.
    A,
    /// Opposes the claim.
    B,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub fn stance(&self) -> &'static str {
        match self {
            Self::A => "Support",
            Self::B => "Oppose",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "support" => Ok(Self::A),
            "b" | "oppose" => Ok(Self::B),
            other => Err(format!("unknown side: {other:?} (expected A or B)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArgumentId(pub u64);

impl fmt::Display for ArgumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arg-{}", self.0)
    }
}

/// Quality scores assigned to an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentScores {
    pub logical_validity: Score,
    pub factual_accuracy: Score,
    pub overall: Score,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateArgument {
    pub id: ArgumentId,
    pub author: String,
    pub side: Side,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// `None` until the argument has been scored.
    #[serde(default)]
    pub scores: Option<ArgumentScores>,
    /// Contributed by the automated participant rather than a user.
    #[serde(default)]
    pub automated: bool,
}

/// Lifecycle of a debate.
///
/// `NoArguments → OneSided → BothSides → AutomatedParticipantJoined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DebatePhase {
    NoArguments,
    OneSided,
    BothSides,
    AutomatedParticipantJoined,
}

impl DebatePhase {
    /// Derive the phase from a transcript.
    pub fn of(arguments: &[DebateArgument]) -> Self {
        if arguments.iter().any(|a| a.automated) {
            return Self::AutomatedParticipantJoined;
        }
        let side_a = arguments.iter().any(|a| a.side == Side::A);
        let side_b = arguments.iter().any(|a| a.side == Side::B);
        match (side_a, side_b) {
            (false, false) => Self::NoArguments,
            (true, true) => Self::BothSides,
            _ => Self::OneSided,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoArguments => "no arguments",
            Self::OneSided => "one-sided",
            Self::BothSides => "both sides",
            Self::AutomatedParticipantJoined => "automated participant joined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(id: u64, side: Side, automated: bool) -> DebateArgument {
        DebateArgument {
            id: ArgumentId(id),
            author: "tester".into(),
            side,
            content: "because".into(),
            timestamp: Utc::now(),
            scores: None,
            automated,
        }
    }

    #[test]
    fn phase_progression() {
        let mut transcript = Vec::new();
        assert_eq!(DebatePhase::of(&transcript), DebatePhase::NoArguments);

        transcript.push(arg(1, Side::A, false));
        transcript.push(arg(2, Side::A, false));
        assert_eq!(DebatePhase::of(&transcript), DebatePhase::OneSided);

        transcript.push(arg(3, Side::B, false));
        assert_eq!(DebatePhase::of(&transcript), DebatePhase::BothSides);

        transcript.push(arg(4, Side::A, true));
        assert_eq!(
            DebatePhase::of(&transcript),
            DebatePhase::AutomatedParticipantJoined
        );
    }

    #[test]
    fn side_b_alone_is_one_sided() {
        assert_eq!(
            DebatePhase::of(&[arg(1, Side::B, false)]),
            DebatePhase::OneSided
        );
    }

    #[test]
    fn side_parsing() {
        assert_eq!("a".parse::<Side>(), Ok(Side::A));
        assert_eq!("Oppose".parse::<Side>(), Ok(Side::B));
        assert!("c".parse::<Side>().is_err());
        assert_eq!(Side::A.opposite(), Side::B);
    }
}
