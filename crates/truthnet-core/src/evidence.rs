//! Evidence items submitted for or against a claim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an evidence item, unique within one evidence board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvidenceId(pub u64);

impl fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ev-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Link,
    Text,
}

impl EvidenceKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Link => "Link Evidence",
            Self::Text => "Text Evidence",
        }
    }
}

/// Credibility rating attached to an evidence item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvidenceStrength {
    Strong,
    Weak,
    Irrelevant,
    Fake,
}

impl EvidenceStrength {
    pub const ALL: [EvidenceStrength; 4] = [
        EvidenceStrength::Strong,
        EvidenceStrength::Weak,
        EvidenceStrength::Irrelevant,
        EvidenceStrength::Fake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Weak => "Weak",
            Self::Irrelevant => "Irrelevant",
            Self::Fake => "Fake",
        }
    }

    /// Standard explanation for a rating.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Strong => "Evidence is from a credible source and directly supports the claim.",
            Self::Weak => "Evidence has some relevance but lacks strong credibility or context.",
            Self::Irrelevant => "Evidence does not relate to the specific claim being verified.",
            Self::Fake => "Evidence appears to be fabricated or from an unreliable source.",
        }
    }
}

impl fmt::Display for EvidenceStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceValidation {
    pub strength: EvidenceStrength,
    pub reason: String,
}

impl From<EvidenceStrength> for EvidenceValidation {
    fn from(strength: EvidenceStrength) -> Self {
        Self {
            strength,
            reason: strength.reason().to_string(),
        }
    }
}

/// A link or text snippet submitted for a claim.
///
/// `validation` is `None` until the scorer has rated the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: EvidenceId,
    pub kind: EvidenceKind,
    pub content: String,
    #[serde(default)]
    pub validation: Option<EvidenceValidation>,
}

impl EvidenceItem {
    pub fn is_validated(&self) -> bool {
        self.validation.is_some()
    }
}
