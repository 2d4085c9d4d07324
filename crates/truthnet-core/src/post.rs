//! Post drafts and their pre-publication analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claim::Score;
use crate::intake::{IntakeError, require_text};

/// A post awaiting analysis. Title and content are both required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl PostDraft {
    /// Trim all fields; a blank category is treated as none.
    pub fn parse(title: &str, content: &str, category: Option<&str>) -> Result<Self, IntakeError> {
        let title = require_text(title, IntakeError::EmptyPost)?;
        let content = require_text(content, IntakeError::EmptyPost)?;
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Ok(Self {
            title,
            content,
            category,
        })
    }

    /// Lowercased category, or "this topic" when none was chosen.
    pub fn topic(&self) -> String {
        self.category
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| "this topic".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Left,
    Right,
    Neutral,
}

impl Bias {
    pub const ALL: [Bias; 3] = [Self::Left, Self::Right, Self::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasReading {
    pub leaning: Bias,
    pub score: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTone {
    Anger,
    Fear,
    Hope,
}

impl EmotionalTone {
    pub const ALL: [EmotionalTone; 3] = [Self::Anger, Self::Fear, Self::Hope];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Hope => "hope",
        }
    }
}

impl fmt::Display for EmotionalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotional language detection. `tone` is only set when `detected` is true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneReading {
    pub detected: bool,
    #[serde(default)]
    pub tone: Option<EmotionalTone>,
}

impl ToneReading {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn detected(tone: EmotionalTone) -> Self {
        Self {
            detected: true,
            tone: Some(tone),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAnalysis {
    pub clarity: Score,
    pub bias: BiasReading,
    pub emotional: ToneReading,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_title_and_content() {
        assert_eq!(
            PostDraft::parse("", "body", None),
            Err(IntakeError::EmptyPost)
        );
        assert_eq!(
            PostDraft::parse("Title", "  \n", None),
            Err(IntakeError::EmptyPost)
        );
        assert!(IntakeError::EmptyPost.to_string().starts_with("Missing content"));
    }

    #[test]
    fn draft_trims_and_drops_blank_category() {
        let draft = PostDraft::parse(" Heat waves ", " Summers are longer. ", Some("  ")).unwrap();
        assert_eq!(draft.title, "Heat waves");
        assert_eq!(draft.content, "Summers are longer.");
        assert_eq!(draft.category, None);
        assert_eq!(draft.topic(), "this topic");

        let draft = PostDraft::parse("t", "c", Some("Environment")).unwrap();
        assert_eq!(draft.topic(), "environment");
    }

    #[test]
    fn analysis_json_shape() {
        let analysis = PostAnalysis {
            clarity: Score::new(82),
            bias: BiasReading {
                leaning: Bias::Neutral,
                score: Score::new(12),
            },
            emotional: ToneReading::detected(EmotionalTone::Hope),
            summary: "s".into(),
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["bias"]["leaning"], "neutral");
        assert_eq!(json["emotional"]["tone"], "hope");
        assert_eq!(json["clarity"], 82);
    }
}
