//! Claims and verification results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::intake::{IntakeError, require_text};

/// A free-text claim submitted for verification.
///
/// A claim has no identity beyond its (trimmed) text. Construction through
/// [`Claim::parse`] is the only way in, so every `Claim` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Claim(String);

impl Claim {
    /// Validate raw user input.
    pub fn parse(input: &str) -> Result<Self, IntakeError> {
        require_text(input, IntakeError::EmptyClaim).map(Self)
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Claim {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Claim::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Categorical truth assessment of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    #[serde(rename = "Partially True")]
    PartiallyTrue,
    Misleading,
    Unverified,
}

impl Verdict {
    pub const ALL: [Verdict; 5] = [
        Verdict::True,
        Verdict::False,
        Verdict::PartiallyTrue,
        Verdict::Misleading,
        Verdict::Unverified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::PartiallyTrue => "Partially True",
            Self::Misleading => "Misleading",
            Self::Unverified => "Unverified",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown verdict: {wanted:?}"))
    }
}

/// A source backing a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub link: String,
}

impl SourceCitation {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Confidence score on the 0–100 scale. Values above 100 are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// Scale a similarity in `[0, 1]` onto the 0–100 range.
    pub fn from_fraction(fraction: f32) -> Self {
        if !fraction.is_finite() || fraction <= 0.0 {
            return Self(0);
        }
        Self::new((fraction.min(1.0) * 100.0).round() as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::of(*self)
    }
}

impl From<u8> for Score {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Coarse rating of a score, used for colouring results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 80 and above.
    High,
    /// 60–79.
    Medium,
    /// Below 60.
    Low,
}

impl ScoreBand {
    pub fn of(score: Score) -> Self {
        match score.value() {
            80.. => Self::High,
            60..=79 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Outcome of verdict resolution for one claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verdict: Verdict,
    pub confidence: Score,
    pub explanation: String,
    /// Ordered as the resolver ranked them.
    pub sources: Vec<SourceCitation>,
    /// Content digest identifying this result, e.g. `0x3f9a…`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_parse_trims() {
        let claim = Claim::parse("  Vaccines cause autism  ").unwrap();
        assert_eq!(claim.text(), "Vaccines cause autism");
    }

    #[test]
    fn claim_parse_rejects_blank() {
        assert_eq!(Claim::parse("   "), Err(IntakeError::EmptyClaim));
        assert_eq!(Claim::parse(""), Err(IntakeError::EmptyClaim));
    }

    #[test]
    fn claim_deserialize_validates() {
        let ok: Claim = serde_json::from_str(r#"" The moon is made of cheese ""#).unwrap();
        assert_eq!(ok.text(), "The moon is made of cheese");
        assert!(serde_json::from_str::<Claim>(r#""  ""#).is_err());
    }

    #[test]
    fn verdict_names() {
        assert_eq!(Verdict::PartiallyTrue.to_string(), "Partially True");
        let json = serde_json::to_string(&Verdict::PartiallyTrue).unwrap();
        assert_eq!(json, r#""Partially True""#);
        assert_eq!("misleading".parse::<Verdict>(), Ok(Verdict::Misleading));
        assert_eq!("partially true".parse::<Verdict>(), Ok(Verdict::PartiallyTrue));
        assert!("maybe".parse::<Verdict>().is_err());
    }

    #[test]
    fn score_clamps() {
        assert_eq!(Score::new(250).value(), 100);
        assert_eq!(Score::from(42).value(), 42);
        let parsed: Score = serde_json::from_str("180").unwrap();
        assert_eq!(parsed.value(), 100);
    }

    #[test]
    fn score_from_fraction() {
        assert_eq!(Score::from_fraction(0.0).value(), 0);
        assert_eq!(Score::from_fraction(-0.4).value(), 0);
        assert_eq!(Score::from_fraction(0.874).value(), 87);
        assert_eq!(Score::from_fraction(1.7).value(), 100);
        assert_eq!(Score::from_fraction(f32::NAN).value(), 0);
    }

    #[test]
    fn score_bands() {
        assert_eq!(Score::new(100).band(), ScoreBand::High);
        assert_eq!(Score::new(80).band(), ScoreBand::High);
        assert_eq!(Score::new(79).band(), ScoreBand::Medium);
        assert_eq!(Score::new(60).band(), ScoreBand::Medium);
        assert_eq!(Score::new(59).band(), ScoreBand::Low);
        assert_eq!(Score::new(0).band(), ScoreBand::Low);
    }

    #[test]
    fn result_reference_is_optional() {
        let json = r#"{
            "verdict": "False",
            "confidence": 12,
            "explanation": "no support",
            "sources": [{"title": "Reuters - Fact Check", "link": "https://www.reuters.com/fact-check/"}]
        }"#;
        let result: VerificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.verdict, Verdict::False);
        assert!(result.reference.is_none());
        assert_eq!(result.sources[0].title, "Reuters - Fact Check");
    }
}
