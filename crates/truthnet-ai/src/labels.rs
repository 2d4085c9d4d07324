//! Reference claims with known verdicts, used to train the centroid classifier.
//!
//! Loaded from a JSON array:
//!
//! ```json
//! [
//!   {"claim": "Vaccines cause autism", "verdict": "False",
//!    "sources": [{"title": "CDC", "link": "https://www.cdc.gov/vaccinesafety/"}]}
//! ]
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use truthnet_core::{Claim, SourceCitation, Verdict};

/// Verdicts excluded from centroid computation. `Unverified` is the fallback
/// answer, not a class the classifier should learn.
pub const EXCLUDE_VERDICTS: &[Verdict] = &[Verdict::Unverified];

#[derive(Debug, Clone, Deserialize)]
pub struct LabelledClaim {
    pub claim: Claim,
    pub verdict: Verdict,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
}

/// Ground-truth verdicts keyed by normalised claim text.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    pub claims: Vec<LabelledClaim>,
    by_text: HashMap<String, usize>,
}

/// Summary statistics for a LabelSet.
pub struct LabelSummary {
    pub total_claims: usize,
    pub trainable_claims: usize,
    pub with_sources: usize,
    pub distinct_verdicts: usize,
}

impl LabelSet {
    pub fn new(claims: Vec<LabelledClaim>) -> Self {
        let by_text = claims
            .iter()
            .enumerate()
            .map(|(i, c)| (normalise(c.claim.text()), i))
            .collect();
        Self { claims, by_text }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let claims: Vec<LabelledClaim> =
            serde_json::from_str(json).context("parsing labelled claims")?;
        Ok(Self::new(claims))
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading labels from {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn summary(&self) -> LabelSummary {
        let distinct: HashSet<Verdict> = self.claims.iter().map(|c| c.verdict).collect();
        LabelSummary {
            total_claims: self.claims.len(),
            trainable_claims: self.trainable_claims().count(),
            with_sources: self.claims.iter().filter(|c| !c.sources.is_empty()).count(),
            distinct_verdicts: distinct.len(),
        }
    }

    /// Iterate over `(claim_text, verdict)` pairs, excluding [`EXCLUDE_VERDICTS`].
    pub fn trainable_claims(&self) -> impl Iterator<Item = (&str, Verdict)> {
        self.claims
            .iter()
            .filter(|c| !EXCLUDE_VERDICTS.contains(&c.verdict))
            .map(|c| (c.claim.text(), c.verdict))
    }

    /// Ground-truth verdict for a claim, matched case- and whitespace-insensitively.
    pub fn verdict_for(&self, text: &str) -> Option<Verdict> {
        self.by_text
            .get(&normalise(text))
            .map(|&i| self.claims[i].verdict)
    }

    /// Sources cited by reference claims with the given verdict, deduplicated by link.
    pub fn sources_for(&self, verdict: Verdict) -> Vec<SourceCitation> {
        let mut seen = HashSet::new();
        self.claims
            .iter()
            .filter(|c| c.verdict == verdict)
            .flat_map(|c| c.sources.iter())
            .filter(|s| seen.insert(s.link.clone()))
            .cloned()
            .collect()
    }
}

fn normalise(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {"claim": "Vaccines cause autism", "verdict": "False",
         "sources": [{"title": "CDC", "link": "https://www.cdc.gov/vaccinesafety/"}]},
        {"claim": "MMR vaccine linked to autism", "verdict": "False",
         "sources": [{"title": "CDC", "link": "https://www.cdc.gov/vaccinesafety/"},
                     {"title": "WHO", "link": "https://www.who.int/"}]},
        {"claim": "Global temperatures are rising", "verdict": "True"},
        {"claim": "Aliens built the pyramids", "verdict": "Unverified"}
    ]"#;

    #[test]
    fn parses_fixture() {
        let labels = LabelSet::from_json(FIXTURE).unwrap();
        let summary = labels.summary();
        assert_eq!(summary.total_claims, 4);
        assert_eq!(summary.trainable_claims, 3);
        assert_eq!(summary.with_sources, 2);
        assert_eq!(summary.distinct_verdicts, 3);
    }

    #[test]
    fn trainable_excludes_unverified() {
        let labels = LabelSet::from_json(FIXTURE).unwrap();
        assert!(labels.trainable_claims().all(|(_, v)| v != Verdict::Unverified));
    }

    #[test]
    fn verdict_lookup_is_normalised() {
        let labels = LabelSet::from_json(FIXTURE).unwrap();
        assert_eq!(labels.verdict_for("  vaccines   CAUSE autism "), Some(Verdict::False));
        assert_eq!(labels.verdict_for("Cats can fly"), None);
    }

    #[test]
    fn sources_deduplicated() {
        let labels = LabelSet::from_json(FIXTURE).unwrap();
        let sources = labels.sources_for(Verdict::False);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "CDC");
        assert!(labels.sources_for(Verdict::True).is_empty());
    }

    #[test]
    fn rejects_blank_claims() {
        let err = LabelSet::from_json(r#"[{"claim": "  ", "verdict": "True"}]"#);
        assert!(err.is_err());
    }
}
