//! Simulated analysis services.
//!
//! Every outcome is drawn uniformly at random from a fixed result set and is
//! unrelated to the submitted content. All services share one seedable RNG so
//! a run can be reproduced from its seed.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use truthnet_core::{
    ArgumentScores, Bias, BiasReading, Claim, DebateArgument, EmotionalTone, EvidenceKind,
    EvidenceStrength, EvidenceValidation, PostAnalysis, PostDraft, Score, Side, SourceCitation,
    ToneReading, Verdict, VerificationResult,
};

use crate::reference::verification_reference;
use crate::services::{
    ArgumentScorer, AutomatedParticipant, Contribution, EvidenceScorer, FactChecker,
    PostAnalyzer, VerdictResolver,
};

pub const PARTICIPANT_NAME: &str = "TruthNet AI";

const PARTICIPANT_ARGUMENT: &str = "Based on my analysis of available evidence, I'd like to offer \
a fact-based perspective on this claim. The data suggests that while there are valid points on \
both sides, the evidence tends to support a more nuanced view that considers multiple factors \
and contexts.";

const FACT_CHECK_RESPONSES: &[&str] = &[
    "This claim appears to be accurate based on recent data from reputable sources.",
    "This claim contains partial truths but lacks important context.",
    "This claim is misleading. While technically correct in parts, it omits critical information.",
    "This claim contains significant factual errors according to multiple reliable sources.",
    "This claim needs clarification. The terminology used is ambiguous.",
];

/// Citations attached to every simulated verdict.
pub fn standard_sources() -> Vec<SourceCitation> {
    vec![
        SourceCitation::new("Reuters - Fact Check", "https://www.reuters.com/fact-check/"),
        SourceCitation::new("Associated Press News", "https://apnews.com/"),
        SourceCitation::new("BBC News Verification", "https://www.bbc.com/news/reality_check"),
    ]
}

/// Seedable RNG shared by the simulated services.
#[derive(Clone)]
pub struct SharedRng(Arc<Mutex<StdRng>>);

impl SharedRng {
    /// `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self(Arc::new(Mutex::new(rng)))
    }

    fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    fn pick<T: Copy>(&self, items: &[T]) -> T {
        self.with(|rng| items[rng.gen_range(0..items.len())])
    }

    fn score_in(&self, low: u8, high_exclusive: u8) -> Score {
        Score::new(self.with(|rng| rng.gen_range(low..high_exclusive)))
    }

    fn chance(&self, p: f64) -> bool {
        self.with(|rng| rng.gen_bool(p))
    }
}

/// Random verdict from the five-element set with a random confidence in `[0, 100)`.
pub struct SimulatedResolver {
    rng: SharedRng,
}

impl SimulatedResolver {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }
}

#[async_trait]
impl VerdictResolver for SimulatedResolver {
    async fn resolve(&self, claim: &Claim) -> anyhow::Result<VerificationResult> {
        let verdict = self.rng.pick(&Verdict::ALL);
        let confidence = self.rng.score_in(0, 100);
        debug!(%verdict, confidence = confidence.value(), "simulated verdict drawn");

        Ok(VerificationResult {
            verdict,
            confidence,
            explanation: format!(
                "Based on cross-referencing multiple reliable sources, this claim has been {}. \
                 The analysis considered factual accuracy, context, and source credibility.",
                verdict.as_str().to_lowercase()
            ),
            sources: standard_sources(),
            reference: Some(verification_reference(claim, verdict, confidence)),
        })
    }
}

/// Random strength from the four-element set, with the standard reason.
pub struct SimulatedEvidenceScorer {
    rng: SharedRng,
}

impl SimulatedEvidenceScorer {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }
}

#[async_trait]
impl EvidenceScorer for SimulatedEvidenceScorer {
    async fn validate(
        &self,
        _claim: &Claim,
        _kind: EvidenceKind,
        _content: &str,
    ) -> anyhow::Result<EvidenceValidation> {
        Ok(self.rng.pick(&EvidenceStrength::ALL).into())
    }
}

/// Each score drawn independently from `[60, 100)`.
pub struct SimulatedArgumentScorer {
    rng: SharedRng,
}

impl SimulatedArgumentScorer {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }
}

#[async_trait]
impl ArgumentScorer for SimulatedArgumentScorer {
    async fn score(
        &self,
        _claim: &Claim,
        _side: Side,
        _content: &str,
    ) -> anyhow::Result<ArgumentScores> {
        Ok(ArgumentScores {
            logical_validity: self.rng.score_in(60, 100),
            factual_accuracy: self.rng.score_in(60, 100),
            overall: self.rng.score_in(60, 100),
        })
    }
}

/// Joins on a random side with a canned, high-scoring argument.
pub struct SimulatedParticipant {
    rng: SharedRng,
}

impl SimulatedParticipant {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }
}

#[async_trait]
impl AutomatedParticipant for SimulatedParticipant {
    fn name(&self) -> &str {
        PARTICIPANT_NAME
    }

    async fn contribute(
        &self,
        _claim: &Claim,
        _transcript: &[DebateArgument],
    ) -> anyhow::Result<Contribution> {
        Ok(Contribution {
            side: self.rng.pick(&[Side::A, Side::B]),
            content: PARTICIPANT_ARGUMENT.to_string(),
            scores: ArgumentScores {
                logical_validity: Score::new(95),
                factual_accuracy: Score::new(92),
                overall: Score::new(94),
            },
        })
    }
}

pub struct SimulatedFactChecker {
    rng: SharedRng,
}

impl SimulatedFactChecker {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }
}

#[async_trait]
impl FactChecker for SimulatedFactChecker {
    async fn check(&self, _title: &str, _summary: &str) -> anyhow::Result<String> {
        Ok(self.rng.pick(FACT_CHECK_RESPONSES).to_string())
    }
}

/// Chance that emotional language is reported for a draft.
const EMOTIONAL_TONE_CHANCE: f64 = 0.3;

/// Clarity in `[70, 100)`, a random bias leaning and score, occasional
/// emotional tone, and a templated summary.
pub struct SimulatedPostAnalyzer {
    rng: SharedRng,
}

impl SimulatedPostAnalyzer {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }
}

#[async_trait]
impl PostAnalyzer for SimulatedPostAnalyzer {
    async fn analyze(&self, draft: &PostDraft) -> anyhow::Result<PostAnalysis> {
        let emotional = if self.rng.chance(EMOTIONAL_TONE_CHANCE) {
            ToneReading::detected(self.rng.pick(&EmotionalTone::ALL))
        } else {
            ToneReading::none()
        };
        let analysis = PostAnalysis {
            clarity: self.rng.score_in(70, 100),
            bias: BiasReading {
                leaning: self.rng.pick(&Bias::ALL),
                score: self.rng.score_in(0, 100),
            },
            emotional,
            summary: format!(
                "{} discusses important perspectives on {} with several key points \
                 highlighting both challenges and opportunities.",
                draft.title,
                draft.topic()
            ),
        };
        debug!(title = %draft.title, clarity = %analysis.clarity, "simulated post analysis");
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn claim() -> Claim {
        Claim::parse("Vaccines cause autism").unwrap()
    }

    #[tokio::test]
    async fn resolver_stays_in_range() {
        let resolver = SimulatedResolver::new(SharedRng::new(Some(1)));
        for _ in 0..200 {
            let result = resolver.resolve(&claim()).await.unwrap();
            assert!(Verdict::ALL.contains(&result.verdict));
            assert!(result.confidence.value() < 100);
            assert_eq!(result.sources.len(), 3);
            assert!(
                result
                    .explanation
                    .contains(&result.verdict.as_str().to_lowercase())
            );
            assert!(result.reference.as_deref().is_some_and(|r| r.starts_with("0x")));
        }
    }

    #[tokio::test]
    async fn resolver_covers_every_verdict() {
        let resolver = SimulatedResolver::new(SharedRng::new(Some(99)));
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(resolver.resolve(&claim()).await.unwrap().verdict);
        }
        assert_eq!(seen.len(), Verdict::ALL.len());
    }

    #[tokio::test]
    async fn same_seed_same_outcomes() {
        let a = SimulatedResolver::new(SharedRng::new(Some(42)));
        let b = SimulatedResolver::new(SharedRng::new(Some(42)));
        for _ in 0..20 {
            assert_eq!(
                a.resolve(&claim()).await.unwrap(),
                b.resolve(&claim()).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn evidence_scorer_uses_standard_reasons() {
        let scorer = SimulatedEvidenceScorer::new(SharedRng::new(Some(3)));
        for _ in 0..50 {
            let v = scorer
                .validate(&claim(), EvidenceKind::Link, "https://example.org")
                .await
                .unwrap();
            assert!(EvidenceStrength::ALL.contains(&v.strength));
            assert_eq!(v.reason, v.strength.reason());
        }
    }

    #[tokio::test]
    async fn argument_scores_between_60_and_99() {
        let scorer = SimulatedArgumentScorer::new(SharedRng::new(Some(5)));
        for _ in 0..100 {
            let s = scorer.score(&claim(), Side::A, "because").await.unwrap();
            for v in [s.logical_validity, s.factual_accuracy, s.overall] {
                assert!((60..100).contains(&v.value()), "score {v} out of range");
            }
        }
    }

    #[tokio::test]
    async fn participant_uses_fixed_scores() {
        let participant = SimulatedParticipant::new(SharedRng::new(Some(8)));
        let c = participant.contribute(&claim(), &[]).await.unwrap();
        assert_eq!(participant.name(), "TruthNet AI");
        assert_eq!(c.scores.overall, Score::new(94));
        assert_eq!(c.scores.logical_validity, Score::new(95));
        assert_eq!(c.scores.factual_accuracy, Score::new(92));
    }

    #[tokio::test]
    async fn fact_checker_picks_canned_response() {
        let checker = SimulatedFactChecker::new(SharedRng::new(None));
        let answer = checker.check("Headline", "Summary").await.unwrap();
        assert!(FACT_CHECK_RESPONSES.contains(&answer.as_str()));
    }

    #[tokio::test]
    async fn post_analysis_ranges() {
        let analyzer = SimulatedPostAnalyzer::new(SharedRng::new(Some(11)));
        let draft = PostDraft::parse("Grid storage", "Batteries are scaling.", Some("Technology"))
            .unwrap();
        let mut tones = 0;
        for _ in 0..200 {
            let a = analyzer.analyze(&draft).await.unwrap();
            assert!((70..100).contains(&a.clarity.value()));
            assert!(a.bias.score.value() < 100);
            assert_eq!(a.emotional.detected, a.emotional.tone.is_some());
            if a.emotional.detected {
                tones += 1;
            }
            assert_eq!(
                a.summary,
                "Grid storage discusses important perspectives on technology with several \
                 key points highlighting both challenges and opportunities."
            );
        }
        assert!(tones > 0 && tones < 200);
    }
}
