//! Service contracts for the analysis stages.
//!
//! The workflow depends only on these traits. Each stage takes text and
//! returns a structured outcome; implementations may be simulated, local
//! classifiers, or remote models.

use async_trait::async_trait;
use truthnet_core::{
    ArgumentScores, Claim, DebateArgument, EvidenceKind, EvidenceValidation, PostAnalysis,
    PostDraft, Side, VerificationResult,
};

/// Produces a verdict for a claim.
#[async_trait]
pub trait VerdictResolver: Send + Sync {
    async fn resolve(&self, claim: &Claim) -> anyhow::Result<VerificationResult>;
}

/// Rates the credibility of one evidence item.
#[async_trait]
pub trait EvidenceScorer: Send + Sync {
    async fn validate(
        &self,
        claim: &Claim,
        kind: EvidenceKind,
        content: &str,
    ) -> anyhow::Result<EvidenceValidation>;
}

/// Scores the quality of one debate argument.
#[async_trait]
pub trait ArgumentScorer: Send + Sync {
    async fn score(&self, claim: &Claim, side: Side, content: &str)
    -> anyhow::Result<ArgumentScores>;
}

/// An argument offered by the automated participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub side: Side,
    pub content: String,
    pub scores: ArgumentScores,
}

/// The third party that joins a debate once both sides have spoken.
#[async_trait]
pub trait AutomatedParticipant: Send + Sync {
    /// Display name used as the argument author.
    fn name(&self) -> &str;

    async fn contribute(
        &self,
        claim: &Claim,
        transcript: &[DebateArgument],
    ) -> anyhow::Result<Contribution>;
}

/// Quick free-text analysis of an article.
#[async_trait]
pub trait FactChecker: Send + Sync {
    async fn check(&self, title: &str, summary: &str) -> anyhow::Result<String>;
}

/// Pre-publication review of a post draft: clarity, bias, and emotional tone.
#[async_trait]
pub trait PostAnalyzer: Send + Sync {
    async fn analyze(&self, draft: &PostDraft) -> anyhow::Result<PostAnalysis>;
}
