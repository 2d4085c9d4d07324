//! The set of analysis services a workflow runs against.

use std::sync::Arc;

use truthnet_ai::{
    ArgumentScorer, AutomatedParticipant, EvidenceScorer, FactChecker, PostAnalyzer, SharedRng,
    SimulatedArgumentScorer, SimulatedEvidenceScorer, SimulatedFactChecker, SimulatedParticipant,
    SimulatedPostAnalyzer, SimulatedResolver, VerdictResolver,
};

#[derive(Clone)]
pub struct Services {
    pub resolver: Arc<dyn VerdictResolver>,
    pub evidence_scorer: Arc<dyn EvidenceScorer>,
    pub argument_scorer: Arc<dyn ArgumentScorer>,
    pub participant: Arc<dyn AutomatedParticipant>,
    pub fact_checker: Arc<dyn FactChecker>,
    pub post_analyzer: Arc<dyn PostAnalyzer>,
}

impl Services {
    /// Every stage simulated, sharing one RNG. `None` seeds from the OS.
    pub fn simulated(seed: Option<u64>) -> Self {
        let rng = SharedRng::new(seed);
        Self {
            resolver: Arc::new(SimulatedResolver::new(rng.clone())),
            evidence_scorer: Arc::new(SimulatedEvidenceScorer::new(rng.clone())),
            argument_scorer: Arc::new(SimulatedArgumentScorer::new(rng.clone())),
            participant: Arc::new(SimulatedParticipant::new(rng.clone())),
            fact_checker: Arc::new(SimulatedFactChecker::new(rng.clone())),
            post_analyzer: Arc::new(SimulatedPostAnalyzer::new(rng)),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn VerdictResolver>) -> Self {
        self.resolver = resolver;
        self
    }
}
