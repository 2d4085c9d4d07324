//! Claim verification workflow: intake, verdict resolution, evidence
//! validation, debate, discussion, and post analysis, wired to pluggable services.
//!
//! Delayed work runs as tokio tasks. Constructors and `submit` methods must be
//! called from within a tokio runtime.

use std::sync::{Mutex, MutexGuard, PoisonError};

mod debate;
mod desk;
mod discussion;
mod editor;
mod error;
mod events;
mod evidence;
mod services;
mod tasks;

pub use debate::DebateRoom;
pub use desk::{ClaimDesk, PendingVerdict};
pub use discussion::Discussion;
pub use editor::PostEditor;
pub use error::WorkflowError;
pub use events::{EventKind, EventLog, WorkflowEvent};
pub use evidence::EvidenceBoard;
pub use services::Services;

use truthnet_core::{Claim, WorkflowConfig};

/// Factory for the stages of one verification session.
///
/// All stages created from the same `Workflow` share its event log.
pub struct Workflow {
    config: WorkflowConfig,
    services: Services,
    events: EventLog,
}

impl Workflow {
    pub fn new(config: WorkflowConfig, services: Services) -> Self {
        Self {
            config,
            services,
            events: EventLog::new(),
        }
    }

    /// Every stage simulated, seeded from `config.seed`.
    pub fn simulated(config: WorkflowConfig) -> Self {
        let services = Services::simulated(config.seed);
        Self::new(config, services)
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn claim_desk(&self) -> ClaimDesk {
        ClaimDesk::new(
            self.services.resolver.clone(),
            self.config.verdict_latency(),
            self.events.clone(),
        )
    }

    pub fn evidence_board(&self, claim: &Claim) -> EvidenceBoard {
        EvidenceBoard::new(
            claim.clone(),
            self.services.evidence_scorer.clone(),
            self.config.evidence_latency(),
            self.events.clone(),
        )
    }

    pub fn debate_room(&self, claim: &Claim) -> DebateRoom {
        DebateRoom::new(
            claim.clone(),
            self.services.argument_scorer.clone(),
            self.services.participant.clone(),
            self.config.argument_latency(),
            self.config.participant_delay(),
            self.events.clone(),
        )
    }

    pub fn discussion(&self) -> Discussion {
        Discussion::new(
            self.services.fact_checker.clone(),
            self.config.fact_check_latency(),
            self.events.clone(),
        )
    }

    pub fn post_editor(&self) -> PostEditor {
        PostEditor::new(
            self.services.post_analyzer.clone(),
            self.config.post_analysis_latency(),
            self.events.clone(),
        )
    }
}

/// Author recorded for submissions with a blank name.
pub(crate) const ANONYMOUS: &str = "Anonymous";

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use truthnet_core::{DebatePhase, EvidenceKind, Side, Verdict};

    #[tokio::test]
    async fn full_session() {
        let workflow = Workflow::simulated(WorkflowConfig::immediate().with_seed(2024));

        let result = workflow
            .claim_desk()
            .verify("Vaccines cause autism")
            .await
            .unwrap();
        assert!(Verdict::ALL.contains(&result.verdict));
        assert!(result.confidence.value() <= 100);

        let claim = Claim::parse("Vaccines cause autism").unwrap();
        let board = workflow.evidence_board(&claim);
        board
            .submit(EvidenceKind::Link, "https://www.cdc.gov/vaccinesafety/")
            .unwrap();
        board.settle().await.unwrap();
        assert_eq!(board.pending(), 0);

        let room = workflow.debate_room(&claim);
        room.submit("alice", Side::A, "A 1998 paper said so.").unwrap();
        assert_eq!(room.phase(), DebatePhase::OneSided);
        room.submit("bob", Side::B, "That paper was retracted.").unwrap();
        room.settle().await.unwrap();
        assert_eq!(room.phase(), DebatePhase::AutomatedParticipantJoined);

        let events = workflow.events().drain();
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds[0], EventKind::VerificationRequested);
        assert!(kinds.contains(&EventKind::VerificationComplete));
        assert!(kinds.contains(&EventKind::ProofValidated));
        assert!(kinds.contains(&EventKind::ParticipantJoined));

        let analysis = workflow
            .post_editor()
            .analyze("Vaccine safety", "Large studies found no link.", Some("Health"))
            .await
            .unwrap();
        assert!((70..100).contains(&analysis.clarity.value()));
        assert_eq!(workflow.events().count(EventKind::PostAnalyzed), 1);
    }

    #[tokio::test]
    async fn seeded_workflows_agree() {
        let a = Workflow::simulated(WorkflowConfig::immediate().with_seed(7));
        let b = Workflow::simulated(WorkflowConfig::immediate().with_seed(7));
        let ra = a.claim_desk().verify("The earth is flat").await.unwrap();
        let rb = b.claim_desk().verify("The earth is flat").await.unwrap();
        assert_eq!(ra, rb);
    }
}
