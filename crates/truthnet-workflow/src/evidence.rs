//! Evidence board: submitted proof items and their asynchronous validation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};
use truthnet_ai::EvidenceScorer;
use truthnet_core::{
    Claim, EvidenceId, EvidenceItem, EvidenceKind, EvidenceValidation, IntakeError, require_text,
};

use crate::error::WorkflowError;
use crate::events::{EventKind, EventLog};
use crate::lock;
use crate::tasks::TaskSet;

#[derive(Default)]
struct BoardState {
    next_id: u64,
    items: Vec<EvidenceItem>,
}

/// Evidence items for one claim.
///
/// Each accepted item gets exactly one validation, attached after a fixed
/// delay by the configured [`EvidenceScorer`]. Items are validated
/// independently of each other.
pub struct EvidenceBoard {
    claim: Claim,
    scorer: Arc<dyn EvidenceScorer>,
    latency: Duration,
    events: EventLog,
    state: Arc<Mutex<BoardState>>,
    tasks: TaskSet,
}

impl EvidenceBoard {
    pub fn new(
        claim: Claim,
        scorer: Arc<dyn EvidenceScorer>,
        latency: Duration,
        events: EventLog,
    ) -> Self {
        Self {
            claim,
            scorer,
            latency,
            events,
            state: Arc::new(Mutex::new(BoardState::default())),
            tasks: TaskSet::default(),
        }
    }

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    /// Add an evidence item and schedule its validation.
    pub fn submit(&self, kind: EvidenceKind, content: &str) -> Result<EvidenceId, IntakeError> {
        let content = require_text(content, IntakeError::EmptyEvidence)?;

        let id = {
            let mut state = lock(&self.state);
            state.next_id += 1;
            let id = EvidenceId(state.next_id);
            state.items.push(EvidenceItem {
                id,
                kind,
                content: content.clone(),
                validation: None,
            });
            id
        };
        self.events.record(
            EventKind::EvidenceSubmitted,
            id.to_string(),
            format!("{} submitted", kind.label()),
        );
        debug!(%id, claim = %self.claim, "scheduling evidence validation");

        let scorer = Arc::clone(&self.scorer);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let claim = self.claim.clone();
        let latency = self.latency;

        self.tasks.spawn(async move {
            tokio::time::sleep(latency).await;
            match scorer.validate(&claim, kind, &content).await {
                Ok(validation) => {
                    let strength = validation.strength;
                    if attach(&state, id, validation) {
                        events.record(
                            EventKind::ProofValidated,
                            id.to_string(),
                            format!("Evidence strength: {strength}"),
                        );
                    }
                }
                Err(e) => {
                    warn!(%id, error = %e, "evidence validation failed");
                    events.record(EventKind::ServiceFailed, id.to_string(), e.to_string());
                }
            }
        });

        Ok(id)
    }

    pub fn items(&self) -> Vec<EvidenceItem> {
        lock(&self.state).items.clone()
    }

    pub fn item(&self, id: EvidenceId) -> Option<EvidenceItem> {
        lock(&self.state).items.iter().find(|i| i.id == id).cloned()
    }

    /// Items still waiting for a validation.
    pub fn pending(&self) -> usize {
        lock(&self.state)
            .items
            .iter()
            .filter(|i| !i.is_validated())
            .count()
    }

    /// Wait for every scheduled validation to finish.
    pub async fn settle(&self) -> Result<(), WorkflowError> {
        self.tasks.settle().await?;
        Ok(())
    }

    pub fn outstanding_tasks(&self) -> usize {
        self.tasks.outstanding()
    }
}

/// Attach a validation unless one is already present.
fn attach(state: &Mutex<BoardState>, id: EvidenceId, validation: EvidenceValidation) -> bool {
    let mut state = lock(state);
    match state.items.iter_mut().find(|i| i.id == id) {
        Some(item) if item.validation.is_none() => {
            item.validation = Some(validation);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use truthnet_ai::{SharedRng, SimulatedEvidenceScorer};
    use truthnet_core::EvidenceStrength;

    fn board(latency: Duration) -> (EvidenceBoard, EventLog) {
        let events = EventLog::new();
        let claim = Claim::parse("Vaccines cause autism").unwrap();
        let scorer = Arc::new(SimulatedEvidenceScorer::new(SharedRng::new(Some(21))));
        (
            EvidenceBoard::new(claim, scorer, latency, events.clone()),
            events,
        )
    }

    #[tokio::test]
    async fn rejects_blank_evidence() {
        let (board, events) = board(Duration::ZERO);
        assert_eq!(
            board.submit(EvidenceKind::Text, "   "),
            Err(IntakeError::EmptyEvidence)
        );
        assert!(board.items().is_empty());
        assert!(events.snapshot().is_empty());
    }

    #[tokio::test]
    async fn every_item_gets_exactly_one_validation() {
        let (board, events) = board(Duration::from_millis(5));
        let link = board
            .submit(EvidenceKind::Link, " https://www.cdc.gov/vaccinesafety/ ")
            .unwrap();
        let text = board
            .submit(EvidenceKind::Text, "Large cohort studies found no link.")
            .unwrap();
        assert_ne!(link, text);
        assert_eq!(board.pending(), 2);

        board.settle().await.unwrap();

        assert_eq!(board.pending(), 0);
        assert_eq!(board.outstanding_tasks(), 0);
        for item in board.items() {
            let v = item.validation.expect("validated");
            assert!(EvidenceStrength::ALL.contains(&v.strength));
            assert_eq!(v.reason, v.strength.reason());
        }
        assert_eq!(events.count(EventKind::ProofValidated), 2);
        assert_eq!(
            board.item(link).unwrap().content,
            "https://www.cdc.gov/vaccinesafety/"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn validation_waits_for_latency() {
        let (board, _) = board(Duration::from_millis(1500));
        let id = board.submit(EvidenceKind::Text, "a quote").unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!board.item(id).unwrap().is_validated());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(board.item(id).unwrap().is_validated());
    }

    #[test]
    fn attach_only_once() {
        let state = Mutex::new(BoardState::default());
        lock(&state).items.push(EvidenceItem {
            id: EvidenceId(1),
            kind: EvidenceKind::Text,
            content: "x".into(),
            validation: None,
        });
        assert!(attach(&state, EvidenceId(1), EvidenceStrength::Strong.into()));
        assert!(!attach(&state, EvidenceId(1), EvidenceStrength::Fake.into()));
        assert!(!attach(&state, EvidenceId(2), EvidenceStrength::Weak.into()));
        let validation = lock(&state).items[0].validation.clone().unwrap();
        assert_eq!(validation.strength, EvidenceStrength::Strong);
    }
}
