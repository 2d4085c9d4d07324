//! Debate room: two-sided arguments and the automated participant.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use truthnet_ai::{ArgumentScorer, AutomatedParticipant};
use truthnet_core::{
    ArgumentId, ArgumentScores, Claim, DebateArgument, DebatePhase, IntakeError, Side,
    require_text,
};

use crate::error::WorkflowError;
use crate::events::{EventKind, EventLog};
use crate::{ANONYMOUS, lock};
use crate::tasks::TaskSet;

#[derive(Default)]
struct DebateState {
    next_id: u64,
    arguments: Vec<DebateArgument>,
    participant_scheduled: bool,
}

impl DebateState {
    fn push(
        &mut self,
        author: String,
        side: Side,
        content: String,
        scores: Option<ArgumentScores>,
        automated: bool,
    ) -> ArgumentId {
        self.next_id += 1;
        let id = ArgumentId(self.next_id);
        self.arguments.push(DebateArgument {
            id,
            author,
            side,
            content,
            timestamp: Utc::now(),
            scores,
            automated,
        });
        id
    }

    fn has_side(&self, side: Side) -> bool {
        self.arguments.iter().any(|a| !a.automated && a.side == side)
    }
}

/// Debate over one claim.
///
/// Arguments are scored independently after a fixed delay. Once both sides
/// have at least one argument, the automated participant is scheduled to join
/// after its own delay. It joins at most once per debate.
pub struct DebateRoom {
    claim: Claim,
    scorer: Arc<dyn ArgumentScorer>,
    participant: Arc<dyn AutomatedParticipant>,
    scoring_latency: Duration,
    join_delay: Duration,
    events: EventLog,
    state: Arc<Mutex<DebateState>>,
    tasks: TaskSet,
}

impl DebateRoom {
    pub fn new(
        claim: Claim,
        scorer: Arc<dyn ArgumentScorer>,
        participant: Arc<dyn AutomatedParticipant>,
        scoring_latency: Duration,
        join_delay: Duration,
        events: EventLog,
    ) -> Self {
        Self {
            claim,
            scorer,
            participant,
            scoring_latency,
            join_delay,
            events,
            state: Arc::new(Mutex::new(DebateState::default())),
            tasks: TaskSet::default(),
        }
    }

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    /// Post an argument for `side`.
    pub fn submit(&self, author: &str, side: Side, content: &str) -> Result<ArgumentId, IntakeError> {
        let content = require_text(content, IntakeError::EmptyArgument)?;
        let author = match author.trim() {
            "" => ANONYMOUS.to_string(),
            name => name.to_string(),
        };

        let (id, join_now) = {
            let mut state = lock(&self.state);
            let id = state.push(author.clone(), side, content.clone(), None, false);
            let join_now = !state.participant_scheduled
                && state.has_side(Side::A)
                && state.has_side(Side::B);
            if join_now {
                state.participant_scheduled = true;
            }
            (id, join_now)
        };
        self.events.record(
            EventKind::ArgumentSubmitted,
            id.to_string(),
            format!("{author} argued for side {side}"),
        );

        self.schedule_scoring(id, side, content);
        if join_now {
            info!(claim = %self.claim, "both sides present; automated participant scheduled");
            self.schedule_join();
        }

        Ok(id)
    }

    fn schedule_scoring(&self, id: ArgumentId, side: Side, content: String) {
        let scorer = Arc::clone(&self.scorer);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let claim = self.claim.clone();
        let latency = self.scoring_latency;
        debug!(%id, "scheduling argument scoring");

        self.tasks.spawn(async move {
            tokio::time::sleep(latency).await;
            match scorer.score(&claim, side, &content).await {
                Ok(scores) => {
                    let attached = {
                        let mut state = lock(&state);
                        match state.arguments.iter_mut().find(|a| a.id == id) {
                            Some(arg) if arg.scores.is_none() => {
                                arg.scores = Some(scores);
                                true
                            }
                            _ => false,
                        }
                    };
                    if attached {
                        events.record(
                            EventKind::ArgumentScored,
                            id.to_string(),
                            format!(
                                "{} quality (logic {}, facts {})",
                                scores.overall, scores.logical_validity, scores.factual_accuracy
                            ),
                        );
                    }
                }
                Err(e) => {
                    warn!(%id, error = %e, "argument scoring failed");
                    events.record(EventKind::ServiceFailed, id.to_string(), e.to_string());
                }
            }
        });
    }

    fn schedule_join(&self) {
        let participant = Arc::clone(&self.participant);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let claim = self.claim.clone();
        let delay = self.join_delay;

        self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            let transcript = lock(&state).arguments.clone();
            match participant.contribute(&claim, &transcript).await {
                Ok(contribution) => {
                    let id = lock(&state).push(
                        participant.name().to_string(),
                        contribution.side,
                        contribution.content,
                        Some(contribution.scores),
                        true,
                    );
                    events.record(
                        EventKind::ParticipantJoined,
                        id.to_string(),
                        format!(
                            "{} has provided a fact-based perspective on side {}.",
                            participant.name(),
                            contribution.side
                        ),
                    );
                }
                Err(e) => {
                    warn!(claim = %claim, error = %e, "automated participant failed to join");
                    events.record(EventKind::ServiceFailed, claim.text(), e.to_string());
                }
            }
        });
    }

    pub fn phase(&self) -> DebatePhase {
        DebatePhase::of(&lock(&self.state).arguments)
    }

    /// Arguments in submission order.
    pub fn arguments(&self) -> Vec<DebateArgument> {
        lock(&self.state).arguments.clone()
    }

    pub fn argument(&self, id: ArgumentId) -> Option<DebateArgument> {
        lock(&self.state).arguments.iter().find(|a| a.id == id).cloned()
    }

    /// Whether the automated participant has been scheduled (it may not have joined yet).
    pub fn participant_scheduled(&self) -> bool {
        lock(&self.state).participant_scheduled
    }

    /// Wait for all scoring and the participant join, if scheduled.
    pub async fn settle(&self) -> Result<(), WorkflowError> {
        self.tasks.settle().await?;
        Ok(())
    }
}
