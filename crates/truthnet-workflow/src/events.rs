//! User-visible workflow notifications.
//!
//! Every state change the presentation layer should announce is recorded
//! here with a timestamp and mirrored to `tracing`.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::lock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    VerificationRequested,
    VerificationComplete,
    EvidenceSubmitted,
    ProofValidated,
    ArgumentSubmitted,
    ArgumentScored,
    ParticipantJoined,
    CommentPosted,
    CounterpointSubmitted,
    FactCheckComplete,
    VoteRecorded,
    PostAnalyzed,
    ServiceFailed,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerificationRequested => "verification-requested",
            Self::VerificationComplete => "verification-complete",
            Self::EvidenceSubmitted => "evidence-submitted",
            Self::ProofValidated => "proof-validated",
            Self::ArgumentSubmitted => "argument-submitted",
            Self::ArgumentScored => "argument-scored",
            Self::ParticipantJoined => "participant-joined",
            Self::CommentPosted => "comment-posted",
            Self::CounterpointSubmitted => "counterpoint-submitted",
            Self::FactCheckComplete => "fact-check-complete",
            Self::VoteRecorded => "vote-recorded",
            Self::PostAnalyzed => "post-analyzed",
            Self::ServiceFailed => "service-failed",
        }
    }

    /// Headline shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            Self::VerificationRequested => "Verifying...",
            Self::VerificationComplete => "Verification Complete",
            Self::EvidenceSubmitted => "Evidence added",
            Self::ProofValidated => "Proof Validated",
            Self::ArgumentSubmitted => "Argument submitted",
            Self::ArgumentScored => "Argument evaluated",
            Self::ParticipantJoined => "AI joined the debate",
            Self::CommentPosted => "Comment posted",
            Self::CounterpointSubmitted => "Counterpoint submitted",
            Self::FactCheckComplete => "Fact check complete",
            Self::VoteRecorded => "Thank you for your vote!",
            Self::PostAnalyzed => "Analysis complete",
            Self::ServiceFailed => "Error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowEvent {
    pub kind: EventKind,
    /// What the event is about: a claim, an evidence id, an argument id.
    pub subject: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only event log shared by all stages of one workflow.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<WorkflowEvent>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, kind: EventKind, subject: impl Into<String>, detail: impl Into<String>) {
        let event = WorkflowEvent {
            kind,
            subject: subject.into(),
            detail: detail.into(),
            timestamp: Utc::now(),
        };
        info!(
            event = kind.as_str(),
            subject = %event.subject,
            "{}", event.detail
        );
        lock(&self.0).push(event);
    }

    pub fn snapshot(&self) -> Vec<WorkflowEvent> {
        lock(&self.0).clone()
    }

    /// Take all events recorded so far, leaving the log empty.
    pub fn drain(&self) -> Vec<WorkflowEvent> {
        std::mem::take(&mut *lock(&self.0))
    }

    pub fn count(&self, kind: EventKind) -> usize {
        lock(&self.0).iter().filter(|e| e.kind == kind).count()
    }
}
