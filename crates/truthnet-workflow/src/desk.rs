//! Claim intake and verdict resolution.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};
use truthnet_ai::VerdictResolver;
use truthnet_core::{Claim, IntakeError, VerificationResult};

use crate::error::WorkflowError;
use crate::events::{EventKind, EventLog};

/// Accepts claims and resolves verdicts after a fixed latency.
pub struct ClaimDesk {
    resolver: Arc<dyn VerdictResolver>,
    latency: Duration,
    events: EventLog,
}

/// A validated claim whose verdict is being resolved.
pub struct PendingVerdict {
    claim: Claim,
    handle: JoinHandle<anyhow::Result<VerificationResult>>,
}

impl ClaimDesk {
    pub fn new(resolver: Arc<dyn VerdictResolver>, latency: Duration, events: EventLog) -> Self {
        Self {
            resolver,
            latency,
            events,
        }
    }

    /// Validate `input` and start resolution.
    ///
    /// Blank input is rejected here, before the resolver is touched. Must be
    /// called from within a tokio runtime.
    pub fn submit(&self, input: &str) -> Result<PendingVerdict, IntakeError> {
        let claim = Claim::parse(input)?;
        self.events.record(
            EventKind::VerificationRequested,
            claim.text(),
            "claim accepted for verification",
        );

        let resolver = Arc::clone(&self.resolver);
        let events = self.events.clone();
        let latency = self.latency;
        let task_claim = claim.clone();
        debug!(claim = %claim, latency_ms = latency.as_millis() as u64, "scheduling verdict");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let outcome = resolver.resolve(&task_claim).await;
            match &outcome {
                Ok(result) => events.record(
                    EventKind::VerificationComplete,
                    task_claim.text(),
                    format!(
                        "{}: claim verified with {} confidence.",
                        result.verdict, result.confidence
                    ),
                ),
                Err(e) => {
                    warn!(claim = %task_claim, error = %e, "verdict resolution failed");
                    events.record(EventKind::ServiceFailed, task_claim.text(), e.to_string());
                }
            }
            outcome
        });

        Ok(PendingVerdict { claim, handle })
    }

    /// Submit and wait for the verdict.
    pub async fn verify(&self, input: &str) -> Result<VerificationResult, WorkflowError> {
        self.submit(input)?.wait().await
    }
}

impl PendingVerdict {
    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn wait(self) -> Result<VerificationResult, WorkflowError> {
        self.handle.await?.map_err(WorkflowError::Resolver)
    }
}
