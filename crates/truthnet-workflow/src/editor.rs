//! Post editor: pre-publication analysis of a draft.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use truthnet_ai::PostAnalyzer;
use truthnet_core::{PostAnalysis, PostDraft};

use crate::error::WorkflowError;
use crate::events::{EventKind, EventLog};

pub struct PostEditor {
    analyzer: Arc<dyn PostAnalyzer>,
    latency: Duration,
    events: EventLog,
}

impl PostEditor {
    pub fn new(analyzer: Arc<dyn PostAnalyzer>, latency: Duration, events: EventLog) -> Self {
        Self {
            analyzer,
            latency,
            events,
        }
    }

    /// Validate the draft, then analyze it after the fixed latency.
    ///
    /// A missing title or content is rejected before the analyzer runs.
    pub async fn analyze(
        &self,
        title: &str,
        content: &str,
        category: Option<&str>,
    ) -> Result<PostAnalysis, WorkflowError> {
        let draft = PostDraft::parse(title, content, category)?;
        tokio::time::sleep(self.latency).await;
        match self.analyzer.analyze(&draft).await {
            Ok(analysis) => {
                self.events.record(
                    EventKind::PostAnalyzed,
                    draft.title.as_str(),
                    format!("clarity {}, {} bias", analysis.clarity, analysis.bias.leaning),
                );
                Ok(analysis)
            }
            Err(e) => {
                warn!(title = %draft.title, error = %e, "post analysis failed");
                self.events
                    .record(EventKind::ServiceFailed, draft.title.as_str(), e.to_string());
                Err(WorkflowError::PostAnalysis(e))
            }
        }
    }
}
