//! Comments, counterpoints, quick fact checks, and reader votes for an article.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use truthnet_ai::FactChecker;
use truthnet_core::{
    Ballot, BallotError, Comment, CommentId, CommentKind, IntakeError, require_text,
};

use crate::error::WorkflowError;
use crate::events::{EventKind, EventLog};
use crate::{ANONYMOUS, lock};

#[derive(Default)]
struct Thread {
    next_id: u64,
    /// Newest first.
    comments: Vec<Comment>,
    ballot: Ballot,
}

pub struct Discussion {
    fact_checker: Arc<dyn FactChecker>,
    fact_check_latency: Duration,
    events: EventLog,
    thread: Mutex<Thread>,
}

impl Discussion {
    pub fn new(fact_checker: Arc<dyn FactChecker>, fact_check_latency: Duration, events: EventLog) -> Self {
        Self {
            fact_checker,
            fact_check_latency,
            events,
            thread: Mutex::new(Thread::default()),
        }
    }

    pub fn post_comment(&self, author: &str, content: &str) -> Result<CommentId, IntakeError> {
        let content = require_text(content, IntakeError::EmptyComment)?;
        let id = self.append(author, content, CommentKind::Comment);
        self.events.record(
            EventKind::CommentPosted,
            format!("comment-{}", id.0),
            "Your comment has been added to the discussion",
        );
        Ok(id)
    }

    pub fn submit_counterpoint(&self, author: &str, content: &str) -> Result<CommentId, IntakeError> {
        let content = require_text(content, IntakeError::EmptyCounterpoint)?;
        let id = self.append(author, content, CommentKind::Counterpoint);
        self.events.record(
            EventKind::CounterpointSubmitted,
            format!("comment-{}", id.0),
            "Your perspective has been added to the discussion.",
        );
        Ok(id)
    }

    fn append(&self, author: &str, content: String, kind: CommentKind) -> CommentId {
        let mut thread = lock(&self.thread);
        thread.next_id += 1;
        let id = CommentId(thread.next_id);
        thread.comments.insert(
            0,
            Comment {
                id,
                author: match author.trim() {
                    "" => ANONYMOUS.to_string(),
                    name => name.to_string(),
                },
                content,
                kind,
                posted_at: Utc::now(),
            },
        );
        id
    }

    /// Comments and counterpoints, newest first.
    pub fn comments(&self) -> Vec<Comment> {
        lock(&self.thread).comments.clone()
    }

    /// Quick analysis of an article, answered after a fixed delay.
    pub async fn fact_check(&self, title: &str, summary: &str) -> Result<String, WorkflowError> {
        tokio::time::sleep(self.fact_check_latency).await;
        match self.fact_checker.check(title, summary).await {
            Ok(analysis) => {
                self.events
                    .record(EventKind::FactCheckComplete, title, analysis.clone());
                Ok(analysis)
            }
            Err(e) => {
                self.events
                    .record(EventKind::ServiceFailed, title, e.to_string());
                Err(WorkflowError::FactCheck(e))
            }
        }
    }

    pub fn vote_trust(&self, delta: i8) -> Result<i64, BallotError> {
        let trust = lock(&self.thread).ballot.vote_trust(delta)?;
        self.events
            .record(EventKind::VoteRecorded, "ballot", format!("trust {delta:+}"));
        Ok(trust)
    }

    pub fn set_neutrality(&self, value: u8) -> Result<(), BallotError> {
        lock(&self.thread).ballot.set_neutrality(value)?;
        self.events
            .record(EventKind::VoteRecorded, "ballot", format!("neutrality {value}"));
        Ok(())
    }

    pub fn rate_clarity(&self, rating: u8) -> Result<(), BallotError> {
        let label = {
            let mut thread = lock(&self.thread);
            thread.ballot.rate_clarity(rating)?;
            thread.ballot.clarity_label()
        };
        self.events
            .record(EventKind::VoteRecorded, "ballot", format!("clarity {rating} ({label})"));
        Ok(())
    }

    pub fn ballot(&self) -> Ballot {
        lock(&self.thread).ballot.clone()
    }
}
