use thiserror::Error;
use truthnet_core::{BallotError, IntakeError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Ballot(#[from] BallotError),

    #[error("verdict resolution failed: {0:#}")]
    Resolver(anyhow::Error),

    #[error("fact check failed: {0:#}")]
    FactCheck(anyhow::Error),

    #[error("post analysis failed: {0:#}")]
    PostAnalysis(anyhow::Error),

    #[error("workflow task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
