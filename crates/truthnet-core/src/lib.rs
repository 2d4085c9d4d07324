//! Core types for the TruthNet claim verification workflow.

pub mod ballot;
pub mod claim;
pub mod config;
pub mod debate;
pub mod discussion;
pub mod evidence;
pub mod intake;
pub mod post;
pub mod reputation;

pub use ballot::{Ballot, BallotError};
pub use claim::{Claim, Score, ScoreBand, SourceCitation, Verdict, VerificationResult};
pub use config::{ConfigError, WorkflowConfig};
pub use debate::{ArgumentId, ArgumentScores, DebateArgument, DebatePhase, Side};
pub use discussion::{Comment, CommentId, CommentKind};
pub use evidence::{EvidenceId, EvidenceItem, EvidenceKind, EvidenceStrength, EvidenceValidation};
pub use intake::{IntakeError, require_text};
pub use post::{Bias, BiasReading, EmotionalTone, PostAnalysis, PostDraft, ToneReading};
pub use reputation::{RecentActivity, ReputationTier};
