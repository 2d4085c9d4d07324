//! Analysis layer: service contracts, simulated services, and a centroid
//! classifier for verdict resolution.

pub mod classifier;
pub mod labels;
pub mod reference;
pub mod services;
pub mod simulated;

pub use classifier::{CentroidResolver, Classification, ClassificationStatus, Classifier};
pub use labels::{LabelSet, LabelledClaim};
pub use reference::verification_reference;
pub use services::{
    ArgumentScorer, AutomatedParticipant, Contribution, EvidenceScorer, FactChecker,
    PostAnalyzer, VerdictResolver,
};
pub use simulated::{
    SharedRng, SimulatedArgumentScorer, SimulatedEvidenceScorer, SimulatedFactChecker,
    SimulatedParticipant, SimulatedPostAnalyzer, SimulatedResolver,
};
