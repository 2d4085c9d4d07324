//! Centroid-based verdict classification.
//!
//! Embeds claims as hashed bag-of-words vectors, computes one centroid per
//! verdict from labelled reference claims, and classifies a new claim by
//! cosine similarity to the nearest centroid.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;
use truthnet_core::{Claim, Score, Verdict, VerificationResult};

use crate::labels::LabelSet;
use crate::reference::verification_reference;
use crate::services::VerdictResolver;

/// Embedding dimensionality.
pub const DIM: usize = 256;

/// Below this similarity a claim is considered unrelated to every centroid.
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.1;

const STOPWORDS: &[&str] = &[
    "the", "and", "are", "was", "were", "for", "that", "this", "with", "from", "has", "have",
    "had", "not", "but", "its", "into", "than", "then", "they", "their", "there", "will", "been",
    "being", "all", "any", "can", "our", "out", "who", "what", "when", "which", "while",
];

/// Centroid-based verdict classifier.
pub struct Classifier {
    centroids: HashMap<Verdict, Vec<f32>>,
}

/// Agreement between the prediction and a ground-truth label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationStatus {
    /// No ground truth for this claim.
    Predicted,
    /// Ground truth exists and the classifier agrees.
    Confirmed,
    /// Ground truth exists and the classifier disagrees.
    Conflict,
}

impl ClassificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Predicted => "predicted",
            Self::Confirmed => "confirmed",
            Self::Conflict => "conflict",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Classification {
    pub verdict: Verdict,
    /// Cosine similarity to the chosen centroid.
    pub similarity: f32,
    pub status: ClassificationStatus,
}

impl Classifier {
    /// Compute centroids from the trainable claims of `labels`.
    pub fn build(labels: &LabelSet) -> Self {
        let mut accum: HashMap<Verdict, (Vec<f32>, usize)> = HashMap::new();

        for (text, verdict) in labels.trainable_claims() {
            let emb = embed(text);
            let entry = accum
                .entry(verdict)
                .or_insert_with(|| (vec![0.0f32; DIM], 0));
            for (acc, val) in entry.0.iter_mut().zip(&emb) {
                *acc += val;
            }
            entry.1 += 1;
        }

        let mut centroids = HashMap::with_capacity(accum.len());
        for (verdict, (mut sum, count)) in accum {
            if count > 0 {
                for v in &mut sum {
                    *v /= count as f32;
                }
                normalize(&mut sum);
                centroids.insert(verdict, sum);
            }
        }

        Self { centroids }
    }

    pub fn centroid_count(&self) -> usize {
        self.centroids.len()
    }

    /// Classify a claim, or `None` when there are no centroids.
    pub fn classify(&self, text: &str, labels: &LabelSet) -> Option<Classification> {
        let emb = embed(text);
        let (verdict, similarity) = self
            .centroids
            .iter()
            .map(|(verdict, centroid)| (*verdict, cosine_sim(&emb, centroid)))
            // Ties broken by enum order so results do not depend on map iteration.
            .max_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| rank(b.0).cmp(&rank(a.0)))
            })?;

        let status = match labels.verdict_for(text) {
            None => ClassificationStatus::Predicted,
            Some(gt) if gt == verdict => ClassificationStatus::Confirmed,
            Some(_) => ClassificationStatus::Conflict,
        };

        Some(Classification {
            verdict,
            similarity,
            status,
        })
    }
}

/// [`VerdictResolver`] backed by a [`Classifier`].
pub struct CentroidResolver {
    classifier: Classifier,
    labels: LabelSet,
    min_similarity: f32,
}

impl CentroidResolver {
    pub fn new(labels: LabelSet) -> Self {
        Self {
            classifier: Classifier::build(&labels),
            labels,
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }

    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = min_similarity;
        self
    }
}

#[async_trait]
impl VerdictResolver for CentroidResolver {
    async fn resolve(&self, claim: &Claim) -> anyhow::Result<VerificationResult> {
        let classification = self
            .classifier
            .classify(claim.text(), &self.labels)
            .filter(|c| c.similarity >= self.min_similarity);

        let Some(c) = classification else {
            debug!(claim = %claim, "no centroid close enough; unverified");
            let verdict = Verdict::Unverified;
            let confidence = Score::new(0);
            return Ok(VerificationResult {
                verdict,
                confidence,
                explanation: "No reference claims are similar enough to assess this claim."
                    .to_string(),
                sources: Vec::new(),
                reference: Some(verification_reference(claim, verdict, confidence)),
            });
        };

        let confidence = Score::from_fraction(c.similarity);
        debug!(
            claim = %claim,
            verdict = %c.verdict,
            similarity = c.similarity,
            status = c.status.as_str(),
            "centroid verdict"
        );

        Ok(VerificationResult {
            verdict: c.verdict,
            confidence,
            explanation: format!(
                "Closest reference claims were rated {} (similarity {:.2}).",
                c.verdict.as_str().to_lowercase(),
                c.similarity
            ),
            sources: self.labels.sources_for(c.verdict),
            reference: Some(verification_reference(claim, c.verdict, confidence)),
        })
    }
}

// ── Embedding ──

/// Hashed bag-of-words embedding, L2-normalised.
pub fn embed(text: &str) -> Vec<f32> {
    let mut v = vec![0.0f32; DIM];
    for token in tokens(text) {
        v[bucket(&token)] += 1.0;
    }
    normalize(&mut v);
    v
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|t| t.to_lowercase())
        .filter(|t| t.chars().count() >= 3 && !STOPWORDS.contains(&t.as_str()))
}

/// FNV-1a, reduced to a bucket index.
fn bucket(token: &str) -> usize {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in token.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    (hash % DIM as u64) as usize
}

fn rank(verdict: Verdict) -> usize {
    Verdict::ALL
        .iter()
        .position(|v| *v == verdict)
        .unwrap_or(Verdict::ALL.len())
}

fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// L2-normalize a vector in place.
fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelSet {
        LabelSet::from_json(
            r#"[
                {"claim": "Vaccines cause autism in children", "verdict": "False",
                 "sources": [{"title": "CDC Vaccine Safety", "link": "https://www.cdc.gov/vaccinesafety/"}]},
                {"claim": "Autism is caused by childhood vaccines", "verdict": "False"},
                {"claim": "Global temperatures rising due to greenhouse emissions", "verdict": "True",
                 "sources": [{"title": "NASA Climate", "link": "https://climate.nasa.gov/"}]},
                {"claim": "Greenhouse emissions drive rising ocean temperatures", "verdict": "True"},
                {"claim": "Aliens built the pyramids", "verdict": "Unverified"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn embedding_is_unit_norm() {
        let v = embed("Vaccines cause autism");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn embedding_ignores_stopwords_and_case() {
        assert_eq!(embed("The VACCINES and autism"), embed("vaccines autism"));
    }

    #[test]
    fn empty_text_embeds_to_zero() {
        assert!(embed("a an of").iter().all(|x| *x == 0.0));
    }

    #[test]
    fn build_excludes_unverified() {
        let clf = Classifier::build(&labels());
        assert_eq!(clf.centroid_count(), 2);
        assert!(!clf.centroids.contains_key(&Verdict::Unverified));
    }

    #[test]
    fn classify_picks_nearest_verdict() {
        let labels = labels();
        let clf = Classifier::build(&labels);

        let c = clf.classify("Do vaccines cause autism?", &labels).unwrap();
        assert_eq!(c.verdict, Verdict::False);
        assert!(c.similarity > 0.5);
        assert_eq!(c.status, ClassificationStatus::Predicted);

        let c = clf
            .classify("Ocean temperatures rising from emissions", &labels)
            .unwrap();
        assert_eq!(c.verdict, Verdict::True);
    }

    #[test]
    fn status_confirmed_for_labelled_claim() {
        let labels = labels();
        let clf = Classifier::build(&labels);
        let c = clf
            .classify("vaccines cause autism in children", &labels)
            .unwrap();
        assert_eq!(c.status, ClassificationStatus::Confirmed);
    }

    #[test]
    fn status_conflict_when_classifier_disagrees() {
        // The False centroid is pulled away by an unrelated claim, so the
        // labelled claim lands closer to the True centroid.
        let labels = LabelSet::from_json(
            r#"[
                {"claim": "solar cheap nuclear", "verdict": "False"},
                {"claim": "moon landing faked hoax studio", "verdict": "False"},
                {"claim": "solar cheap", "verdict": "True"},
                {"claim": "cheap solar", "verdict": "True"}
            ]"#,
        )
        .unwrap();
        let clf = Classifier::build(&labels);
        let c = clf.classify("solar cheap nuclear", &labels).unwrap();
        assert_eq!(c.verdict, Verdict::True);
        assert_eq!(c.status, ClassificationStatus::Conflict);
    }

    #[test]
    fn classify_without_centroids() {
        let labels = LabelSet::default();
        let clf = Classifier::build(&labels);
        assert!(clf.classify("anything", &labels).is_none());
    }

    #[tokio::test]
    async fn resolver_returns_labelled_sources() {
        let resolver = CentroidResolver::new(labels());
        let claim = Claim::parse("Vaccines cause autism").unwrap();
        let result = resolver.resolve(&claim).await.unwrap();
        assert_eq!(result.verdict, Verdict::False);
        assert!(result.confidence.value() <= 100);
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].title, "CDC Vaccine Safety");
        assert!(result.reference.is_some());
    }

    #[tokio::test]
    async fn resolver_unrelated_claim_is_unverified() {
        let resolver = CentroidResolver::new(labels());
        let claim = Claim::parse("Bananas are berries").unwrap();
        let result = resolver.resolve(&claim).await.unwrap();
        assert_eq!(result.verdict, Verdict::Unverified);
        assert_eq!(result.confidence.value(), 0);
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn resolver_without_labels_is_unverified() {
        let resolver = CentroidResolver::new(LabelSet::default());
        let claim = Claim::parse("Vaccines cause autism").unwrap();
        let result = resolver.resolve(&claim).await.unwrap();
        assert_eq!(result.verdict, Verdict::Unverified);
    }
}
