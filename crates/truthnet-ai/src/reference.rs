//! Verification references: short content digests identifying a result.

use ring::digest::{SHA256, digest};
use truthnet_core::{Claim, Score, Verdict};

/// Number of digest bytes kept in a reference (40 hex characters).
const REFERENCE_BYTES: usize = 20;

/// Derive the reference for a verdict on a claim.
///
/// SHA-256 over the claim text, verdict, and confidence, truncated to 160 bits
/// and rendered as `0x`-prefixed lowercase hex. The same inputs always give
/// the same reference.
pub fn verification_reference(claim: &Claim, verdict: Verdict, confidence: Score) -> String {
    let material = format!("{}\n{}\n{}", claim.text(), verdict.as_str(), confidence.value());
    let hash = digest(&SHA256, material.as_bytes());
    let mut out = String::with_capacity(2 + REFERENCE_BYTES * 2);
    out.push_str("0x");
    for byte in &hash.as_ref()[..REFERENCE_BYTES] {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_shape() {
        let claim = Claim::parse("Vaccines cause autism").unwrap();
        let r = verification_reference(&claim, Verdict::False, Score::new(97));
        assert!(r.starts_with("0x"));
        assert_eq!(r.len(), 42);
        assert!(r[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn reference_is_deterministic_and_input_sensitive() {
        let claim = Claim::parse("The earth is flat").unwrap();
        let a = verification_reference(&claim, Verdict::False, Score::new(90));
        let b = verification_reference(&claim, Verdict::False, Score::new(90));
        let c = verification_reference(&claim, Verdict::False, Score::new(91));
        let d = verification_reference(&claim, Verdict::Misleading, Score::new(90));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
