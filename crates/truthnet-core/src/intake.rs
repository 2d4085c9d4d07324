//! Client-side input validation.
//!
//! Every free-text submission (claim, evidence, argument, comment,
//! counterpoint, post draft) is checked here before any analysis service is invoked.

use thiserror::Error;

/// A submission rejected before reaching any service.
///
/// The `Display` text is the user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Please enter a claim: enter a news headline or claim to verify.")]
    EmptyClaim,

    #[error("Please provide evidence: paste a link or quote supporting the claim.")]
    EmptyEvidence,

    #[error("Missing information: please select a side and write your argument.")]
    EmptyArgument,

    #[error("Please enter a comment first.")]
    EmptyComment,

    #[error("Input required: please provide your counterpoint before submitting.")]
    EmptyCounterpoint,

    #[error("Missing content: please provide both title and content for your post.")]
    EmptyPost,
}

/// Trim `input` and reject it with `err` if nothing is left.
pub fn require_text(input: &str, err: IntakeError) -> Result<String, IntakeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let text = require_text("  hello world \n", IntakeError::EmptyComment).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        for input in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(
                require_text(input, IntakeError::EmptyArgument),
                Err(IntakeError::EmptyArgument),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn messages_are_user_facing() {
        assert!(IntakeError::EmptyClaim.to_string().starts_with("Please enter a claim"));
        assert!(IntakeError::EmptyArgument.to_string().contains("select a side"));
    }
}
