//! Terminal cards for workflow results.
//!
//! Each card is a `=== header ===` line followed by labelled sections with
//! left-aligned keys.

use serde::Serialize;
use truthnet_core::{
    Ballot, Claim, Comment, CommentKind, DebateArgument, DebatePhase, EvidenceItem, PostAnalysis,
    RecentActivity, ReputationTier, Score, VerificationResult,
};
use truthnet_identity::{Session, User};
use truthnet_workflow::WorkflowEvent;

const MAX_PREVIEW_CHARS: usize = 72;

// ── Public API ──

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_verification(claim: &str, result: &VerificationResult) {
    println!("=== Verification ===");
    println!("{}", claim.trim());
    println!();

    print_section(
        "Verdict",
        &[
            ("verdict", result.verdict.to_string()),
            (
                "confidence",
                format!("{} ({})", result.confidence, result.confidence.band().as_str()),
            ),
            ("reference", result.reference.clone().unwrap_or_default()),
        ],
    );
    println!("Explanation");
    println!("  {}", result.explanation);
    println!();

    if !result.sources.is_empty() {
        println!("Sources");
        for (i, source) in result.sources.iter().enumerate() {
            println!("  {:<26} {}", format!("[{}] {}", i + 1, source.title), source.link);
        }
        println!();
    }
}

pub fn print_evidence(claim: &Claim, items: &[EvidenceItem]) {
    println!("=== Evidence ===");
    println!("{claim}");
    println!();

    for item in items {
        println!("{} ({})", item.id, item.kind.label());
        println!("  {:<26} {}", "content", preview(&item.content));
        match &item.validation {
            Some(v) => {
                println!("  {:<26} {}", "strength", v.strength);
                println!("  {:<26} {}", "reason", v.reason);
            }
            None => println!("  {:<26} pending", "strength"),
        }
        println!();
    }
}

pub fn print_debate(claim: &Claim, phase: DebatePhase, arguments: &[DebateArgument]) {
    println!("=== Debate ===");
    println!("{claim}");
    println!("  {:<26} {}", "phase", phase.as_str());
    println!();

    for arg in arguments {
        let author = if arg.automated {
            format!("{} (automated)", arg.author)
        } else {
            arg.author.clone()
        };
        println!("{} side {} ({})", arg.id, arg.side, arg.side.stance());
        println!("  {:<26} {}", "author", author);
        println!("  {:<26} {}", "posted", arg.timestamp.format("%Y-%m-%d %H:%M:%S"));
        println!("  {:<26} {}", "argument", preview(&arg.content));
        match &arg.scores {
            Some(s) => {
                println!("  {:<26} {}", "logical validity", s.logical_validity);
                println!("  {:<26} {}", "factual accuracy", s.factual_accuracy);
                println!("  {:<26} {}", "overall", s.overall);
            }
            None => println!("  {:<26} pending", "scores"),
        }
        println!();
    }
}

pub fn print_fact_check(title: &str, analysis: &str, ballot: &Ballot, comments: &[Comment]) {
    println!("=== Fact Check ===");
    println!("{title}");
    println!();
    println!("Analysis");
    println!("  {analysis}");
    println!();

    if ballot.has_voted {
        print_section(
            "Reader Feedback",
            &[
                ("trust", format!("{:+}", ballot.trust)),
                ("neutrality", format!("{}%", ballot.neutrality)),
                (
                    "clarity",
                    format!("{}/5 ({})", ballot.clarity, ballot.clarity_label()),
                ),
            ],
        );
    }

    let counterpoints: Vec<(&str, String)> = comments
        .iter()
        .filter(|c| c.kind == CommentKind::Counterpoint)
        .map(|c| (c.author.as_str(), preview(&c.content)))
        .collect();
    if !counterpoints.is_empty() {
        println!("Counterpoints");
        for (author, content) in counterpoints {
            println!("  {:<26} {}", author, content);
        }
        println!();
    }
}

pub fn print_post_analysis(title: &str, analysis: &PostAnalysis) {
    println!("=== Post Analysis ===");
    println!("{title}");
    println!();

    let tone = match analysis.emotional.tone {
        Some(tone) if analysis.emotional.detected => format!("detected ({tone})"),
        _ => "none detected".to_string(),
    };
    print_section(
        "Content Analysis",
        &[
            ("clarity", analysis.clarity.to_string()),
            (
                "bias",
                format!("{} ({})", analysis.bias.leaning, analysis.bias.score),
            ),
            ("emotional tone", tone),
        ],
    );
    println!("Summary");
    println!("  {}", analysis.summary);
    println!();
}

pub fn print_reputation(score: Score, tier: ReputationTier, activity: &RecentActivity) {
    let accuracy = activity
        .accuracy()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    print_section(
        "Reputation",
        &[
            ("score", score.to_string()),
            ("tier", tier.as_str().to_string()),
            ("correct claims", activity.correct_claims.to_string()),
            ("incorrect claims", activity.incorrect_claims.to_string()),
            ("accuracy", accuracy),
            ("debates won", activity.debates_won.to_string()),
        ],
    );
}

pub fn print_session(session: &Session) {
    print_user(&session.user);
    print_section(
        "Session",
        &[
            ("access token", session.access_token.clone()),
            ("expires at", session.expires_at.to_rfc3339()),
        ],
    );
}

pub fn print_user(user: &User) {
    print_section(
        "User",
        &[
            ("id", user.id.clone()),
            ("email", user.email.clone().unwrap_or_default()),
        ],
    );
}

/// Notifications raised during the run, oldest first.
pub fn print_events(events: &[WorkflowEvent]) {
    if events.is_empty() {
        return;
    }
    println!("Activity");
    for event in events {
        println!(
            "  {} {:<24} {}",
            event.timestamp.format("%H:%M:%S%.3f"),
            event.kind.title(),
            event.detail
        );
    }
}

// ── Section rendering ──

fn print_section(header: &str, rows: &[(&str, String)]) {
    let rows: Vec<_> = rows.iter().filter(|(_, v)| !v.is_empty()).collect();
    if rows.is_empty() {
        return;
    }
    println!("{header}");
    for (key, value) in rows {
        println!("  {:<26} {}", key, value);
    }
    println!();
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
