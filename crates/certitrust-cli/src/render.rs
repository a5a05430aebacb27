//! Text and JSON rendering of verification results.

use serde::Serialize;
use std::fmt::Write as _;

use certitrust_core::Credential;
use certitrust_verify::{BatchResult, IssuerFeedback, VerificationAttempt, VerificationResult};

/// Status line shown for a single verification.
pub fn status_line(result: &VerificationResult) -> &'static str {
    match result {
        VerificationResult::Valid { .. } => "Valid Credential",
        VerificationResult::Pending { .. } => "Verification Pending",
        VerificationResult::NotFound => "Credential Not Found",
        VerificationResult::PermissionRequired { .. } => "Permission Required to View Credential",
        VerificationResult::InvalidQuery => "Invalid Query: supply a credential id or wallet address",
        VerificationResult::LookupFailed { .. } => "Lookup Failed",
    }
}

pub fn verification(result: &VerificationResult) -> String {
    let mut out = format!("Verification Status: {}\n", status_line(result));
    match result {
        VerificationResult::Valid { credential } | VerificationResult::Pending { credential } => {
            out.push_str(&credential_details(credential));
        }
        VerificationResult::PermissionRequired { summary } => {
            let _ = writeln!(out, "  ID:       {}", summary.id);
            let _ = writeln!(out, "  Issuer:   {}", summary.issuer);
            let _ = writeln!(out, "  Status:   {}", summary.status);
            let _ = writeln!(
                out,
                "  This credential is sensitive. Run `grant {}` to view full details.",
                summary.id
            );
        }
        VerificationResult::LookupFailed { reason } => {
            let _ = writeln!(out, "  Error:    {}", reason);
        }
        VerificationResult::NotFound | VerificationResult::InvalidQuery => {}
    }
    out
}

pub fn credential_details(credential: &Credential) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  ID:       {}", credential.id);
    let _ = writeln!(out, "  Holder:   {}", credential.holder_address);
    let _ = writeln!(out, "  Issuer:   {}", credential.issuer);
    let _ = writeln!(out, "  Course:   {}", credential.course);
    let _ = writeln!(out, "  Completed: {}", credential.date_completed);
    let _ = writeln!(out, "  Status:   {}", credential.status);
    out
}

pub fn batch(results: &[BatchResult]) -> String {
    let mut out = String::from("Batch Verification Results:\n");
    for result in results {
        let _ = writeln!(
            out,
            "  [{}] {} ({})",
            result.query,
            result.status,
            result.timestamp.to_rfc3339()
        );
    }
    out
}

pub fn history(attempts: &[VerificationAttempt]) -> String {
    if attempts.is_empty() {
        return "Verification History: (empty)\n".into();
    }
    let mut out = String::from("Verification History:\n");
    for attempt in attempts {
        let _ = writeln!(
            out,
            "  {} {} ({})",
            attempt.query,
            attempt.outcome,
            attempt.timestamp.to_rfc3339()
        );
    }
    out
}

pub fn feedback(entries: &[IssuerFeedback]) -> String {
    if entries.is_empty() {
        return "Issuer Feedback: (none)\n".into();
    }
    let mut out = String::from("Issuer Feedback:\n");
    for entry in entries {
        let _ = writeln!(
            out,
            "  {} {}/{} {}",
            entry.issuer,
            entry.rating,
            certitrust_verify::feedback::MAX_RATING,
            entry.feedback
        );
    }
    out
}

/// Render `value` as pretty JSON followed by a newline.
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}
