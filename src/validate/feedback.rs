//! Human-readable feedback for a graded submission.

use crate::validate::types::TestOutcome;

/// First feedback line when grading stopped on a critical failure.
pub const CRITICAL_BANNER: &str =
    "Critical issue: this submission has a blocking problem. Fix it before the remaining checks can run.";

/// Feedback when every outcome passed.
pub const ALL_PASSED: &str = "All checks passed. Nice work!";

/// Build the feedback list for a set of outcomes.
///
/// One line per failed outcome, then an encouragement line when the
/// submission did not pass. `critical` puts the blocking banner first.
pub fn generate_feedback(
    outcomes: &[TestOutcome],
    score: u8,
    all_passed: bool,
    critical: bool,
) -> Vec<String> {
    let mut feedback = Vec::new();

    if critical {
        feedback.push(CRITICAL_BANNER.to_string());
    }

    feedback.extend(outcomes.iter().filter(|o| !o.passed).map(advice_for));

    if !all_passed {
        let passed = outcomes.iter().filter(|o| o.passed).count();
        feedback.push(encouragement(score, passed, outcomes.len()));
    } else if feedback.is_empty() {
        feedback.push(ALL_PASSED.to_string());
    }

    feedback
}

/// Suggestion, then hint, then example, then a generic message.
fn advice_for(outcome: &TestOutcome) -> String {
    if let Some(suggestion) = &outcome.suggestion {
        return suggestion.clone();
    }
    if let Some(hint) = &outcome.hint {
        return hint.clone();
    }
    if let Some(example) = &outcome.example {
        return format!("Example: {example}");
    }
    generic_advice(&outcome.name)
}

fn generic_advice(test_name: &str) -> String {
    let name = test_name.to_lowercase();
    if name.contains("function") {
        "Check that the required function exists with the expected name and signature".to_string()
    } else if name.contains("variable") {
        "Check that the required variable is declared with the expected type and name".to_string()
    } else if name.contains("loop") {
        "Check the loop structure and its exit condition".to_string()
    } else {
        format!("Review the requirements for '{test_name}' and try again")
    }
}

fn encouragement(score: u8, passed: usize, total: usize) -> String {
    if score >= 40 {
        format!("You're almost there! {passed}/{total} checks passed ({score}%).")
    } else if score >= 20 {
        "You're on the right track. Work through the feedback above and try again.".to_string()
    } else {
        "Don't give up! Fix one issue at a time and resubmit.".to_string()
    }
}
