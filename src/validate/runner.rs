//! Problem-specific test execution and scoring.

use crate::problem::{Predicate, TestCheck, TestDefinition};
use crate::validate::quality::run_check;
use crate::validate::types::TestOutcome;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, warn};

/// Run every problem test in order.
pub fn run_tests(tests: &[TestDefinition], source: &str) -> Vec<TestOutcome> {
    tests.iter().map(|test| run_test(test, source)).collect()
}

/// Run one test. Never panics and never returns an error: predicate failures
/// become failed outcomes.
pub fn run_test(test: &TestDefinition, source: &str) -> TestOutcome {
    if let Some(kind) = test.syntax_check {
        let report = run_check(kind, source);
        if !report.valid {
            debug!(test = %test.name, ?kind, "syntax pre-check failed");
            let message = report
                .error
                .unwrap_or_else(|| format!("Syntax check failed for '{}'", test.name));
            return TestOutcome::fail(&test.name, message)
                .with_suggestion(report.suggestion)
                .with_hint(test.hint.clone())
                .with_severity(test.severity);
        }
    }

    let verdict = match &test.check {
        TestCheck::Direct(predicate) => match evaluate_guarded(&test.name, predicate, source) {
            Ok(true) => return TestOutcome::pass(&test.name, "Test passed"),
            Ok(false) => Ok(format!("Test failed: {}", test.name)),
            Err(()) => Err(()),
        },
        TestCheck::AnyOf(alternatives) => {
            let mut errored = false;
            for predicate in alternatives {
                match evaluate_guarded(&test.name, predicate, source) {
                    Ok(true) => return TestOutcome::pass(&test.name, "Test passed"),
                    Ok(false) => {}
                    Err(()) => errored = true,
                }
            }
            if errored {
                Err(())
            } else {
                Ok(format!(
                    "Test failed: {} (none of {} accepted approaches matched)",
                    test.name,
                    alternatives.len()
                ))
            }
        }
    };

    let message =
        verdict.unwrap_or_else(|()| format!("Test execution failed for '{}'", test.name));
    failed(test, message)
}

fn failed(test: &TestDefinition, message: String) -> TestOutcome {
    TestOutcome::fail(&test.name, message)
        .with_suggestion(test.suggestions.first().cloned())
        .with_hint(test.hint.clone())
        .with_example(test.examples.first().cloned())
        .with_severity(test.severity)
}

/// Evaluate a predicate, converting errors and panics into `Err(())`.
fn evaluate_guarded(name: &str, predicate: &Predicate, source: &str) -> Result<bool, ()> {
    match catch_unwind(AssertUnwindSafe(|| predicate.evaluate(source))) {
        Ok(Ok(matched)) => Ok(matched),
        Ok(Err(e)) => {
            warn!(test = name, error = %e, "test predicate returned an error");
            Err(())
        }
        Err(payload) => {
            warn!(
                test = name,
                panic = panic_message(payload.as_ref()),
                "test predicate panicked"
            );
            Err(())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

/// Percentage of passed outcomes, rounded to the nearest integer.
///
/// No outcomes scores 0.
pub fn compute_score(outcomes: &[TestOutcome]) -> u8 {
    let total = outcomes.len();
    if total == 0 {
        return 0;
    }
    let passed = outcomes.iter().filter(|o| o.passed).count();
    ((passed * 100 + total / 2) / total) as u8
}

/// Whether `score` meets the pass threshold.
pub fn passes_threshold(score: u8, threshold: u8) -> bool {
    score >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::quality::QualityCheckKind;
    use crate::validate::types::Severity;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    const SOURCE: &str = "static DEFINE_MUTEX(lock);\nvoid f(void) { mutex_lock(&lock); mutex_unlock(&lock); }\n";

    #[test]
    fn direct_test_passes_and_fails() {
        let pass = run_test(
            &TestDefinition::direct("locks", Predicate::Contains("mutex_lock".into())),
            SOURCE,
        );
        assert!(pass.passed);
        assert_eq!(pass.message, "Test passed");

        let fail = run_test(
            &TestDefinition::direct("spins", Predicate::Contains("spin_lock".into()))
                .with_hint("Try a spinlock")
                .with_example("spin_lock(&l);")
                .with_suggestion("Use spin_lock()")
                .with_severity(Severity::Warning),
            SOURCE,
        );
        assert!(!fail.passed);
        assert_eq!(fail.message, "Test failed: spins");
        assert_eq!(fail.hint.as_deref(), Some("Try a spinlock"));
        assert_eq!(fail.example.as_deref(), Some("spin_lock(&l);"));
        assert_eq!(fail.suggestion.as_deref(), Some("Use spin_lock()"));
        assert_eq!(fail.severity, Some(Severity::Warning));
    }

    #[test]
    fn any_of_passes_when_one_alternative_matches() {
        let test = TestDefinition::any_of(
            "initialises the lock",
            vec![
                Predicate::Contains("mutex_init".into()),
                Predicate::Matches(r"DEFINE_MUTEX\s*\(".into()),
            ],
        );
        assert!(run_test(&test, SOURCE).passed);
    }

    #[test]
    fn any_of_with_no_match_fails() {
        let test = TestDefinition::any_of(
            "uses a spinlock",
            vec![
                Predicate::Contains("spin_lock(".into()),
                Predicate::Contains("raw_spin_lock(".into()),
            ],
        );
        let outcome = run_test(&test, SOURCE);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.message,
            "Test failed: uses a spinlock (none of 2 accepted approaches matched)"
        );
    }

    #[test]
    fn empty_any_of_fails() {
        assert!(!run_test(&TestDefinition::any_of("nothing", vec![]), SOURCE).passed);
    }

    #[test]
    fn erroring_alternative_does_not_block_a_match() {
        let test = TestDefinition::any_of(
            "flexible",
            vec![
                Predicate::Matches("(unclosed".into()),
                Predicate::Contains("mutex_unlock".into()),
            ],
        );
        assert!(run_test(&test, SOURCE).passed);
    }

    #[test]
    fn predicate_error_becomes_generic_failure() {
        let test = TestDefinition::direct("bad regex", Predicate::Matches("(unclosed".into()))
            .with_suggestion("Fix the problem definition");
        let outcome = run_test(&test, SOURCE);

        assert!(!outcome.passed);
        assert_eq!(outcome.message, "Test execution failed for 'bad regex'");
        assert_eq!(
            outcome.suggestion.as_deref(),
            Some("Fix the problem definition")
        );
    }

    #[test]
    fn custom_error_and_panic_are_contained() {
        let erroring = TestDefinition::direct(
            "custom error",
            Predicate::custom(|_| anyhow::bail!("lookup failed")),
        );
        let panicking = TestDefinition::direct(
            "custom panic",
            Predicate::custom(|_| panic!("predicate bug")),
        );

        let outcomes = run_tests(&[erroring, panicking], SOURCE);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].message, "Test execution failed for 'custom error'");
        assert_eq!(outcomes[1].message, "Test execution failed for 'custom panic'");
    }

    #[test]
    fn failed_syntax_check_skips_main_predicate() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let test = TestDefinition::direct(
            "balanced",
            Predicate::custom(move |_| {
                flag.store(true, Ordering::SeqCst);
                Ok(true)
            }),
        )
        .with_syntax_check(QualityCheckKind::BraceBalance);

        let outcome = run_test(&test, "void f(void) {");
        assert!(!outcome.passed);
        assert_eq!(outcome.message, "Unbalanced braces: 1 opening vs 0 closing");
        assert!(outcome.suggestion.is_some());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn passing_syntax_check_runs_main_predicate() {
        let test = TestDefinition::direct("locks", Predicate::Contains("mutex_lock".into()))
            .with_syntax_check(QualityCheckKind::BraceBalance);
        assert!(run_test(&test, SOURCE).passed);
    }

    #[test]
    fn score_is_rounded_percentage() {
        let pass = TestOutcome::pass("a", "ok");
        let fail = TestOutcome::fail("b", "no");

        assert_eq!(compute_score(&[]), 0);
        assert_eq!(compute_score(&[pass.clone()]), 100);
        assert_eq!(compute_score(&[pass.clone(), fail.clone()]), 50);
        assert_eq!(compute_score(&[pass.clone(), fail.clone(), fail.clone()]), 33);
        assert_eq!(compute_score(&[pass.clone(), pass.clone(), fail.clone()]), 67);
        assert_eq!(compute_score(&[fail]), 0);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(passes_threshold(60, 60));
        assert!(!passes_threshold(59, 60));
        assert!(passes_threshold(0, 0));
    }

    proptest! {
        #[test]
        fn adding_alternatives_never_breaks_a_passing_any_of(
            source in "[a-z_ ();]{0,60}",
            words in prop::collection::vec("[a-z_]{1,6}", 0..5),
            extra in prop::collection::vec("[a-z_]{1,6}", 0..5),
        ) {
            let alternatives: Vec<Predicate> =
                words.iter().cloned().map(Predicate::Contains).collect();
            let base = run_test(&TestDefinition::any_of("t", alternatives.clone()), &source);

            let mut extended = alternatives;
            extended.extend(extra.into_iter().map(Predicate::Contains));
            let wider = run_test(&TestDefinition::any_of("t", extended), &source);

            prop_assert_eq!(base.passed, words.iter().any(|w| source.contains(w.as_str())));
            if base.passed {
                prop_assert!(wider.passed);
            }
        }
    }
}
