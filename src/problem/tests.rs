//! Tests for problem parsing and predicates.

use super::{Predicate, ProblemMetadata, TestCheck, TestDefinition};
use crate::category::Category;
use crate::validate::quality::QualityCheckKind;
use crate::validate::types::Severity;
use std::io::Write;
use tempfile::NamedTempFile;

const PROBLEM_YAML: &str = r##"
title: "RCU reader"
description: "Read a shared config under RCU"
starter_code: "#include <linux/module.h>"
category: rcu
tests:
  - name: "uses rcu_dereference"
    check:
      direct:
        contains: "rcu_dereference"
    hint: "Read the pointer through rcu_dereference()"
  - name: "frees the old version"
    check:
      any_of:
        - contains: "kfree_rcu"
        - matches: "synchronize_rcu\\s*\\("
    syntax_check: brace_balance
    examples:
      - "kfree_rcu(old, rcu);"
    suggestions:
      - "Free the old config after a grace period"
    severity: warning
  - name: "two readers"
    check:
      direct:
        count_at_least:
          pattern: "rcu_read_lock\\("
          min: 2
"##;

#[test]
fn test_parse_problem_yaml() {
    let problem = ProblemMetadata::from_yaml(PROBLEM_YAML).unwrap();

    assert_eq!(problem.title, "RCU reader");
    assert_eq!(problem.category, Some(Category::Rcu));
    assert_eq!(problem.tests.len(), 3);

    let first = &problem.tests[0];
    assert!(matches!(first.check, TestCheck::Direct(Predicate::Contains(ref s)) if s == "rcu_dereference"));
    assert_eq!(
        first.hint.as_deref(),
        Some("Read the pointer through rcu_dereference()")
    );

    let second = &problem.tests[1];
    match &second.check {
        TestCheck::AnyOf(alternatives) => assert_eq!(alternatives.len(), 2),
        other => panic!("expected AnyOf, got {other:?}"),
    }
    assert_eq!(second.syntax_check, Some(QualityCheckKind::BraceBalance));
    assert_eq!(second.examples, vec!["kfree_rcu(old, rcu);"]);
    assert_eq!(second.severity, Some(Severity::Warning));

    assert!(matches!(
        problem.tests[2].check,
        TestCheck::Direct(Predicate::CountAtLeast { min: 2, .. })
    ));
}

#[test]
fn test_minimal_problem_uses_defaults() {
    let problem = ProblemMetadata::from_yaml("title: Hello").unwrap();
    assert_eq!(problem.title, "Hello");
    assert!(problem.description.is_empty());
    assert!(problem.category.is_none());
    assert!(problem.tests.is_empty());
}

#[test]
fn test_explicit_category_alias() {
    let problem = ProblemMetadata::from_yaml("explicit_category: memory").unwrap();
    assert_eq!(problem.category, Some(Category::Memory));
}

#[test]
fn test_unknown_category_is_error() {
    let err = ProblemMetadata::from_yaml("category: networking").unwrap_err();
    assert!(err.to_string().contains("failed to parse problem YAML"));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(PROBLEM_YAML.as_bytes()).unwrap();

    let problem = ProblemMetadata::load(file.path()).unwrap();
    assert_eq!(problem.tests.len(), 3);
}

#[test]
fn test_load_missing_file() {
    let err = ProblemMetadata::load("/nonexistent/problem.yaml").unwrap_err();
    assert!(err.to_string().contains("failed to read problem file"));
}

#[test]
fn test_predicates_evaluate() {
    let src = "rcu_read_lock(); p = rcu_dereference(gp); rcu_read_unlock();";

    assert!(Predicate::Contains("rcu_dereference".into()).evaluate(src).unwrap());
    assert!(!Predicate::NotContains("rcu_dereference".into()).evaluate(src).unwrap());
    assert!(Predicate::Matches(r"rcu_read_lock\s*\(".into()).evaluate(src).unwrap());
    assert!(Predicate::NotMatches(r"synchronize_rcu".into()).evaluate(src).unwrap());
    assert!(
        !Predicate::CountAtLeast {
            pattern: r"rcu_read_lock\(".into(),
            min: 2
        }
        .evaluate(src)
        .unwrap()
    );
    assert!(
        Predicate::AllOf(vec![
            Predicate::Contains("rcu_read_lock".into()),
            Predicate::Contains("rcu_read_unlock".into()),
        ])
        .evaluate(src)
        .unwrap()
    );
}

#[test]
fn test_invalid_regex_is_evaluation_error() {
    let err = Predicate::Matches("(unclosed".into()).evaluate("x").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_custom_predicate() {
    let p = Predicate::custom(|src| Ok(src.lines().count() > 1));
    assert!(p.evaluate("a\nb").unwrap());
    assert!(!p.evaluate("a").unwrap());
    assert_eq!(format!("{p:?}"), "Custom(<fn>)");
}

#[test]
fn test_builders() {
    let test = TestDefinition::any_of("init", vec![Predicate::Contains("module_init".into())])
        .with_hint("register an init function")
        .with_example("module_init(hello_init);")
        .with_suggestion("add module_init")
        .with_syntax_check(QualityCheckKind::All)
        .with_severity(Severity::Error);

    assert_eq!(test.name, "init");
    assert_eq!(test.hint.as_deref(), Some("register an init function"));
    assert_eq!(test.examples.len(), 1);
    assert_eq!(test.suggestions.len(), 1);
    assert_eq!(test.syntax_check, Some(QualityCheckKind::All));
    assert_eq!(test.severity, Some(Severity::Error));
}

#[test]
fn test_nested_predicates_parse_from_maps() {
    let yaml = r#"
tests:
  - name: "lock pairing"
    check: { direct: { all_of: [ { contains: "mutex_lock" }, { not_matches: "spin_lock\\s*\\(" } ] } }
"#;
    let problem = ProblemMetadata::from_yaml(yaml).unwrap();

    match &problem.tests[0].check {
        TestCheck::Direct(Predicate::AllOf(inner)) => {
            assert!(matches!(inner[0], Predicate::Contains(ref s) if s == "mutex_lock"));
            assert!(matches!(inner[1], Predicate::NotMatches(_)));
        }
        other => panic!("expected Direct(AllOf), got {other:?}"),
    }
}
