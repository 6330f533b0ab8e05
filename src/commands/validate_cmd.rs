//! Implementation of the `kgrade validate` command.
//!
//! 1. Load the problem definition and the engine config
//! 2. Read and concatenate the submission files
//! 3. Grade the submission
//! 4. Print a report (human-readable or JSON)
//! 5. Map a failing grade onto the validation-failure exit code

use crate::cli::ValidateArgs;
use kgrade::config::EngineConfig;
use kgrade::error::{GradeError, Result};
use kgrade::problem::ProblemMetadata;
use kgrade::validate::{ValidationResult, Validator};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Execute the `kgrade validate` command.
pub fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let (result, config) = grade(&args)?;

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| GradeError::UserError(format!("failed to serialize result: {}", e)))?;
        println!("{}", json);
    } else {
        print!("{}", render_report(&result, config.pass_threshold));
    }

    if result.all_passed {
        Ok(())
    } else {
        Err(GradeError::ValidationFailed {
            score: result.score,
            threshold: config.pass_threshold,
        })
    }
}

/// Load inputs and grade the submission.
pub fn grade(args: &ValidateArgs) -> Result<(ValidationResult, EngineConfig)> {
    let problem = ProblemMetadata::load(&args.problem)?;
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let source = read_submission(&args.files)?;

    let result = Validator::new(config.clone())?.validate(&problem, &source);
    Ok((result, config))
}

/// Concatenate submission files in order, one newline between files.
fn read_submission(files: &[PathBuf]) -> Result<String> {
    let mut parts = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GradeError::UserError(format!(
                "failed to read submission file '{}': {}",
                path.display(),
                e
            ))
        })?;
        parts.push(content);
    }
    Ok(parts.join("\n"))
}

/// Human-readable grading report.
pub fn render_report(result: &ValidationResult, threshold: u8) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Category: {}", result.category);
    let _ = writeln!(
        out,
        "Score:    {}/100 (pass threshold {})",
        result.score, threshold
    );
    let _ = writeln!(out);

    for outcome in &result.test_results {
        let status = if outcome.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "  [{}] {}: {}", status, outcome.name, outcome.message);
    }

    if !result.feedback.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Feedback:");
        for line in &result.feedback {
            let _ = writeln!(out, "  - {}", line);
        }
    }

    let _ = writeln!(out);
    let verdict = if result.all_passed { "PASSED" } else { "FAILED" };
    let _ = writeln!(
        out,
        "Result: {} ({}/{} checks passed)",
        verdict,
        result.passed_count(),
        result.test_results.len()
    );

    out
}
