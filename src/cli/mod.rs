//! CLI argument parsing for kgrade.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kgrade: static grading for kernel-module submissions.
///
/// Submissions are checked against a per-category rule catalog (forbidden
/// and required patterns, paired-call invariants), a set of code quality
/// heuristics, and the problem's own tests. Nothing is compiled or run.
#[derive(Parser, Debug)]
#[command(name = "kgrade")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for kgrade.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Grade a submission against a problem.
    ///
    /// The files are concatenated in order and graded as one submission.
    /// Exits 0 when the submission passes, 2 when it does not.
    Validate(ValidateArgs),

    /// Print the category a problem is classified into.
    Classify(ClassifyArgs),

    /// List the rule catalog.
    ///
    /// Shows forbidden, required, and contextual rules per category.
    Rules(RulesArgs),
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Problem definition (YAML).
    #[arg(short, long)]
    pub problem: PathBuf,

    /// Engine configuration (YAML).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Source files making up the submission.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the `classify` command.
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Problem definition (YAML).
    #[arg(short, long)]
    pub problem: PathBuf,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Only show this category (e.g. `rcu`, `pci_driver`).
    #[arg(long)]
    pub category: Option<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate_minimal() {
        let cli =
            Cli::try_parse_from(["kgrade", "validate", "--problem", "p.yaml", "hello.c"]).unwrap();
        if let Command::Validate(args) = cli.command {
            assert_eq!(args.problem, PathBuf::from("p.yaml"));
            assert_eq!(args.config, None);
            assert!(!args.json);
            assert_eq!(args.files, vec![PathBuf::from("hello.c")]);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn parse_validate_full() {
        let cli = Cli::try_parse_from([
            "kgrade",
            "validate",
            "-p",
            "p.yaml",
            "--config",
            "grade.yaml",
            "--json",
            "main.c",
            "helpers.c",
        ])
        .unwrap();
        if let Command::Validate(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("grade.yaml")));
            assert!(args.json);
            assert_eq!(
                args.files,
                vec![PathBuf::from("main.c"), PathBuf::from("helpers.c")]
            );
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn validate_requires_files() {
        assert!(Cli::try_parse_from(["kgrade", "validate", "--problem", "p.yaml"]).is_err());
    }

    #[test]
    fn parse_classify() {
        let cli = Cli::try_parse_from(["kgrade", "classify", "--problem", "p.yaml"]).unwrap();
        if let Command::Classify(args) = cli.command {
            assert_eq!(args.problem, PathBuf::from("p.yaml"));
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn parse_rules() {
        let cli = Cli::try_parse_from(["kgrade", "rules"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Rules(RulesArgs { category: None })
        ));

        let cli = Cli::try_parse_from(["kgrade", "rules", "--category", "rcu"]).unwrap();
        if let Command::Rules(args) = cli.command {
            assert_eq!(args.category.as_deref(), Some("rcu"));
        } else {
            panic!("Expected Rules command");
        }
    }
}
