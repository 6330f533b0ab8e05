//! Command implementations for kgrade.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod classify;
mod rules;
mod validate_cmd;


use crate::cli::Command;
use kgrade::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Validate(args) => validate_cmd::cmd_validate(args),
        Command::Classify(args) => classify::cmd_classify(args),
        Command::Rules(args) => rules::cmd_rules(args),
    }
}
