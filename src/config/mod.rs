//! Engine configuration for kgrade.
//!
//! This module defines the `EngineConfig` struct that callers load from a YAML
//! file (or build in code). It supports forward-compatible YAML parsing (unknown
//! fields are ignored), defaults for every field, and validation of values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::EngineConfig;
