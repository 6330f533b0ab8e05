//! Exit code constants for the kgrade CLI.
//!
//! - 0: Submission passed (score at or above the threshold)
//! - 1: User error (bad args, unreadable or invalid input files)
//! - 2: Validation failure (submission scored below the threshold)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing files, invalid YAML or config values.
pub const USER_ERROR: i32 = 1;

/// Validation failure: the submission did not reach the pass threshold.
pub const VALIDATION_FAILURE: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, VALIDATION_FAILURE];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
