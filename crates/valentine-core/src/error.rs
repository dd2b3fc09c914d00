//! Error types for the valentine card

use thiserror::Error;

/// Errors building a timed script
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("Script has no steps")]
    Empty,

    #[error("Step {index} at {at_ms}ms comes before the previous step at {previous_ms}ms")]
    OutOfOrder {
        index: usize,
        at_ms: u128,
        previous_ms: u128,
    },
}

/// An after-apology policy name that is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown after-apology policy: {0} (expected hide or reset)")]
pub struct PolicyParseError(pub String);
