//! Error types for rule construction, validation, and the `rrule_text` convenience parser.

use thiserror::Error;

/// Errors raised while building or validating a [`crate::rule::RuleSpec`].
///
/// Iteration itself never errors (§7): exhaustion is the absence of a next
/// value, and safety-bound (`MAXYEAR`) termination is silent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidBound {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("rule conflict: {0}")]
    RuleConflict(String),

    #[error("interval must be a positive integer, got {0}")]
    IntervalNotPositive(i64),

    #[error("invalid rrule text: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, RuleError>;
