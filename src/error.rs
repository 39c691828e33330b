use thiserror::Error;

/// Errors surfaced at the configuration/deserialization boundary.
///
/// Scorers themselves never fail: missing input data always falls back to the
/// documented neutral defaults. Anything that reaches a scorer in a broken
/// state is a programming defect, not a runtime condition.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid weight for {criterion}: {value} (weights must be finite and non-negative)")]
    InvalidWeight { criterion: String, value: f64 },

    #[error("unknown criterion: {0}")]
    UnknownCriterion(String),

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}
