//! Error types for the calculation pipeline.
//!
//! Every failure a stage can produce falls into one of four classes:
//! invalid direct input, missing upstream data, a physically infeasible
//! result, or an entirely malformed data series. Errors never cross
//! stage boundaries; a failed stage simply leaves its storage key
//! unset, which the next stage reports as missing upstream data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PerfError {
    /// A user-supplied value failed a numeric/range/positivity check.
    /// The calculation aborts and nothing is written.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A required upstream document (or field) is absent or unusable.
    /// `default` is populated where a documented fallback exists; the
    /// calling surface decides whether to apply it.
    #[error("missing {what}: run the {stage} calculator first")]
    MissingUpstream {
        what: String,
        stage: &'static str,
        default: Option<f64>,
    },

    /// The formula produced a non-physical result, e.g. a takeoff roll
    /// with no net accelerating force.
    #[error("{0}")]
    Infeasible(String),

    /// Every point of a swept series was malformed. Individual bad
    /// points are skipped; losing all of them is fatal.
    #[error("no valid data points available for this calculation")]
    NoValidPoints,

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PerfError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        PerfError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn missing(what: impl Into<String>, stage: &'static str) -> Self {
        PerfError::MissingUpstream {
            what: what.into(),
            stage,
            default: None,
        }
    }

    pub fn missing_with_default(what: impl Into<String>, stage: &'static str, default: f64) -> Self {
        PerfError::MissingUpstream {
            what: what.into(),
            stage,
            default: Some(default),
        }
    }

    /// The documented fallback value for a missing-upstream error, if
    /// one exists. `None` means the prerequisite stage must be run.
    pub fn recoverable_default(&self) -> Option<f64> {
        match self {
            PerfError::MissingUpstream { default, .. } => *default,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PerfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_upstream_carries_default() {
        let err = PerfError::missing_with_default("aircraft weight", "wing-params", 10.0);
        assert_eq!(err.recoverable_default(), Some(10.0));

        let err = PerfError::missing("wing area", "wing-params");
        assert_eq!(err.recoverable_default(), None);
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = PerfError::validation("cd", "must be greater than zero");
        assert_eq!(err.to_string(), "invalid cd: must be greater than zero");
    }
}
