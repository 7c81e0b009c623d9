// Domain errors - Window failures and per-record rejection reasons
use serde::Serialize;
use thiserror::Error;

/// The only failure a pipeline run can surface to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("invalid window spec: {reason}")]
    InvalidWindowSpec { reason: String },
}

impl PipelineError {
    pub fn invalid_window(reason: impl Into<String>) -> Self {
        Self::InvalidWindowSpec {
            reason: reason.into(),
        }
    }
}

/// Why a raw record was excluded from a batch.
///
/// These never abort a run; they are collected into the diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("battery_id is missing")]
    MissingDeviceId,

    #[error("battery_id is empty")]
    EmptyDeviceId,

    #[error("battery_id must be a string or an integer")]
    InvalidDeviceId,

    #[error("voltage is missing")]
    MissingVoltage,

    #[error("voltage is not a number")]
    NonNumericVoltage,

    #[error("voltage is not finite")]
    NonFiniteVoltage,

    #[error("timestamp is missing")]
    MissingTimestamp,

    #[error("timestamp must be a string")]
    InvalidTimestampType,

    #[error("timestamp {value:?} could not be parsed")]
    UnparsableTimestamp { value: String },
}
