use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid time scale: {0}")]
    InvalidScale(String),

    #[error("appointment has no persisted id")]
    MissingIdentity,

    #[error("appointment store failure: {0}")]
    StoreFailure(String),

    #[error("invalid cell width: {0}")]
    InvalidCellWidth(f64),

    #[error("invalid appointment interval: start={start}, end={end}")]
    InvalidAppointment { start: i64, end: i64 },

    #[error("timestamp cannot be represented in the local calendar: {0}")]
    InvalidTimestamp(i64),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
