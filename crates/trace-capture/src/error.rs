use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CaptureError {
    #[error("stroke is finalized; no further points may be appended")]
    StrokeFinalized,

    #[error("timestamp {got} ms does not follow previous point at {previous} ms")]
    NonMonotonicTimestamp { previous: i64, got: i64 },

    #[error("point coordinates are not finite")]
    NonFiniteCoordinate,

    #[error("need at least {required} points, have {actual}")]
    InsufficientPoints { required: usize, actual: usize },
}
