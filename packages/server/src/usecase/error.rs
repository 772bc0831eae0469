//! UseCase layer error definitions.

use thiserror::Error;

/// Reasons an inbound frame is not relayed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("invalid '{event}' payload: {reason}")]
    InvalidPayload { event: String, reason: String },

    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),
}
