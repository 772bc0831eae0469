use thiserror::Error;

use crate::domain::{TransportError, ValidationError};

/// Errors returned by channel operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Input rejected locally; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Sending requires a joined channel; nothing was sent
    #[error("not joined")]
    NotJoined,

    /// `join` called while already joined; nothing was sent
    #[error("already joined as '{0}'")]
    AlreadyJoined(String),

    /// The transport refused the frame
    #[error(transparent)]
    Transport(#[from] TransportError),
}
