//! Domain layer error definitions.

use thiserror::Error;

/// Input rejected before anything reaches the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username cannot be empty")]
    UsernameEmpty,

    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("Recipient cannot be empty")]
    RecipientEmpty,

    #[error("Recipient cannot exceed {max} characters (got {actual})")]
    RecipientTooLong { max: usize, actual: usize },

    #[error("Message body cannot be empty")]
    BodyEmpty,

    #[error("Message body cannot exceed {max} characters (got {actual})")]
    BodyTooLong { max: usize, actual: usize },

    #[error("Move cannot be empty")]
    MoveEmpty,

    #[error("Move cannot exceed {max} characters (got {actual})")]
    MoveTooLong { max: usize, actual: usize },
}
