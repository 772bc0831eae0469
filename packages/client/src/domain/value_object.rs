//! Value Objects for user input.
//!
//! Each value object checks its input on construction: it must contain
//! something other than whitespace and must stay under a length limit. The
//! original text is kept as typed; trimming is only used for the emptiness
//! check.

use std::fmt;

use super::error::ValidationError;

/// Maximum length of a username or recipient, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum length of a chat body or game move, in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

fn char_count_within(text: &str, max: usize) -> Result<(), usize> {
    let actual = text.chars().count();
    if actual > max { Err(actual) } else { Ok(()) }
}

/// Name the local participant joins with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// # Returns
    ///
    /// A Result containing the Username or an error if validation fails
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::UsernameEmpty);
        }
        char_count_within(&name, MAX_NAME_CHARS).map_err(|actual| {
            ValidationError::UsernameTooLong {
                max: MAX_NAME_CHARS,
                actual,
            }
        })?;
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Addressee of a direct chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipient(String);

impl Recipient {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::RecipientEmpty);
        }
        char_count_within(&name, MAX_NAME_CHARS).map_err(|actual| {
            ValidationError::RecipientTooLong {
                max: MAX_NAME_CHARS,
                actual,
            }
        })?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(body: impl Into<String>) -> Result<Self, ValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ValidationError::BodyEmpty);
        }
        char_count_within(&body, MAX_TEXT_CHARS).map_err(|actual| {
            ValidationError::BodyTooLong {
                max: MAX_TEXT_CHARS,
                actual,
            }
        })?;
        Ok(Self(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Free-form game move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveText(String);

impl MoveText {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::MoveEmpty);
        }
        char_count_within(&text, MAX_TEXT_CHARS).map_err(|actual| {
            ValidationError::MoveTooLong {
                max: MAX_TEXT_CHARS,
                actual,
            }
        })?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
