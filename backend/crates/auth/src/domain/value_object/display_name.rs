//! Display Name Value Object
//!
//! Free-form name shown back to the user (greetings, profile). It is not
//! an identifier and carries no uniqueness or lookup semantics, so the
//! validation is shape-only.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum display name length (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 80;

/// Error returned when display name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    /// Name is empty or whitespace only
    #[error("Display name cannot be empty")]
    Empty,

    /// Name exceeds the maximum length
    #[error("Display name must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Display name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new display name with validation
    pub fn new(raw: impl Into<String>) -> Result<Self, DisplayNameError> {
        let name = raw.into();

        if name.trim().is_empty() {
            return Err(DisplayNameError::Empty);
        }

        let length = name.chars().count();
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: DISPLAY_NAME_MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
