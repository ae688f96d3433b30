//! Email Value Object
//!
//! Represents a structurally valid email address used as the login
//! identifier.
//!
//! The stored string is kept EXACTLY as entered: no trimming, no case
//! folding. Lookup is exact-match, so `Ann@x.com` and `ann@x.com` are two
//! different identifiers. Whether identifiers should be normalized at
//! write and lookup time is a product decision that has deliberately not
//! been made here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum email length (per RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Error returned when email validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    /// Email is empty
    #[error("Email cannot be empty")]
    Empty,

    /// Email exceeds the maximum length
    #[error("Email must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Email does not look like `local@domain`
    #[error("Invalid email format")]
    InvalidFormat,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with structural validation
    ///
    /// The input is NOT normalized - see the module docs.
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        let length = email.chars().count();
        if length > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: EMAIL_MAX_LENGTH,
                actual: length,
            });
        }

        if !Self::is_valid_format(&email) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    /// Basic structural validation
    fn is_valid_format(email: &str) -> bool {
        // Whitespace is never valid; the input is not trimmed
        if email.chars().any(|c| c.is_whitespace()) {
            return false;
        }

        // Must contain exactly one @
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        // Local part checks
        if local.is_empty() || local.len() > 64 {
            return false;
        }

        // Domain checks
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return false;
        }
        if domain.starts_with('-') || domain.ends_with('-') {
            return false;
        }

        true
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, EmailError> {
        Email::new(s)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
