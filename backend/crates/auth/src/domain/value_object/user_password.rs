//! User Password Value Object
//!
//! Domain wrapper for user passwords. Delegates the cryptography to
//! `platform::password`.
//!
//! No complexity policy is applied: any submitted secret is accepted and
//! hashed as-is. A mismatch during verification is an ordinary `Ok(false)`;
//! only the hashing primitive faulting is an error.

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword`; memory is automatically zeroized
/// when dropped and the value cannot be cloned.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Wrap a submitted secret
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for storage
///
/// Stores the bcrypt hash string. Safe to keep in the user store; never
/// placed into session state.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from raw password by hashing with the given work factor
    pub fn from_raw(raw: &RawPassword, cost: u32) -> Result<Self, PasswordHashError> {
        raw.inner().hash(cost).map(Self)
    }

    /// Create from a stored hash string
    pub fn from_hash_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_hash_string(s).map(Self)
    }

    /// Get the hash string for storage
    pub fn as_hash_string(&self) -> &str {
        self.0.as_hash_string()
    }

    /// The work factor this hash was produced with
    pub fn cost(&self) -> Option<u32> {
        self.0.cost()
    }

    /// Verify a raw password against this hash
    ///
    /// Constant-time comparison inside the hashing library.
    ///
    /// ## Returns
    /// - `Ok(true)` / `Ok(false)` - match result (both expected outcomes)
    /// - `Err(_)` - the hashing primitive faulted
    pub fn verify(&self, raw: &RawPassword) -> Result<bool, PasswordHashError> {
        self.0.verify(raw.inner())
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================
