//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - Configurable work factor (cost)
//! - Zeroization of clear text secrets
//! - Constant-time comparison via the library's verify primitive
//!
//! The work factor controls the computational expense of every hash and
//! comparison. Raising it by one doubles the cost for an attacker and for
//! us; [`DEFAULT_PASSWORD_COST`] balances the two for interactive logins.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Default bcrypt work factor for interactive logins
pub const DEFAULT_PASSWORD_COST: u32 = 10;

/// Minimum work factor accepted by the algorithm
pub const MIN_PASSWORD_COST: u32 = 4;

/// Maximum work factor accepted by the algorithm
pub const MAX_PASSWORD_COST: u32 = 31;

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
///
/// A mismatched password is NOT an error - `verify` returns `Ok(false)`.
/// These variants cover the hashing primitive itself faulting.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing or comparison operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a valid bcrypt string
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Requested work factor is outside the algorithm's accepted range
    #[error("Invalid work factor {0} (expected {MIN_PASSWORD_COST}..={MAX_PASSWORD_COST})")]
    InvalidCost(u32),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// Note: bcrypt only considers the first 72 bytes of input.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a raw secret as submitted by the user
    ///
    /// No policy is applied here - whether a secret is acceptable is a
    /// caller concern, not a hashing concern.
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with the given work factor
    ///
    /// A fresh random salt is generated for every call, so hashing the
    /// same secret twice yields different strings.
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost));
        }

        let hash = bcrypt::hash(self.as_bytes(), cost)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in bcrypt string format (`$2b$<cost>$<salt+digest>`)
///
/// The string embeds algorithm version, work factor and salt, so a stored
/// hash carries everything needed to verify against it later.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a stored hash string (e.g., from the user store)
    pub fn from_hash_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // Shape check only: $<version>$<cost>$<22-char salt + 31-char digest>
        let mut parts = hash.split('$');
        let valid = parts.next() == Some("")
            && matches!(parts.next(), Some("2a" | "2b" | "2x" | "2y"))
            && parts
                .next()
                .and_then(|c| c.parse::<u32>().ok())
                .is_some_and(|c| (MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&c))
            && parts.next().is_some_and(|rest| rest.len() == 53)
            && parts.next().is_none();

        if !valid {
            return Err(PasswordHashError::InvalidHashFormat);
        }

        Ok(Self { hash })
    }

    /// Get the hash string for storage
    pub fn as_hash_string(&self) -> &str {
        &self.hash
    }

    /// The work factor this hash was produced with
    pub fn cost(&self) -> Option<u32> {
        self.hash.split('$').nth(2)?.parse().ok()
    }

    /// Verify a password against this hash
    ///
    /// The comparison happens inside the bcrypt library and is constant
    /// time with respect to the secret content.
    ///
    /// ## Returns
    /// - `Ok(true)` - the secret matches
    /// - `Ok(false)` - the secret does not match (an expected outcome)
    /// - `Err(_)` - the hashing primitive itself faulted
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        bcrypt::verify(password.as_bytes(), &self.hash)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
