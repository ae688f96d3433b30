//! User Entity
//!
//! The identity record: everything the system knows about a registered
//! user. Created on registration and never mutated afterwards; removal is
//! an administrative concern of the concrete store.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
};

/// Identity record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Opaque unique identifier
    pub user_id: UserId,
    /// Name shown back to the user
    pub display_name: DisplayName,
    /// Login identifier, kept exactly as entered
    pub email: Email,
    /// Hashed password (never exposed outside the store and verifier)
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new identity record with a fresh id
    pub fn new(display_name: DisplayName, email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            display_name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
