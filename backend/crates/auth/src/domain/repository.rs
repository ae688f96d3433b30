//! Repository Traits
//!
//! Interfaces for the two external collaborators. Implementations live in
//! the infrastructure layer; the verifier and binder only ever see these
//! traits, so a real datastore can be substituted without touching them.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, session_ref::SessionRef, user_id::UserId};
use crate::error::AuthResult;

/// User store collaborator
///
/// Owns the identity records; the core never holds a private copy. No
/// durability or uniqueness guarantees are assumed - `insert` appends
/// whatever it is given.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Store a new identity record
    async fn insert(&self, user: &User) -> AuthResult<()>;

    /// Find an identity by its login identifier (exact match)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find an identity by id
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;
}

/// Session state collaborator, scoped to one client session
///
/// Holds at most a [`SessionRef`]. Lifetime and expiry policy belong to
/// the implementing store.
#[trait_variant::make(SessionState: Send)]
pub trait LocalSessionState {
    /// Read the stored reference, if any
    async fn get(&self) -> AuthResult<Option<SessionRef>>;

    /// Store a reference (the session becomes authenticated)
    async fn set(&self, reference: SessionRef) -> AuthResult<()>;

    /// Clear the reference (the session returns to anonymous)
    async fn clear(&self) -> AuthResult<()>;
}
