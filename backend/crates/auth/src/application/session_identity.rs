//! Session Identity Binding
//!
//! Converts a verified identity into a session reference and resolves a
//! reference back into an identity on later requests. Both directions are
//! plain functions so they can be tested without any session middleware.
//!
//! Resolution is read-only and idempotent: the same reference against an
//! unchanged store yields the same identity every time. A dangling
//! reference (record removed since sign-in) resolves to `None`.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::{SessionState, UserRepository};
use crate::domain::value_object::session_ref::SessionRef;
use crate::error::AuthResult;

/// Build the session reference for a verified identity
///
/// Only the opaque id goes into session state - never the password hash
/// or any other field.
pub fn to_session_reference(user: &User) -> SessionRef {
    SessionRef::new(user.user_id)
}

/// Resolve a session reference back into an identity
///
/// Returns `Ok(None)` when no record matches - the caller treats the
/// session as unauthenticated without faulting.
pub async fn from_session_reference<U>(
    reference: &SessionRef,
    users: &U,
) -> AuthResult<Option<User>>
where
    U: UserRepository,
{
    users.find_by_id(reference.user_id()).await
}

/// Resolve identity use case
///
/// Reads the reference out of a client's session state and resolves it.
/// An empty session and a dangling reference both come back as `None`.
pub struct ResolveIdentityUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> ResolveIdentityUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// The identity this session is authenticated as, if any
    pub async fn execute(&self, session: &impl SessionState) -> AuthResult<Option<User>> {
        let Some(reference) = session.get().await? else {
            return Ok(None);
        };

        from_session_reference(&reference, self.users.as_ref()).await
    }

    /// Just check whether the session is authenticated
    pub async fn is_authenticated(&self, session: &impl SessionState) -> bool {
        matches!(self.execute(session).await, Ok(Some(_)))
    }
}
