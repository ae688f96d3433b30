//! In-Memory Store Implementations
//!
//! Demo-grade storage: identity records in a Vec, session records in a
//! HashMap, both behind async RwLocks. Nothing survives a restart, and
//! cross-request races on duplicate registration are accepted - the
//! repository contract makes no uniqueness promise.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionState, UserRepository};
use crate::domain::value_object::{
    email::Email, session_id::SessionId, session_ref::SessionRef, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// User Store
// ============================================================================

/// In-memory user store
///
/// Records keep insertion order; `find_by_email` returns the first match,
/// which makes sign-in deterministic when duplicate addresses exist.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identity records
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Administrative removal of an identity record
    ///
    /// Not part of the repository contract - identity records are never
    /// deleted through the auth flows themselves.
    pub async fn remove(&self, user_id: &UserId) -> bool {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.user_id != *user_id);
        users.len() != before
    }
}

impl UserRepository for InMemoryUserStore {
    async fn insert(&self, user: &User) -> AuthResult<()> {
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == *email).cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.user_id == *user_id).cloned())
    }
}

// ============================================================================
// Session Store
// ============================================================================

/// In-memory session store
///
/// Hands out [`ClientSession`] handles scoped to a single session record.
/// Expired records are dropped on resume and by [`cleanup_expired`].
///
/// [`cleanup_expired`]: InMemorySessionStore::cleanup_expired
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh anonymous session and return its handle
    pub async fn open(&self, ttl: Duration) -> ClientSession {
        let session = Session::new(ttl);
        let session_id = session.session_id;
        self.sessions.write().await.insert(session_id, session);

        ClientSession {
            session_id,
            store: self.clone(),
        }
    }

    /// Resume an existing session by id
    ///
    /// Expired records are removed here; a stale cookie behaves exactly
    /// like no cookie.
    pub async fn resume(&self, session_id: SessionId) -> Option<ClientSession> {
        let mut sessions = self.sessions.write().await;

        let expired = sessions.get(&session_id)?.is_expired();
        if expired {
            sessions.remove(&session_id);
            return None;
        }

        Some(ClientSession {
            session_id,
            store: self.clone(),
        })
    }

    /// Delete a session record
    pub async fn remove(&self, session_id: SessionId) {
        self.sessions.write().await.remove(&session_id);
    }

    /// Drop all expired session records
    pub async fn cleanup_expired(&self) -> u64 {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        (before - sessions.len()) as u64
    }

    /// Number of live session records
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Handle to one client's session state
///
/// This is what the use cases see as [`SessionState`]: reads and writes
/// apply to exactly one session record in the backing store.
pub struct ClientSession {
    session_id: SessionId,
    store: InMemorySessionStore,
}

impl ClientSession {
    /// The session id carried in the cookie token
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
}

impl SessionState for ClientSession {
    async fn get(&self) -> AuthResult<Option<SessionRef>> {
        let sessions = self.store.sessions.read().await;
        Ok(sessions
            .get(&self.session_id)
            .filter(|s| !s.is_expired())
            .and_then(|s| s.reference))
    }

    async fn set(&self, reference: SessionRef) -> AuthResult<()> {
        let mut sessions = self.store.sessions.write().await;
        match sessions.get_mut(&self.session_id) {
            Some(session) => {
                session.reference = Some(reference);
                Ok(())
            }
            // The record vanished between resume and set
            None => Err(AuthError::SessionInvalid),
        }
    }

    async fn clear(&self) -> AuthResult<()> {
        let mut sessions = self.store.sessions.write().await;
        if let Some(session) = sessions.get_mut(&self.session_id) {
            session.reference = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::MIN_PASSWORD_COST;

    use crate::domain::value_object::{
        display_name::DisplayName,
        user_password::{RawPassword, UserPassword},
    };

    fn make_user(email: &str, password: &str) -> User {
        let raw = RawPassword::new(password.to_string());
        User::new(
            DisplayName::new("Test").unwrap(),
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, MIN_PASSWORD_COST).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let store = InMemoryUserStore::new();
        let user = make_user("ann@x.com", "hunter2");
        store.insert(&user).await.unwrap();

        let found = store
            .find_by_email(&Email::new("ann@x.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact_match() {
        let store = InMemoryUserStore::new();
        store.insert(&make_user("Ann@X.com", "hunter2")).await.unwrap();

        let found = store
            .find_by_email(&Email::new("ann@x.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_emails_first_match_wins() {
        let store = InMemoryUserStore::new();
        let first = make_user("ann@x.com", "first-secret");
        let second = make_user("ann@x.com", "second-secret");
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        let found = store
            .find_by_email(&Email::new("ann@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, first.user_id);
    }

    #[tokio::test]
    async fn test_find_by_id_and_remove() {
        let store = InMemoryUserStore::new();
        let user = make_user("ann@x.com", "hunter2");
        store.insert(&user).await.unwrap();

        assert!(store.find_by_id(&user.user_id).await.unwrap().is_some());

        assert!(store.remove(&user.user_id).await);
        assert!(store.find_by_id(&user.user_id).await.unwrap().is_none());
        assert!(!store.remove(&user.user_id).await);
    }

    #[tokio::test]
    async fn test_session_open_resume() {
        let store = InMemorySessionStore::new();
        let session = store.open(Duration::from_secs(60)).await;

        assert!(store.resume(session.session_id()).await.is_some());
        assert_eq!(store.session_count().await, 1);

        store.remove(session.session_id()).await;
        assert!(store.resume(session.session_id()).await.is_none());
    }

    #[tokio::test]
    async fn test_session_state_roundtrip() {
        let store = InMemorySessionStore::new();
        let session = store.open(Duration::from_secs(60)).await;

        assert_eq!(session.get().await.unwrap(), None);

        let reference = SessionRef::new(UserId::new());
        session.set(reference).await.unwrap();
        assert_eq!(session.get().await.unwrap(), Some(reference));

        session.clear().await.unwrap();
        assert_eq!(session.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_on_removed_session_fails() {
        let store = InMemorySessionStore::new();
        let session = store.open(Duration::from_secs(60)).await;
        store.remove(session.session_id()).await;

        let result = session.set(SessionRef::new(UserId::new())).await;
        assert!(matches!(result, Err(AuthError::SessionInvalid)));

        // clear on a removed session is a no-op, not an error
        assert!(session.clear().await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_session_not_resumable() {
        let store = InMemorySessionStore::new();
        let session = store.open(Duration::ZERO).await;

        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(store.resume(session.session_id()).await.is_none());
        // resume dropped the record
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let store = InMemorySessionStore::new();
        store.open(Duration::ZERO).await;
        store.open(Duration::ZERO).await;
        let live = store.open(Duration::from_secs(60)).await;

        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(store.cleanup_expired().await, 2);
        assert_eq!(store.session_count().await, 1);
        assert!(store.resume(live.session_id()).await.is_some());
    }
}
