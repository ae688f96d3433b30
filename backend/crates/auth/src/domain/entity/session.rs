//! Session Entity
//!
//! A client session record held by the session store. A session starts
//! anonymous; signing in stores a [`SessionRef`], signing out clears it.
//! Lifetime policy (TTL) belongs to the store, not to the callers.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::value_object::{session_id::SessionId, session_ref::SessionRef};

/// Client session record
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (random, carried in the signed cookie token)
    pub session_id: SessionId,
    /// Identity reference; `None` while the session is anonymous
    pub reference: Option<SessionRef>,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new anonymous session
    ///
    /// TTL is provided by the store configuration, not hard-coded here.
    pub fn new(ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            reference: None,
            expires_at_ms: now.timestamp_millis() + ttl.as_millis() as i64,
            created_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Whether a (possibly stale) identity reference is stored
    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_id::UserId;

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new(Duration::from_secs(60));
        assert!(session.reference.is_none());
        assert!(!session.has_reference());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expiry() {
        let mut session = Session::new(Duration::from_secs(60));
        session.expires_at_ms = Utc::now().timestamp_millis() - 1;
        assert!(session.is_expired());
    }

    #[test]
    fn test_reference_toggles() {
        let mut session = Session::new(Duration::from_secs(60));
        session.reference = Some(SessionRef::new(UserId::new()));
        assert!(session.has_reference());

        session.reference = None;
        assert!(!session.has_reference());
    }
}
