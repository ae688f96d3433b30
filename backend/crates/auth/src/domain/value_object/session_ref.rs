//! Session Reference Value Object
//!
//! The minimal value a session may hold to represent "this session is
//! authenticated as this identity": the identity's id and nothing else.
//! Password hashes and other identity fields never enter session state.
//!
//! A reference is not a guarantee - the identity it points at may have
//! been removed since it was stored. Resolution treats that as "absent",
//! not as an error.

use std::fmt;

use crate::domain::value_object::user_id::UserId;

/// Opaque reference to an identity, stored in session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionRef(UserId);

impl SessionRef {
    /// Create a reference to the given identity
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    /// The referenced identity's id
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

impl From<UserId> for SessionRef {
    fn from(user_id: UserId) -> Self {
        Self::new(user_id)
    }
}

impl fmt::Display for SessionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
