//! Sign Out Use Case
//!
//! Clears the session's identity reference, returning it to anonymous.

use crate::domain::repository::SessionState;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase;

impl SignOutUseCase {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, session: &impl SessionState) -> AuthResult<()> {
        session.clear().await?;

        tracing::info!("User signed out");
        Ok(())
    }
}

impl Default for SignOutUseCase {
    fn default() -> Self {
        Self::new()
    }
}
