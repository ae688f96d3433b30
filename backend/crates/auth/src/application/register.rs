//! Register Use Case
//!
//! Creates a new identity record: hash the secret, build the record with
//! a fresh id, delegate storage to the user store collaborator.
//!
//! Email uniqueness is deliberately NOT checked here. Registering the
//! same address twice creates two records; lookup order decides which one
//! wins at sign-in. Whether that should be rejected is an open product
//! decision, not something this layer quietly enforces.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    /// The stored identity record
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { users, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let display_name = DisplayName::new(input.display_name)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        // Hashing is the only fallible step after validation; a fault here
        // fails the whole attempt and the caller may simply retry
        let raw = RawPassword::new(input.password);
        let cost = self.config.password_cost;
        let password_hash = tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, cost))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        let user = User::new(display_name, email, password_hash);
        self.users.insert(&user).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput { user })
    }
}
