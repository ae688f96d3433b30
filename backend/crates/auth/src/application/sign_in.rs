//! Sign In Use Case
//!
//! Runs the credential verifier and, on success, binds the identity to
//! the caller's session state.
//!
//! Both rejection reasons surface as the single generic
//! [`AuthError::InvalidCredentials`]: an attacker probing the sign-in
//! endpoint cannot tell an unknown address from a wrong password. The
//! detailed reason is still logged server-side.

use std::sync::Arc;

use crate::application::session_identity::to_session_reference;
use crate::application::verify_credentials::{
    VerificationOutcome, VerifyCredentialsInput, VerifyCredentialsUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionState, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Login identifier (email)
    pub email: String,
    /// Password
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// The identity the session is now authenticated as
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        session: &impl SessionState,
    ) -> AuthResult<SignInOutput> {
        let verifier = VerifyCredentialsUseCase::new(self.users.clone());
        let outcome = verifier
            .execute(VerifyCredentialsInput {
                identifier: input.email,
                password: input.password,
            })
            .await?;

        let user = match outcome {
            VerificationOutcome::Verified(user) => user,
            VerificationOutcome::Rejected(reason) => {
                tracing::warn!(reason = reason.as_str(), "Sign-in rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        // The session is authenticated only once the reference is stored
        session.set(to_session_reference(&user)).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { user })
    }
}
