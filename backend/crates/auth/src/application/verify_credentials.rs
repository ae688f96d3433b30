//! Verify Credentials Use Case
//!
//! The credential verifier: given a claimed identifier and a plaintext
//! secret, locate the candidate identity and decide whether the secret
//! matches the stored hash.
//!
//! Both rejection cases are ordinary outcomes, not errors - the caller
//! can always distinguish "verification failed" from "the system is
//! broken" without inspecting error types. Direct callers see WHICH
//! rejection occurred; the HTTP boundary collapses the distinction
//! (see `sign_in`).
//!
//! Verification mutates nothing: it is a pure function of its inputs and
//! the store's current contents.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Verify credentials input
pub struct VerifyCredentialsInput {
    /// Claimed login identifier
    pub identifier: String,
    /// Plaintext secret to check
    pub password: String,
}

/// Outcome of a verification attempt
#[derive(Debug)]
pub enum VerificationOutcome {
    /// The secret matches; here is the identity
    Verified(User),
    /// The attempt is rejected for the given reason
    Rejected(RejectionReason),
}

impl VerificationOutcome {
    /// The verified identity, if any
    pub fn into_verified(self) -> Option<User> {
        match self {
            VerificationOutcome::Verified(user) => Some(user),
            VerificationOutcome::Rejected(_) => None,
        }
    }
}

/// Why a verification attempt was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// No identity record matches the identifier
    UnknownEmail,
    /// An identity matched but the secret did not
    WrongPassword,
}

impl RejectionReason {
    /// Stable label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::UnknownEmail => "unknown-email",
            RejectionReason::WrongPassword => "wrong-password",
        }
    }
}

/// Verify credentials use case
pub struct VerifyCredentialsUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> VerifyCredentialsUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, input: VerifyCredentialsInput) -> AuthResult<VerificationOutcome> {
        // A structurally invalid identifier can match no stored record
        let Ok(email) = Email::new(input.identifier) else {
            return Ok(VerificationOutcome::Rejected(RejectionReason::UnknownEmail));
        };

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(VerificationOutcome::Rejected(RejectionReason::UnknownEmail));
        };

        // bcrypt comparison is CPU-bound; run it off the async threads so
        // unrelated requests are not stalled behind it
        let stored = user.password_hash.clone();
        let raw = RawPassword::new(input.password);
        let matched = tokio::task::spawn_blocking(move || stored.verify(&raw))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))??;

        if matched {
            Ok(VerificationOutcome::Verified(user))
        } else {
            Ok(VerificationOutcome::Rejected(RejectionReason::WrongPassword))
        }
    }
}
