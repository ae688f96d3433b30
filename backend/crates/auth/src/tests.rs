//! Use-case level tests against the in-memory stores.
//!
//! The bcrypt work factor is pinned to the minimum so the suite stays
//! fast; the cost only changes timing, never outcomes.

use std::sync::Arc;
use std::time::Duration;

use platform::password::MIN_PASSWORD_COST;

use crate::application::config::AuthConfig;
use crate::application::{
    RegisterInput, RegisterUseCase, RejectionReason, ResolveIdentityUseCase, SignInInput,
    SignInUseCase, SignOutUseCase, VerificationOutcome, VerifyCredentialsInput,
    VerifyCredentialsUseCase, from_session_reference, to_session_reference,
};
use crate::domain::entity::user::User;
use crate::domain::repository::SessionState;
use crate::error::AuthError;
use crate::infra::memory::{InMemorySessionStore, InMemoryUserStore};

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig {
        password_cost: MIN_PASSWORD_COST,
        ..AuthConfig::development()
    })
}

async fn register_user(
    users: &Arc<InMemoryUserStore>,
    name: &str,
    email: &str,
    password: &str,
) -> User {
    RegisterUseCase::new(users.clone(), test_config())
        .execute(RegisterInput {
            display_name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
        .expect("registration should succeed")
        .user
}

async fn verify(
    users: &Arc<InMemoryUserStore>,
    identifier: &str,
    password: &str,
) -> VerificationOutcome {
    VerifyCredentialsUseCase::new(users.clone())
        .execute(VerifyCredentialsInput {
            identifier: identifier.to_string(),
            password: password.to_string(),
        })
        .await
        .expect("verification should not fault")
}

// ============================================================================
// Credential verification
// ============================================================================

#[tokio::test]
async fn verify_accepts_the_true_secret() {
    let users = Arc::new(InMemoryUserStore::new());
    let registered = register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    match verify(&users, "ann@x.com", "hunter2").await {
        VerificationOutcome::Verified(user) => assert_eq!(user, registered),
        other => panic!("expected Verified, got {other:?}"),
    }
}

#[tokio::test]
async fn verify_rejects_a_wrong_secret() {
    let users = Arc::new(InMemoryUserStore::new());
    register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    assert!(matches!(
        verify(&users, "ann@x.com", "not-hunter2").await,
        VerificationOutcome::Rejected(RejectionReason::WrongPassword)
    ));
}

#[tokio::test]
async fn verify_rejects_an_unknown_identifier() {
    let users = Arc::new(InMemoryUserStore::new());
    register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    // Regardless of the secret value
    assert!(matches!(
        verify(&users, "bob@x.com", "hunter2").await,
        VerificationOutcome::Rejected(RejectionReason::UnknownEmail)
    ));
    assert!(matches!(
        verify(&users, "bob@x.com", "").await,
        VerificationOutcome::Rejected(RejectionReason::UnknownEmail)
    ));
}

#[tokio::test]
async fn verify_against_an_empty_store() {
    let users = Arc::new(InMemoryUserStore::new());

    assert!(matches!(
        verify(&users, "ann@x.com", "hunter2").await,
        VerificationOutcome::Rejected(RejectionReason::UnknownEmail)
    ));
}

#[tokio::test]
async fn verify_treats_malformed_identifiers_as_unknown() {
    let users = Arc::new(InMemoryUserStore::new());
    register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    assert!(matches!(
        verify(&users, "not-an-email", "hunter2").await,
        VerificationOutcome::Rejected(RejectionReason::UnknownEmail)
    ));
}

#[tokio::test]
async fn verify_matches_email_case_sensitively() {
    let users = Arc::new(InMemoryUserStore::new());
    register_user(&users, "Ann", "Ann@X.com", "hunter2").await;

    // Stored exactly as entered; a differently-cased identifier is unknown
    assert!(matches!(
        verify(&users, "ann@x.com", "hunter2").await,
        VerificationOutcome::Rejected(RejectionReason::UnknownEmail)
    ));
    assert!(matches!(
        verify(&users, "Ann@X.com", "hunter2").await,
        VerificationOutcome::Verified(_)
    ));
}

#[tokio::test]
async fn duplicate_registrations_resolve_to_the_first_record() {
    let users = Arc::new(InMemoryUserStore::new());
    let first = register_user(&users, "Ann", "ann@x.com", "first-secret").await;
    register_user(&users, "Imposter", "ann@x.com", "second-secret").await;

    match verify(&users, "ann@x.com", "first-secret").await {
        VerificationOutcome::Verified(user) => assert_eq!(user.user_id, first.user_id),
        other => panic!("expected Verified, got {other:?}"),
    }

    // The second record exists but never wins the lookup
    assert!(matches!(
        verify(&users, "ann@x.com", "second-secret").await,
        VerificationOutcome::Rejected(RejectionReason::WrongPassword)
    ));
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn registration_stores_a_hash_not_the_plaintext() {
    let users = Arc::new(InMemoryUserStore::new());
    let user = register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    assert_ne!(user.password_hash.as_hash_string(), "hunter2");
    assert!(user.password_hash.as_hash_string().starts_with("$2"));
    assert_eq!(user.password_hash.cost(), Some(MIN_PASSWORD_COST));
    assert_eq!(users.user_count().await, 1);
}

#[tokio::test]
async fn registration_rejects_malformed_input() {
    let users = Arc::new(InMemoryUserStore::new());
    let use_case = RegisterUseCase::new(users.clone(), test_config());

    let result = use_case
        .execute(RegisterInput {
            display_name: "Ann".to_string(),
            email: "not-an-email".to_string(),
            password: "hunter2".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::Validation(_))));

    let result = use_case
        .execute(RegisterInput {
            display_name: "   ".to_string(),
            email: "ann@x.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::Validation(_))));

    assert_eq!(users.user_count().await, 0);
}

// ============================================================================
// Session identity binding
// ============================================================================

#[tokio::test]
async fn binder_roundtrip_returns_the_same_identity() {
    let users = Arc::new(InMemoryUserStore::new());
    let user = register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    let reference = to_session_reference(&user);
    let resolved = from_session_reference(&reference, users.as_ref())
        .await
        .unwrap();

    assert_eq!(resolved, Some(user));
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let users = Arc::new(InMemoryUserStore::new());
    let user = register_user(&users, "Ann", "ann@x.com", "hunter2").await;
    let reference = to_session_reference(&user);

    let first = from_session_reference(&reference, users.as_ref())
        .await
        .unwrap();
    let second = from_session_reference(&reference, users.as_ref())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, Some(user));
}

#[tokio::test]
async fn dangling_reference_resolves_to_absent() {
    let users = Arc::new(InMemoryUserStore::new());
    let user = register_user(&users, "Ann", "ann@x.com", "hunter2").await;
    let reference = to_session_reference(&user);

    users.remove(&user.user_id).await;

    // Absent, not a fault
    let resolved = from_session_reference(&reference, users.as_ref())
        .await
        .unwrap();
    assert_eq!(resolved, None);
}

// ============================================================================
// Sign in / sign out lifecycle
// ============================================================================

#[tokio::test]
async fn sign_in_authenticates_the_session() {
    let users = Arc::new(InMemoryUserStore::new());
    let sessions = InMemorySessionStore::new();
    let registered = register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    let session = sessions.open(Duration::from_secs(60)).await;
    let output = SignInUseCase::new(users.clone())
        .execute(
            SignInInput {
                email: "ann@x.com".to_string(),
                password: "hunter2".to_string(),
            },
            &session,
        )
        .await
        .unwrap();
    assert_eq!(output.user.user_id, registered.user_id);

    let resolver = ResolveIdentityUseCase::new(users.clone());
    let current = resolver.execute(&session).await.unwrap();
    assert_eq!(current.map(|u| u.user_id), Some(registered.user_id));
    assert!(resolver.is_authenticated(&session).await);
}

#[tokio::test]
async fn sign_in_rejections_are_indistinguishable() {
    let users = Arc::new(InMemoryUserStore::new());
    let sessions = InMemorySessionStore::new();
    register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    let use_case = SignInUseCase::new(users.clone());

    // Wrong password and unknown email produce the same error value
    let session = sessions.open(Duration::from_secs(60)).await;
    let wrong_password = use_case
        .execute(
            SignInInput {
                email: "ann@x.com".to_string(),
                password: "wrong".to_string(),
            },
            &session,
        )
        .await;
    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

    let unknown_email = use_case
        .execute(
            SignInInput {
                email: "bob@x.com".to_string(),
                password: "hunter2".to_string(),
            },
            &session,
        )
        .await;
    assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));

    // The session stayed anonymous throughout
    assert_eq!(session.get().await.unwrap(), None);
}

#[tokio::test]
async fn sign_out_returns_the_session_to_anonymous() {
    let users = Arc::new(InMemoryUserStore::new());
    let sessions = InMemorySessionStore::new();
    register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    let session = sessions.open(Duration::from_secs(60)).await;
    SignInUseCase::new(users.clone())
        .execute(
            SignInInput {
                email: "ann@x.com".to_string(),
                password: "hunter2".to_string(),
            },
            &session,
        )
        .await
        .unwrap();

    SignOutUseCase::new().execute(&session).await.unwrap();

    assert_eq!(session.get().await.unwrap(), None);
    assert!(
        !ResolveIdentityUseCase::new(users.clone())
            .is_authenticated(&session)
            .await
    );
}

#[tokio::test]
async fn identity_removed_mid_session_resolves_to_anonymous() {
    let users = Arc::new(InMemoryUserStore::new());
    let sessions = InMemorySessionStore::new();
    let user = register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    let session = sessions.open(Duration::from_secs(60)).await;
    SignInUseCase::new(users.clone())
        .execute(
            SignInInput {
                email: "ann@x.com".to_string(),
                password: "hunter2".to_string(),
            },
            &session,
        )
        .await
        .unwrap();

    users.remove(&user.user_id).await;

    // The stale reference is still stored, but resolution treats the
    // session as unauthenticated without faulting
    let resolver = ResolveIdentityUseCase::new(users.clone());
    assert_eq!(resolver.execute(&session).await.unwrap(), None);
    assert!(!resolver.is_authenticated(&session).await);
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[tokio::test]
async fn register_then_verify_matrix() {
    let users = Arc::new(InMemoryUserStore::new());

    let user = register_user(&users, "Ann", "ann@x.com", "hunter2").await;

    // Stored record carries a hash, never the plaintext
    assert_eq!(users.user_count().await, 1);
    assert_ne!(user.password_hash.as_hash_string(), "hunter2");

    match verify(&users, "ann@x.com", "hunter2").await {
        VerificationOutcome::Verified(found) => assert_eq!(found, user),
        other => panic!("expected Verified, got {other:?}"),
    }

    assert!(matches!(
        verify(&users, "ann@x.com", "wrong").await,
        VerificationOutcome::Rejected(RejectionReason::WrongPassword)
    ));

    assert!(matches!(
        verify(&users, "bob@x.com", "hunter2").await,
        VerificationOutcome::Rejected(RejectionReason::UnknownEmail)
    ));
}
