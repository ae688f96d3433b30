//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod register;
pub mod session_identity;
pub mod sign_in;
pub mod sign_out;
pub mod verify_credentials;

// Re-exports
pub use config::AuthConfig;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use session_identity::{ResolveIdentityUseCase, from_session_reference, to_session_reference};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use verify_credentials::{
    RejectionReason, VerificationOutcome, VerifyCredentialsInput, VerifyCredentialsUseCase,
};
