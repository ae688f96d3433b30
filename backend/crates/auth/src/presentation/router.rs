//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::memory::{InMemorySessionStore, InMemoryUserStore};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the in-memory user store
pub fn auth_router(
    users: InMemoryUserStore,
    sessions: InMemorySessionStore,
    config: AuthConfig,
) -> Router {
    auth_router_generic(Arc::new(users), sessions, config)
}

/// Create an Auth router for any user repository implementation
pub fn auth_router_generic<U>(
    users: Arc<U>,
    sessions: InMemorySessionStore,
    config: AuthConfig,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        users,
        sessions,
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<U>))
        .route("/signin", post(handlers::sign_in::<U>))
        .route("/signout", post(handlers::sign_out::<U>))
        .route("/status", get(handlers::session_status::<U>))
        .with_state(state)
}
