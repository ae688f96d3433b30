//! Auth Middleware
//!
//! Middleware for requiring an authenticated session on protected routes.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::ResolveIdentityUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{AuthAppState, resume_session};

/// The resolved identity, stored in request extensions for handlers
#[derive(Clone)]
pub struct CurrentIdentity(pub User);

/// Middleware that requires an authenticated session
///
/// Resolves the session cookie to an identity and stores it as
/// [`CurrentIdentity`] for downstream handlers. Anonymous requests get
/// 401 with an `X-Auth-Required` marker header.
pub async fn require_auth_session<U>(
    state: AuthAppState<U>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let user = match resume_session(&state, req.headers()).await {
        Some(session) => {
            let resolver = ResolveIdentityUseCase::new(state.users.clone());
            match resolver.execute(&session).await {
                Ok(user) => user,
                Err(e) => return Err(e.into_response()),
            }
        }
        None => None,
    };

    let Some(user) = user else {
        return Err((StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response());
    };

    req.extensions_mut().insert(CurrentIdentity(user));

    Ok(next.run(req).await)
}
