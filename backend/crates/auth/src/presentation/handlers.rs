//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::{cookie, crypto};

use crate::application::config::AuthConfig;
use crate::application::{
    RegisterInput, RegisterUseCase, ResolveIdentityUseCase, SignInInput, SignInUseCase,
    SignOutUseCase,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::session_id::SessionId;
use crate::error::{AuthError, AuthResult};
use crate::infra::memory::{ClientSession, InMemorySessionStore};
use crate::presentation::dto::{
    RegisterRequest, RegisterResponse, SessionStatusResponse, SignInRequest, SignInResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<U>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub sessions: InMemorySessionStore,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<U>(
    State(state): State<AuthAppState<U>>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    ensure_anonymous(&state, &headers).await?;

    let use_case = RegisterUseCase::new(state.users.clone(), state.config.clone());

    let input = RegisterInput {
        display_name: req.name,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user.user_id.to_string(),
        }),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<U>(
    State(state): State<AuthAppState<U>>,
    headers: HeaderMap,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    ensure_anonymous(&state, &headers).await?;

    // Fresh session record per sign-in; any previous cookie is replaced
    let session = state.sessions.open(state.config.session_ttl).await;

    let use_case = SignInUseCase::new(state.users.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = match use_case.execute(input, &session).await {
        Ok(output) => output,
        Err(e) => {
            // Do not leave an anonymous record behind on a failed attempt
            state.sessions.remove(session.session_id()).await;
            return Err(e);
        }
    };

    let cookie = build_session_cookie(&state.config, session.session_id());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            user_id: output.user.user_id.to_string(),
            display_name: output.user.display_name.to_string(),
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<U>(
    State(state): State<AuthAppState<U>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    if let Some(session) = resume_session(&state, &headers).await {
        // Ignore errors - the cookie is cleared either way
        let _ = SignOutUseCase::new().execute(&session).await;
        state.sessions.remove(session.session_id()).await;
    }

    let cookie = build_clear_cookie(&state.config);

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<U>(
    State(state): State<AuthAppState<U>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let user = match resume_session(&state, &headers).await {
        Some(session) => {
            ResolveIdentityUseCase::new(state.users.clone())
                .execute(&session)
                .await?
        }
        None => None,
    };

    match user {
        Some(user) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            user_id: Some(user.user_id.to_string()),
            display_name: Some(user.display_name.to_string()),
            email: Some(user.email.to_string()),
        })),
        None => Ok(Json(SessionStatusResponse::anonymous())),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Resume the client session named by the request's cookie, if any
///
/// A missing cookie, a bad signature, an unparseable id and an expired or
/// unknown session all come back as `None` - an anonymous request.
pub(crate) async fn resume_session<U>(
    state: &AuthAppState<U>,
    headers: &HeaderMap,
) -> Option<ClientSession>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let token = cookie::extract_cookie(headers, &state.config.session_cookie_name)?;
    let payload = crypto::verify_token(&state.config.session_secret, &token)?;
    let session_id = SessionId::parse_str(&payload).ok()?;

    state.sessions.resume(session_id).await
}

/// Reject requests that already carry an authenticated session
async fn ensure_anonymous<U>(state: &AuthAppState<U>, headers: &HeaderMap) -> AuthResult<()>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    if let Some(session) = resume_session(state, headers).await {
        let resolver = ResolveIdentityUseCase::new(state.users.clone());
        if resolver.is_authenticated(&session).await {
            return Err(AuthError::AlreadyAuthenticated);
        }
    }
    Ok(())
}

/// Build the Set-Cookie value carrying the signed session token
fn build_session_cookie(config: &AuthConfig, session_id: SessionId) -> String {
    let token = crypto::sign_token(&config.session_secret, &session_id.to_string());
    config.cookie_config().build_set_cookie(&token)
}

/// Build the Set-Cookie value that expires the session cookie
fn build_clear_cookie(config: &AuthConfig) -> String {
    config.cookie_config().build_delete_cookie()
}
