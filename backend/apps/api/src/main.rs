//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are handled by
//! the auth crate's error types.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::middleware::{CurrentIdentity, require_auth_session};
use auth::{AuthConfig, InMemorySessionStore, InMemoryUserStore, auth_router};
use axum::extract::Request;
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::routing::get;
use axum::{Extension, Json, Router, http, middleware};
use base64::Engine;
use base64::engine::general_purpose;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Auth configuration
    let config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            session_secret: secret,
            ..AuthConfig::default()
        }
    };

    // In-memory stores, for demo purposes - swap for real repositories to
    // keep identities and sessions across restarts
    let users = InMemoryUserStore::new();
    let sessions = InMemorySessionStore::new();

    // State for the middleware guarding protected pages
    let auth_state = auth::handlers::AuthAppState {
        users: Arc::new(users.clone()),
        sessions: sessions.clone(),
        config: Arc::new(config.clone()),
    };

    let protected = Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/me", get(me))
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            let state = auth_state.clone();
            async move { require_auth_session(state, req, next).await }
        }));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(users, sessions, config))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Protected pages
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse {
    message: String,
    display_name: String,
}

/// GET /api/dashboard - greets the signed-in user by name
async fn dashboard(Extension(identity): Extension<CurrentIdentity>) -> Json<DashboardResponse> {
    let name = identity.0.display_name.to_string();

    Json(DashboardResponse {
        message: format!("Welcome back, {name}"),
        display_name: name,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    user_id: String,
    display_name: String,
    email: String,
    member_since: String,
}

/// GET /api/me - the signed-in user's profile
async fn me(Extension(identity): Extension<CurrentIdentity>) -> Json<ProfileResponse> {
    let user = identity.0;

    Json(ProfileResponse {
        user_id: user.user_id.to_string(),
        display_name: user.display_name.to_string(),
        email: user.email.to_string(),
        member_since: user.created_at.to_rfc3339(),
    })
}
