//! HTTP server wiring the registry to the wire.
//!
//! API endpoints:
//! - POST   /api/register      - register or update a named descriptor
//! - POST   /api/verify        - match a descriptor against the roster
//! - GET    /api/users         - list registered names
//! - DELETE /api/delete/{name} - remove a registration
//!
//! Responses use a `{success, message, ...}` envelope. A verification
//! that finds no close-enough match answers 200 with `success: false`;
//! it is a normal outcome, not an error.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, warn};
use uuid::Uuid;

use faceauth_registry::{Registry, RegistryError, VerifyOutcome};

/// Descriptor payloads are small, but browsers may batch several frames
/// worth of data; match the original deployment's generous limit.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    registry: Arc<Registry>,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: Option<String>,
    descriptor: Option<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    descriptor: Option<Vec<f32>>,
}

#[derive(Debug, Serialize)]
struct UserInfo {
    name: String,
}

/// Wire envelope shared by all endpoints.
#[derive(Debug, Serialize)]
struct Envelope {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl Envelope {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: None,
            token: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
            token: None,
        }
    }
}

/// Opaque placeholder issued on successful verification. Not a
/// cryptographic credential.
fn issue_token() -> String {
    format!("token-{}", Uuid::new_v4())
}

/// Starts the HTTP server and blocks until it exits.
pub async fn serve(addr: &str, registry: Registry, static_dir: Option<PathBuf>) -> Result<()> {
    let state = AppState {
        registry: Arc::new(registry),
    };

    let mut app = Router::new()
        .route("/api/register", post(register))
        .route("/api/verify", post(verify))
        .route("/api/users", get(users))
        .route("/api/delete/{name}", delete(delete_user))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    if let Some(dir) = static_dir {
        if dir.exists() {
            app = app.fallback_service(ServeDir::new(dir));
        } else {
            warn!("static dir not found: {}", dir.display());
        }
    }

    let addr = parse_addr(addr)?;
    println!("Server running on http://{}", addr);
    println!("  - POST   /api/register       Register a descriptor");
    println!("  - POST   /api/verify         Verify a descriptor");
    println!("  - GET    /api/users          List registered names");
    println!("  - DELETE /api/delete/{{name}}  Delete a registration");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse address string to SocketAddr. A bare ":3000" binds all
/// interfaces.
fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    Ok(addr.parse()?)
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let (Some(name), Some(descriptor)) = (req.name, req.descriptor) else {
        return invalid_data();
    };

    match state.registry.register(&name, &descriptor) {
        Ok(_) => (
            StatusCode::OK,
            Json(Envelope::ok("User registered successfully")),
        ),
        Err(RegistryError::InvalidInput(_)) => invalid_data(),
        Err(e) => server_error(e),
    }
}

async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> impl IntoResponse {
    let Some(descriptor) = req.descriptor else {
        return invalid_data();
    };

    match state.registry.verify(&descriptor) {
        Ok(VerifyOutcome::Match { name, .. }) => {
            let envelope = Envelope {
                success: true,
                message: "Authentication successful".into(),
                user: Some(UserInfo { name }),
                token: Some(issue_token()),
            };
            (StatusCode::OK, Json(envelope))
        }
        Ok(VerifyOutcome::NoMatch { .. }) => {
            (StatusCode::OK, Json(Envelope::fail("Face Mismatch")))
        }
        Err(e) => server_error(e),
    }
}

async fn users(State(state): State<AppState>) -> impl IntoResponse {
    match state.registry.list() {
        Ok(names) => {
            let users: Vec<UserInfo> = names.into_iter().map(|name| UserInfo { name }).collect();
            Json(users).into_response()
        }
        Err(e) => server_error(e).into_response(),
    }
}

async fn delete_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.registry.delete(&name) {
        Ok(()) => (
            StatusCode::OK,
            Json(Envelope::ok(format!("User {name} deleted successfully"))),
        ),
        Err(RegistryError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, Json(Envelope::fail("User not found")))
        }
        Err(e) => server_error(e),
    }
}

fn invalid_data() -> (StatusCode, Json<Envelope>) {
    (StatusCode::BAD_REQUEST, Json(Envelope::fail("Invalid data")))
}

fn server_error(e: RegistryError) -> (StatusCode, Json<Envelope>) {
    error!("request failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::fail(format!("Server error: {e}"))),
    )
}
