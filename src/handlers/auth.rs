use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::Result,
    extractors::AppJson,
    models::{session::Identity, user::UserProfile},
    services::auth::{self as auth_service, AuthSession},
    state::AppState,
    validation::auth::RegisterRequest,
};

/// The request payload for login.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!("📝 Register attempt - Payload: {:?}", payload);

    let session = auth_service::register(&state, payload).await?;

    tracing::info!("✅ User registered: {}", session.user.id);
    Ok((StatusCode::CREATED, Json(session)))
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<AuthSession>> {
    tracing::info!("🔐 Login attempt for: {}", payload.email);

    let session = auth_service::login(&state, &payload.email, &payload.password).await?;

    tracing::info!("✅ User logged in: {}", session.user.id);
    Ok(Json(session))
}

/// Handles admin login.
#[axum::debug_handler]
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<AuthSession>> {
    tracing::info!("🔐 Admin login attempt for: {}", payload.email);

    let session = auth_service::admin_login(&state, &payload.email, &payload.password).await?;

    tracing::info!("✅ Admin logged in: {}", session.user.id);
    Ok(Json(session))
}

/// Returns the profile of the authenticated caller.
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<UserProfile>> {
    let profile = auth_service::current_user(&state, &identity).await?;
    Ok(Json(profile))
}
