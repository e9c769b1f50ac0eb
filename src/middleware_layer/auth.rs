use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{
    error::AppError,
    models::session::Identity,
    services::auth::ADMIN_ONLY,
    state::AppState,
};

/// Extracts the bearer token from the `Authorization` header.
///
/// # Arguments
///
/// * `request` - The incoming request.
///
/// # Returns
///
/// An `Option` containing the raw token if one was sent.
fn extract_bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// A middleware that requires a valid session token.
///
/// On success the decoded [`Identity`] is inserted into the request
/// extensions for downstream handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    tracing::debug!("🔐 Checking authentication...");

    let identity = {
        let token = extract_bearer_token(&request).ok_or_else(|| {
            AppError::Authentication("Access denied. No token provided.".to_string())
        })?;

        state
            .tokens
            .verify(token)
            .ok_or_else(|| AppError::Authentication("Invalid or expired token.".to_string()))?
    };

    tracing::debug!("✅ User authenticated: {}", identity.user_id);

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// A middleware that only lets admins through. Must be layered inside
/// [`authenticate`].
pub async fn require_admin(
    Extension(identity): Extension<Identity>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden(ADMIN_ONLY.to_string()));
    }

    Ok(next.run(request).await)
}
