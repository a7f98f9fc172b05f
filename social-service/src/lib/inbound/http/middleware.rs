use auth::AuthMethod;
use auth::Policy;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::models::UserId;

/// Name of the session cookie set by `POST /api/auth/login-session`.
pub const SESSION_COOKIE: &str = "sessionId";

/// Resolved caller identity, stored in request extensions by the
/// authentication middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub method: AuthMethod,
}

/// Middleware that accepts either a Bearer token or a session cookie.
///
/// The resolver tries the token first and falls back to the cookie, so a
/// request carrying an invalid token can still authenticate with a valid
/// session.
pub async fn authenticate_flexible(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let bearer = bearer_token(&req);
    let jar = CookieJar::from_headers(req.headers());
    let session_id = jar.get(SESSION_COOKIE).map(|cookie| cookie.value());

    let identity = state
        .auth_resolver
        .resolve(bearer, session_id, Policy::Flexible)
        .map_err(|err| {
            tracing::debug!(error = %err, "Authentication failed");
            ApiError::from(err).into_response()
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(identity.user_id),
        username: identity.username,
        method: identity.method,
    });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}
