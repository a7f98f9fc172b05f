use auth::AuthMethod;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::middleware::SESSION_COOKIE;
use crate::inbound::http::router::AppState;

/// Log out. Destroys the session only when the session backed this request;
/// a JWT caller keeps any co-present session alive, and their token stays
/// valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<MessageBody>) {
    if auth_user.method == AuthMethod::Session {
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            state.sessions.destroy(cookie.value());
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    (
        jar,
        ApiSuccess::new(StatusCode::OK, MessageBody::new("Logout successful")),
    )
}
