use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use serde::Serialize;

use crate::inbound::http::handlers::auth::login::LoginRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserBody;
use crate::inbound::http::middleware::SESSION_COOKIE;
use crate::inbound::http::router::AppState;

/// Log in and receive a session cookie instead of a JWT.
pub async fn login_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<LoginSessionResponseData>), ApiError> {
    body.validate()?;

    let user = state
        .user_service
        .verify_credentials(&body.username, &body.password)
        .await?;

    let session_id = state.sessions.create(user.id.0, user.username.as_str());

    let cookie = Cookie::build((SESSION_COOKIE, session_id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::days(auth::SESSION_LIFETIME_DAYS));

    Ok((
        jar.add(cookie),
        ApiSuccess::new(
            StatusCode::OK,
            LoginSessionResponseData {
                message: "Login successful".to_string(),
                session_id,
                user: UserBody::from(&user),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginSessionResponseData {
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub user: UserBody,
}
