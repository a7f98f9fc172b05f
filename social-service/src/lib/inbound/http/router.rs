use std::sync::Arc;
use std::time::Duration;

use auth::AuthResolver;
use auth::SessionStore;
use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login::login;
use super::handlers::auth::login_session::login_session;
use super::handlers::auth::logout::logout;
use super::handlers::auth::me::me;
use super::handlers::auth::refresh_token::refresh_token;
use super::handlers::auth::register::register;
use super::handlers::auth::status::status;
use super::handlers::follows::follow_status::follow_status;
use super::handlers::follows::follow_user::follow_user;
use super::handlers::follows::get_followers::get_followers;
use super::handlers::follows::get_following::get_following;
use super::handlers::follows::unfollow_user::unfollow_user;
use super::handlers::health::health;
use super::handlers::posts::create_post::create_post;
use super::handlers::posts::delete_post::delete_post;
use super::handlers::posts::get_post::get_post;
use super::handlers::posts::get_timeline::get_timeline;
use super::handlers::posts::get_user_posts::get_user_posts;
use super::handlers::users::get_profile::get_profile;
use super::handlers::users::get_user_by_username::get_user_by_username;
use super::handlers::users::update_profile::update_profile;
use super::middleware::authenticate_flexible;
use crate::domain::follow::service::FollowService;
use crate::domain::post::service::PostService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::follow::PostgresFollowRepository;
use crate::outbound::repositories::post::PostgresPostRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub post_service: Arc<PostService<PostgresPostRepository, PostgresUserRepository>>,
    pub follow_service: Arc<FollowService<PostgresFollowRepository, PostgresUserRepository>>,
    pub token_issuer: Arc<TokenIssuer>,
    pub auth_resolver: Arc<AuthResolver>,
    pub sessions: Arc<SessionStore>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/login-session", post(login_session))
        .route("/api/users/:username", get(get_user_by_username))
        .route("/api/posts/user/:username", get(get_user_posts))
        .route("/api/:username/followers", get(get_followers))
        .route("/api/:username/following", get(get_following))
        // GET is public but DELETE requires authentication; route_layer on
        // the method router keeps the middleware off the GET branch.
        .route(
            "/api/posts/:id",
            delete(delete_post)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    authenticate_flexible,
                ))
                .get(get_post),
        );

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/auth/refresh-token", post(refresh_token))
        .route("/api/auth/status", get(status))
        .route("/api/users/me/profile", get(get_profile).put(update_profile))
        .route("/api/posts", post(create_post))
        .route("/api/posts/timeline", get(get_timeline))
        .route("/api/:username/follow", post(follow_user).delete(unfollow_user))
        .route("/api/:username/follow-status", get(follow_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_flexible,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
