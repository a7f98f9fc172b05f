use std::sync::Arc;
use std::time::Duration;

use auth::AuthResolver;
use auth::SessionStore;
use auth::TokenIssuer;
use social_service::config::Config;
use social_service::domain::follow::service::FollowService;
use social_service::domain::post::service::PostService;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::inbound::http::router::AppState;
use social_service::outbound::repositories::follow::PostgresFollowRepository;
use social_service::outbound::repositories::post::PostgresPostRepository;
use social_service::outbound::repositories::user::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "social-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    // Fails fast on a missing secret rather than limping along unsigned.
    let token_issuer = Arc::new(TokenIssuer::new(&config.jwt.secret)?);
    let sessions = Arc::new(SessionStore::new());
    let auth_resolver = Arc::new(AuthResolver::new(
        Arc::clone(&token_issuer),
        Arc::clone(&sessions),
    ));

    let sweep_store = Arc::clone(&sessions);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = sweep_store.sweep();
            if removed > 0 {
                tracing::info!(removed, "Expired sessions swept");
            }
        }
    });

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool.clone()));
    let follow_repository = Arc::new(PostgresFollowRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(Arc::clone(&user_repository))),
        post_service: Arc::new(PostService::new(
            post_repository,
            Arc::clone(&user_repository),
        )),
        follow_service: Arc::new(FollowService::new(follow_repository, user_repository)),
        token_issuer,
        auth_resolver,
        sessions,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
