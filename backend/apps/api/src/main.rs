//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AuthConfig, PgUserRepository};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use base64::Engine;
use base64::engine::general_purpose;
use contacts::{PgContactRepository, contacts_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::middleware::{AuthGateState, require_auth};
use auth::router::{auth_router, users_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,contacts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration: the signing secret is required outside debug
    // builds, and login stops working if it changes between restarts
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        let secret_b64 =
            env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "AUTH_TOKEN_SECRET must decode to exactly 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);

        let password_pepper = env::var("AUTH_PASSWORD_PEPPER")
            .ok()
            .map(|p| Engine::decode(&general_purpose::STANDARD, &p))
            .transpose()?;

        AuthConfig {
            token_secret: secret,
            password_pepper,
            ..AuthConfig::default()
        }
    };
    let auth_config = Arc::new(auth_config);

    let user_repo = PgUserRepository::new(pool.clone());
    let contact_repo = PgContactRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Contacts sit entirely behind the bearer token gate
    let gate = AuthGateState {
        repo: Arc::new(user_repo.clone()),
        config: auth_config.clone(),
    };
    let contacts = contacts_router(contact_repo).route_layer(middleware::from_fn_with_state(
        gate,
        require_auth::<PgUserRepository>,
    ));

    // Build router
    let app = Router::new()
        .nest("/api/v1/auth", auth_router(user_repo.clone(), auth_config.clone()))
        .nest("/api/v1/users", users_router(user_repo, auth_config))
        .nest("/api/v1/contacts", contacts)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
