use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userbase::session::{InMemorySessionRegistry, TokenConfig};
use userbase::shared::AppState;
use userbase::user;
use userbase::user::repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userbase=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting user account server");

    // The signing secret is required configuration; refuse to start without it
    let token_config = TokenConfig::from_env().expect("API_KEY_SECRET must be set");

    // Pick the user store: PostgreSQL when DATABASE_URL is set, in-memory otherwise
    let user_repository: Arc<dyn UserRepository + Send + Sync> =
        match std::env::var("DATABASE_URL") {
            Ok(database_url) => {
                let pool = sqlx::PgPool::connect(&database_url)
                    .await
                    .expect("Failed to connect to database");
                info!("Using PostgreSQL user store");
                Arc::new(PostgresUserRepository::new(pool))
            }
            Err(_) => {
                info!("DATABASE_URL not set, using in-memory user store");
                Arc::new(InMemoryUserRepository::new())
            }
        };

    let session_registry = Arc::new(InMemorySessionRegistry::new());

    // Create shared application state with dependency injection
    let app_state = AppState::new(user_repository, session_registry, token_config);

    // build our application with the user routes
    let app = Router::new()
        .route("/", get(|| async { "Welcome to userbase!" }))
        .route("/users", post(user::register))
        .route("/users/login", post(user::login))
        .route("/users/disconnect", get(user::disconnect))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
