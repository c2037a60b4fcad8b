// src/main.rs
use std::env;
use std::net::SocketAddr;

use pollpal_backend::{db, routes, state::AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok(); // Load environment variables from .env file

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Get the port from the environment (default to 3030 for local development)
    let port = env::var("PORT").unwrap_or_else(|_| "3030".to_string());
    let port = port.parse::<u16>().expect("PORT must be a valid number");

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

    // Create the database connection pool
    let pool = db::create_pool(&database_url)
        .await
        .expect("Failed to connect to the database");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Pass the state to the routes
    let routes = routes::create_routes(AppState::new(pool, jwt_secret));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("PollPal backend listening on {}", addr);

    // Start the server
    axum_server::bind(addr)
        .serve(routes.into_make_service())
        .await
        .expect("Server failed");
}
