// routes.rs
use axum::{
    routing::{delete, get, post},
    Router,
};
use http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/changeusername", post(handlers::change_username))
        .route("/createpoll", post(handlers::create_poll))
        .route("/getpolls", get(handlers::get_polls))
        .route("/deletepoll", delete(handlers::delete_poll))
        .route("/getvotes", post(handlers::get_votes))
        .route("/vote", post(handlers::vote))
        .route("/getusername", post(handlers::get_username))
        .route("/getuservotes", post(handlers::get_user_votes))
        .layer(cors)
        .with_state(state)
}
