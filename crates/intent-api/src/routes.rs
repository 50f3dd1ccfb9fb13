//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /payment - Create a payment intent and store the payment
/// - GET  /payment/{payment_id} - Get a stored payment
/// - GET  /checkout - Card checkout page
/// - POST /webhook/queue - Queued payment events
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    // The checkout form may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let payment_routes = Router::new()
        .route("/payment", post(handlers::setup_payment))
        .route("/payment/{payment_id}", get(handlers::find_payment))
        .layer(cors);

    // Webhook routes (no CORS, must accept raw body)
    let webhook_routes = Router::new().route("/queue", post(handlers::queue_webhook));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route("/checkout", get(handlers::checkout_page))
        .merge(payment_routes)
        .nest("/webhook", webhook_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
