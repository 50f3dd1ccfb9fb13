//! # Payment Intents
//!
//! Payment-intent creation service.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! export PAYMENT_CURRENCY=gbp
//!
//! # Run the server
//! intent-server
//! ```

use intent_api::{routes, telemetry, AppConfig, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(config.is_production());

    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    let state = AppState::new(config).await?;

    info!("Environment: {}", state.config.environment);
    info!("Currency: {}", state.config.currency);
    info!("Payment store: {}", state.repository.backend_name());
    info!("Payment gateway: {}", state.gateway.provider_name());

    let app = routes::create_router(state);

    info!("Payment intents starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: http://{}/checkout", addr);
        info!("Payment: POST http://{}/payment", addr);
        info!("Webhook: POST http://{}/webhook/queue", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
