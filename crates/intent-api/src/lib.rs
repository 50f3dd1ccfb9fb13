//! # intent-api
//!
//! HTTP API layer for the payment-intents service.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The setup-payment action (gateway intent + stored record)
//! - The queued webhook endpoint
//! - A card checkout page
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/payment` | Create payment intent, store payment |
//! | GET | `/payment/{id}` | Get stored payment |
//! | GET | `/checkout` | Checkout page |
//! | POST | `/webhook/queue` | Queued payment events |

pub mod action;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use routes::create_router;
pub use state::{AppConfig, AppState, PaymentStore};
