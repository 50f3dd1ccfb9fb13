//! # intent-stripe
//!
//! Stripe integration for the payment-intents service.
//!
//! 1. **StripePaymentIntents** - Payment Intents API
//!    - Creates one intent per call and returns its client secret
//!    - No idempotency key, no retries
//!
//! 2. **LoggingWebhookHandler** - queued webhook events
//!    - Writes each event and its invocation context as one JSON log line
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intent_core::{PaymentGateway, PaymentIntentRequest, Currency};
//! use intent_stripe::StripePaymentIntents;
//!
//! let gateway = StripePaymentIntents::from_env()?;
//!
//! let intent = gateway
//!     .create_payment_intent(&PaymentIntentRequest {
//!         amount: 554,
//!         currency: Currency::GBP,
//!         description: "Order #1".into(),
//!     })
//!     .await?;
//!
//! // Send intent.client_secret to the checkout page
//! ```

pub mod config;
pub mod payment_intents;
pub mod webhook;

// Re-exports
pub use config::StripeConfig;
pub use payment_intents::StripePaymentIntents;
pub use webhook::{InvocationContext, LoggingWebhookHandler, WebhookHandler};
