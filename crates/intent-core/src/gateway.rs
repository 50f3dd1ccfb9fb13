//! # Payment Gateway Trait
//!
//! The seam between the service and the third-party payment processor.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PaymentGateway (trait)                    │
//! │  ├── create_payment_intent()                                │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │StripePaymentIntents│
//!                  └───────────────────┘
//! ```
//!
//! Every call creates a new intent. No idempotency key is sent and nothing is
//! retried, so two identical requests produce two distinct intents.

use crate::currency::Currency;
use crate::error::PaymentResult;
use crate::payment::Payment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Parameters for a new payment intent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentIntentRequest {
    /// Amount in the currency's smallest unit
    pub amount: i64,
    pub currency: Currency,
    pub description: String,
}

impl PaymentIntentRequest {
    /// Build the intent request for a payment record
    pub fn for_payment(payment: &Payment) -> Self {
        Self {
            amount: payment.amount,
            currency: payment.currency,
            description: payment.description.clone(),
        }
    }
}

/// A payment intent as returned by the processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor-side intent id (`pi_...`)
    pub id: String,
    /// Secret the browser uses to confirm the payment
    pub client_secret: String,
    pub amount: i64,
    pub currency: Currency,
    #[serde(default)]
    pub description: Option<String>,
}

/// Third-party payment processor client.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent and return its client secret.
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> PaymentResult<PaymentIntent>;

    /// Get the provider name (for logging and error reporting).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_for_payment() {
        let payment = Payment::create(5.54, "Order #1", Currency::GBP).unwrap();
        let request = PaymentIntentRequest::for_payment(&payment);

        assert_eq!(request.amount, 554);
        assert_eq!(request.currency, Currency::GBP);
        assert_eq!(request.description, "Order #1");
    }
}
