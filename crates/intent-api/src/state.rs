//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the gateway client, the payment repository, the webhook handler and
//! configuration. Every request works against these; nothing else is shared.

use intent_core::{
    BoxedPaymentGateway, BoxedPaymentRepository, Currency, InMemoryPaymentRepository,
    PaymentError, PaymentResult,
};
use intent_dynamo::DynamoPaymentRepository;
use intent_stripe::{LoggingWebhookHandler, StripePaymentIntents, WebhookHandler};
use std::str::FromStr;
use std::sync::Arc;

/// Where payment records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStore {
    DynamoDb,
    Memory,
}

impl FromStr for PaymentStore {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dynamodb" | "dynamo" => Ok(PaymentStore::DynamoDb),
            "memory" => Ok(PaymentStore::Memory),
            other => Err(PaymentError::Configuration(format!(
                "Unknown PAYMENT_STORE: {}",
                other
            ))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Currency every payment is taken in
    pub currency: Currency,
    /// Storage backend
    pub store: PaymentStore,
    /// Local DynamoDB endpoint, if any
    pub dynamodb_endpoint: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> PaymentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| PaymentError::Configuration(format!("Invalid PORT: {}", p)))?,
            None => 8080,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            currency: lookup("PAYMENT_CURRENCY")
                .map(|c| c.parse::<Currency>())
                .transpose()?
                .unwrap_or_default(),
            store: lookup("PAYMENT_STORE")
                .map(|s| s.parse::<PaymentStore>())
                .transpose()?
                .unwrap_or(PaymentStore::DynamoDb),
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT"),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> PaymentResult<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| PaymentError::Configuration(format!("Invalid socket address: {}", e)))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment processor client
    pub gateway: BoxedPaymentGateway,
    /// Payment record storage
    pub repository: BoxedPaymentRepository,
    /// Queue webhook handler
    pub webhook: Arc<dyn WebhookHandler>,
    /// Publishable key rendered into the checkout page
    pub publishable_key: String,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the production state: Stripe gateway plus the configured store
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let stripe = StripePaymentIntents::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        let publishable_key = stripe.config().publishable_key.clone();

        if stripe.config().is_live_mode() {
            if !config.is_production() {
                tracing::warn!("Live Stripe keys in {} environment", config.environment);
            }
            tracing::info!("Stripe gateway in live mode");
        } else {
            tracing::info!("Stripe gateway in test mode");
        }

        let repository: BoxedPaymentRepository = match config.store {
            PaymentStore::DynamoDb => Arc::new(
                DynamoPaymentRepository::from_env(config.dynamodb_endpoint.as_deref()).await,
            ),
            PaymentStore::Memory => {
                tracing::warn!("Using in-memory payment store; records are lost on restart");
                Arc::new(InMemoryPaymentRepository::new())
            }
        };

        Ok(Self::with_components(
            config,
            Arc::new(stripe),
            repository,
            publishable_key,
        ))
    }

    /// Assemble state from explicit parts
    pub fn with_components(
        config: AppConfig,
        gateway: BoxedPaymentGateway,
        repository: BoxedPaymentRepository,
        publishable_key: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            repository,
            webhook: Arc::new(LoggingWebhookHandler),
            publishable_key: publishable_key.into(),
            config,
        }
    }

    /// Builder: replace the webhook handler
    pub fn with_webhook_handler(mut self, handler: Arc<dyn WebhookHandler>) -> Self {
        self.webhook = handler;
        self
    }
}
