//! # Queue Webhook Handling
//!
//! Stripe events reach the service through a queue. Each invocation carries
//! one event and the invocation context it was delivered with. The handler
//! only records them; payment state is never changed from here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Invocation metadata delivered alongside a queued event
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    /// Id of this delivery
    pub request_id: String,
    /// Name of the function/endpoint that received the event
    pub function_name: String,
    /// Distributed trace id, when the trigger propagates one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            function_name: function_name.into(),
            trace_id: None,
            received_at: Utc::now(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// JSON form of the context, as written to the log line
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Webhook event handler trait
pub trait WebhookHandler: Send + Sync {
    /// Handle one queued event. There is no error path: anything that goes
    /// wrong inside belongs to the invoking runtime.
    fn handle(&self, event: &Value, context: &InvocationContext);
}

/// Default handler: one structured debug line per event.
///
/// `_webhook` and `_lambda` are recorded as JSON-encoded strings, not nested
/// objects. Log consumers must parse each field a second time to get the
/// event and invocation context back.
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {
    fn handle(&self, event: &Value, context: &InvocationContext) {
        debug!(
            _webhook = %event,
            _lambda = %context.to_json(),
            "Received webhook from queue"
        );
    }
}
