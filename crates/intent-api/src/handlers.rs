//! # Request Handlers
//!
//! Axum request handlers for the payment API.

use crate::action::{self, Action, FormData};
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use intent_core::{Payment, PaymentError, PaymentIntentRequest, PaymentResult};
use intent_stripe::InvocationContext;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument};
use uuid::Uuid;

const CHECKOUT_PAGE: &str = include_str!("../static/checkout.html");

// =============================================================================
// Setup payment
// =============================================================================

/// Setup payment response: the stored record plus the browser's client secret
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupPaymentResponse {
    #[serde(flatten)]
    pub payment: Payment,
    pub client_secret: String,
}

/// Validate, create the gateway intent, store the record.
pub struct SetupPayment;

impl SetupPayment {
    fn amount(data: &FormData) -> PaymentResult<f64> {
        match data.get("amount") {
            None | Some(Value::Null) => Err(PaymentError::validation("amount is required")),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| PaymentError::validation("amount must be a number")),
        }
    }

    fn description(data: &FormData) -> PaymentResult<String> {
        match data.get("description") {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                Err(PaymentError::validation("description is required"))
            }
            Some(_) => Err(PaymentError::validation("description must be a string")),
        }
    }
}

#[async_trait]
impl Action for SetupPayment {
    type Output = SetupPaymentResponse;

    fn name(&self) -> &'static str {
        "setup_payment"
    }

    async fn action(&self, state: &AppState, data: FormData) -> PaymentResult<Self::Output> {
        let amount = Self::amount(&data)?;
        let description = Self::description(&data)?;

        let payment = Payment::create(amount, description, state.config.currency)?;

        let intent = state
            .gateway
            .create_payment_intent(&PaymentIntentRequest::for_payment(&payment))
            .await?;

        let payment = payment.attach_intent(&intent);

        // The intent already exists at the gateway; it is not cancelled here.
        if let Err(e) = state.repository.put_payment(&payment).await {
            error!(
                "Payment intent {} has no stored record for payment {}: {}",
                intent.id, payment.id, e
            );
            return Err(e);
        }

        info!(
            "Payment {} set up: intent={}, amount={} {}",
            payment.id, intent.id, payment.amount, payment.currency
        );

        Ok(SetupPaymentResponse {
            payment,
            client_secret: intent.client_secret,
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "payment-intents",
        "version": env!("CARGO_PKG_VERSION"),
        "gateway": state.gateway.provider_name(),
        "store": state.repository.backend_name(),
    }))
}

/// Create a payment intent and store the payment record
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn setup_payment(State(state): State<AppState>, body: Bytes) -> Response {
    action::run_action(&SetupPayment, &state, &body).await
}

/// Look up a stored payment
#[instrument(skip(state))]
pub async fn find_payment(State(state): State<AppState>, Path(payment_id): Path<String>) -> Response {
    match state.repository.find_payment(&payment_id).await {
        Ok(payment) => action::respond_with_data(payment),
        Err(e) => {
            if e.status_code() >= 500 {
                error!("find_payment failed: {}", e);
            }
            action::respond_with_error(e)
        }
    }
}

/// Queue-delivered webhook: log the event, nothing else
#[instrument(skip(state, headers, body))]
pub async fn queue_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let event = serde_json::from_slice::<Value>(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

    let request_id = header_value(&headers, "x-request-id")
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut context = InvocationContext::new(request_id, "payment-webhook");
    if let Some(trace_id) = header_value(&headers, "x-amzn-trace-id") {
        context = context.with_trace_id(trace_id);
    }

    state.webhook.handle(&event, &context);

    StatusCode::OK
}

/// Card checkout page
pub async fn checkout_page(State(state): State<AppState>) -> Html<String> {
    Html(
        CHECKOUT_PAGE
            .replace("{{PUBLISHABLE_KEY}}", &state.publishable_key)
            .replace("{{CURRENCY}}", &state.config.currency.to_string()),
    )
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
