use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use intent_api::{create_router, AppConfig, AppState, PaymentStore};
use intent_core::{
    Currency, InMemoryPaymentRepository, Payment, PaymentError, PaymentGateway, PaymentIntent,
    PaymentIntentRequest, PaymentRepository, PaymentResult,
};
use intent_stripe::{InvocationContext, WebhookHandler};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// =============================================================================
// Test doubles
// =============================================================================

#[derive(Default)]
struct RecordingGateway {
    requests: Mutex<Vec<PaymentIntentRequest>>,
    reject: bool,
}

impl RecordingGateway {
    fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> PaymentResult<PaymentIntent> {
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        if self.reject {
            return Err(PaymentError::Gateway {
                provider: "stripe".to_string(),
                message: "Invalid API Key provided".to_string(),
            });
        }

        Ok(PaymentIntent {
            id: format!("pi_{}", n),
            client_secret: format!("pi_{}_secret_{}", n, uuid::Uuid::new_v4().simple()),
            amount: request.amount,
            currency: request.currency,
            description: Some(request.description.clone()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

#[derive(Default)]
struct RecordingRepository {
    inner: InMemoryPaymentRepository,
    writes: AtomicUsize,
    unavailable: bool,
}

impl RecordingRepository {
    fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentRepository for RecordingRepository {
    async fn put_payment(&self, payment: &Payment) -> PaymentResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(PaymentError::Storage(
                "ProvisionedThroughputExceededException".to_string(),
            ));
        }
        self.inner.put_payment(payment).await
    }

    async fn find_payment(&self, id: &str) -> PaymentResult<Payment> {
        self.inner.find_payment(id).await
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

#[derive(Default)]
struct RecordingWebhook {
    events: Mutex<Vec<(Value, String)>>,
}

impl WebhookHandler for RecordingWebhook {
    fn handle(&self, event: &Value, context: &InvocationContext) {
        self.events
            .lock()
            .unwrap()
            .push((event.clone(), context.request_id.clone()));
    }
}

// =============================================================================
// Harness
// =============================================================================

fn config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        currency: Currency::GBP,
        store: PaymentStore::Memory,
        dynamodb_endpoint: None,
    }
}

struct Harness {
    server: TestServer,
    gateway: Arc<RecordingGateway>,
    repository: Arc<RecordingRepository>,
    webhook: Arc<RecordingWebhook>,
}

fn harness_with(gateway: RecordingGateway, repository: RecordingRepository) -> Harness {
    let gateway = Arc::new(gateway);
    let repository = Arc::new(repository);
    let webhook = Arc::new(RecordingWebhook::default());

    let state = AppState::with_components(
        config(),
        gateway.clone(),
        repository.clone(),
        "pk_test_checkout",
    )
    .with_webhook_handler(webhook.clone());

    Harness {
        server: TestServer::new(create_router(state)).unwrap(),
        gateway,
        repository,
        webhook,
    }
}

fn harness() -> Harness {
    harness_with(RecordingGateway::default(), RecordingRepository::default())
}

// =============================================================================
// POST /payment
// =============================================================================

#[tokio::test]
async fn test_setup_payment_converts_to_minor_units() {
    let h = harness();

    let response = h
        .server
        .post("/payment")
        .json(&json!({"amount": 5.54, "description": "Order #1"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let client_secret = body["clientSecret"].as_str().unwrap();
    assert!(!client_secret.is_empty());
    assert_eq!(body["amount"], 554);
    assert_eq!(body["currency"], "gbp");
    assert_eq!(body["description"], "Order #1");
    assert_eq!(body["status"], "awaiting_confirmation");
    assert_eq!(body["externalReference"], "pi_1");

    let requests = h.gateway.requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![PaymentIntentRequest {
            amount: 554,
            currency: Currency::GBP,
            description: "Order #1".to_string(),
        }]
    );

    let stored = h
        .repository
        .find_payment(body["id"].as_str().unwrap())
        .await
        .unwrap();
    assert_eq!(stored.amount, 554);
    assert_eq!(stored.external_reference.as_deref(), Some("pi_1"));
}

#[tokio::test]
async fn test_empty_object_is_rejected() {
    let h = harness();

    let response = h.server.post("/payment").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please submit a JSON-encoded request body");
    assert_eq!(h.gateway.calls(), 0);
    assert_eq!(h.repository.writes(), 0);
}

#[tokio::test]
async fn test_missing_and_malformed_bodies_are_rejected() {
    let h = harness();

    let empty = h.server.post("/payment").await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);

    let garbage = h.server.post("/payment").text("amount=5.54").await;
    assert_eq!(garbage.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = garbage.json();
    assert_eq!(body["error"], "Please submit a JSON-encoded request body");

    assert_eq!(h.gateway.calls(), 0);
}

#[tokio::test]
async fn test_invalid_amounts_never_reach_gateway_or_store() {
    let h = harness();

    for body in [
        json!({"amount": 0, "description": "Order"}),
        json!({"amount": -5.54, "description": "Order"}),
        json!({"amount": 0.001, "description": "Order"}),
        json!({"amount": 1e19, "description": "Order"}),
        json!({"amount": 1e30, "description": "Order"}),
        json!({"amount": "5.54", "description": "Order"}),
        json!({"description": "Order"}),
        json!({"amount": 5.54}),
        json!({"amount": 5.54, "description": ""}),
    ] {
        let response = h.server.post("/payment").json(&body).await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "body {} should be rejected",
            body
        );
        let error: Value = response.json();
        assert!(error["error"].is_string());
    }

    assert_eq!(h.gateway.calls(), 0);
    assert_eq!(h.repository.writes(), 0);
}

#[tokio::test]
async fn test_oversized_amount_is_a_validation_error() {
    let h = harness();

    let response = h
        .server
        .post("/payment")
        .json(&json!({"amount": 1e19, "description": "Order #1"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 400);
    assert_eq!(
        body["error"],
        "amount must not exceed 99999999 minor GBP units"
    );
    assert_eq!(h.gateway.calls(), 0);
    assert_eq!(h.repository.writes(), 0);
}

#[tokio::test]
async fn test_storage_failure_after_gateway_success() {
    let h = harness_with(RecordingGateway::default(), RecordingRepository::unavailable());

    let response = h
        .server
        .post("/payment")
        .json(&json!({"amount": 5.54, "description": "Order #1"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body.get("clientSecret").is_none());
    assert_eq!(h.gateway.calls(), 1);
    assert_eq!(h.repository.writes(), 1);
}

#[tokio::test]
async fn test_gateway_rejection_skips_storage() {
    let h = harness_with(RecordingGateway::rejecting(), RecordingRepository::default());

    let response = h
        .server
        .post("/payment")
        .json(&json!({"amount": 5.54, "description": "Order #1"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], 502);
    assert!(body["error"].as_str().unwrap().contains("Invalid API Key"));
    assert_eq!(h.repository.writes(), 0);
}

#[tokio::test]
async fn test_identical_requests_create_distinct_intents() {
    let h = harness();
    let request = json!({"amount": 10, "description": "Same order"});

    let first: Value = h.server.post("/payment").json(&request).await.json();
    let second: Value = h.server.post("/payment").json(&request).await.json();

    assert_ne!(first["clientSecret"], second["clientSecret"]);
    assert_ne!(first["id"], second["id"]);
    assert_eq!(h.gateway.calls(), 2);
    assert_eq!(h.repository.writes(), 2);
}

// =============================================================================
// GET /payment/{id}
// =============================================================================

#[tokio::test]
async fn test_find_stored_payment() {
    let h = harness();

    let created: Value = h
        .server
        .post("/payment")
        .json(&json!({"amount": 12.5, "description": "Gift card"}))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let response = h.server.get(&format!("/payment/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let found: Value = response.json();
    assert_eq!(found["id"], id);
    assert_eq!(found["amount"], 1250);
    assert!(found.get("clientSecret").is_none());
}

#[tokio::test]
async fn test_find_unknown_payment() {
    let h = harness();

    let response = h.server.get("/payment/does-not-exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], 404);
}

// =============================================================================
// Webhook, checkout, health
// =============================================================================

#[tokio::test]
async fn test_queue_webhook_hands_event_to_handler() {
    let h = harness();
    let event = json!({
        "id": "evt_1",
        "type": "payment_intent.succeeded",
        "data": {"object": {"id": "pi_1", "amount": 554}}
    });

    let response = h
        .server
        .post("/webhook/queue")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-42"),
        )
        .json(&event)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().is_empty());

    let events = h.webhook.events.lock().unwrap().clone();
    assert_eq!(events, vec![(event, "req-42".to_string())]);
}

#[tokio::test]
async fn test_checkout_page_embeds_publishable_key() {
    let h = harness();

    let response = h.server.get("/checkout").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let page = response.text();
    assert!(page.contains("pk_test_checkout"));
    assert!(page.contains("Amount (GBP)"));
    assert!(!page.contains("{{PUBLISHABLE_KEY}}"));
}

#[tokio::test]
async fn test_health() {
    let h = harness();

    let body: Value = h.server.get("/health").await.json();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["gateway"], "stripe");
    assert_eq!(body["store"], "recording");
}
