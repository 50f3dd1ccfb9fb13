//! # Actions
//!
//! Shared request/response plumbing for JSON endpoints.
//!
//! Each endpoint supplies one `Action` value holding its business logic.
//! `run_action` does the rest: decode the body, run the action once, and
//! render exactly one response, either the action's data or an error.

use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intent_core::{PaymentError, PaymentResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

/// Message returned for an empty or undecodable body
pub const MISSING_BODY_MESSAGE: &str = "Please submit a JSON-encoded request body";

/// Decoded JSON request body
pub type FormData = serde_json::Map<String, Value>;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Business logic for one endpoint
#[async_trait]
pub trait Action: Send + Sync {
    /// Response data on success
    type Output: Serialize + Send;

    /// Name used in logs
    fn name(&self) -> &'static str;

    async fn action(&self, state: &AppState, data: FormData) -> PaymentResult<Self::Output>;
}

/// Decode a request body into form data.
///
/// Empty bodies, invalid JSON, non-objects and `{}` are all rejected with the
/// same message.
pub fn form_data(body: &[u8]) -> PaymentResult<FormData> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(data)) if !data.is_empty() => Ok(data),
        _ => Err(PaymentError::validation(MISSING_BODY_MESSAGE)),
    }
}

/// Run an action against a raw request body
pub async fn run_action<A: Action>(action: &A, state: &AppState, body: &[u8]) -> Response {
    let result = match form_data(body) {
        Ok(data) => action.action(state, data).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(data) => respond_with_data(data),
        Err(e) => {
            if e.status_code() >= 500 {
                error!("{} failed: {}", action.name(), e);
            } else {
                warn!("{} rejected: {}", action.name(), e);
            }
            respond_with_error(e)
        }
    }
}

/// 200 with the serialized data
pub fn respond_with_data<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Error status and `{"error", "code"}` body
pub fn respond_with_error(err: PaymentError) -> Response {
    let code = err.status_code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string(), code))).into_response()
}
