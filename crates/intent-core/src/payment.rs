//! # Payment Entity
//!
//! A single payment record: what was requested, in which currency, and which
//! gateway intent it belongs to. Records are written once and never updated.

use crate::currency::{Currency, MAX_MINOR_AMOUNT};
use crate::error::{PaymentError, PaymentResult};
use crate::gateway::PaymentIntent;
use crate::item::{Item, StorageItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a payment is in its (local) lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created locally, no gateway intent yet
    Pending,
    /// Gateway intent created; the browser confirms it with the client secret
    AwaitingConfirmation,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

/// A payment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment ID (UUID v4)
    pub id: String,

    /// Amount in the currency's smallest unit
    pub amount: i64,

    /// Deployment currency
    pub currency: Currency,

    /// Free-text description shown on the statement/receipt
    pub description: String,

    #[serde(default)]
    pub status: PaymentStatus,

    /// Gateway payment-intent id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Create a new payment from a decimal amount in major units.
    ///
    /// The amount is converted once to the currency's smallest unit; anything
    /// that does not land in `1..=MAX_MINOR_AMOUNT` is rejected.
    pub fn create(
        amount: f64,
        description: impl Into<String>,
        currency: Currency,
    ) -> PaymentResult<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PaymentError::validation("amount must be greater than 0"));
        }

        let minor = currency.to_minor_units(amount).ok_or_else(|| {
            PaymentError::validation(format!(
                "amount must not exceed {} minor {} units",
                MAX_MINOR_AMOUNT, currency
            ))
        })?;
        if minor == 0 {
            return Err(PaymentError::validation(format!(
                "amount is smaller than the smallest {} unit",
                currency
            )));
        }

        let description = description.into();
        if description.trim().is_empty() {
            return Err(PaymentError::validation("description is required"));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            amount: minor,
            currency,
            description,
            status: PaymentStatus::Pending,
            external_reference: None,
            created_at: Utc::now(),
        })
    }

    /// Link the gateway intent to this payment before it is persisted
    pub fn attach_intent(mut self, intent: &PaymentIntent) -> Self {
        self.external_reference = Some(intent.id.clone());
        self.status = PaymentStatus::AwaitingConfirmation;
        self
    }
}

impl StorageItem for Payment {
    fn table_name() -> &'static str {
        "payments"
    }

    fn hash_name() -> &'static str {
        "id"
    }

    fn range_name() -> Option<&'static str> {
        None
    }

    fn hydrate(item: Item) -> PaymentResult<Self> {
        serde_json::from_value(serde_json::Value::Object(item))
            .map_err(|e| PaymentError::Serialization(format!("Malformed payment item: {}", e)))
    }

    fn output(&self) -> PaymentResult<Item> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(item) => Ok(item),
            other => Err(PaymentError::Serialization(format!(
                "Payment serialized to a non-object: {}",
                other
            ))),
        }
    }

    fn hash_key(&self) -> String {
        self.id.clone()
    }
}
