//! # Payment Repository
//!
//! Persistence contract for payment records, plus an in-memory
//! implementation used for local development and tests.
//!
//! There is no update or delete: a record is written once and read back by id.

use crate::error::{PaymentError, PaymentResult};
use crate::item::StorageItem;
use crate::payment::Payment;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Storage for payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persist a new record. A single attempt; failures surface as `Storage`.
    async fn put_payment(&self, payment: &Payment) -> PaymentResult<()>;

    /// Load a record by id, or `PaymentNotFound`.
    async fn find_payment(&self, id: &str) -> PaymentResult<Payment>;

    /// Backend name (for logging)
    fn backend_name(&self) -> &'static str;
}

/// Type alias for a shared repository (dynamic dispatch)
pub type BoxedPaymentRepository = Arc<dyn PaymentRepository>;

/// Process-local repository backed by a map
#[derive(Debug, Default, Clone)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn put_payment(&self, payment: &Payment) -> PaymentResult<()> {
        let mut payments = self
            .payments
            .write()
            .map_err(|e| PaymentError::Storage(e.to_string()))?;

        let key = payment.hash_key();
        if payments.contains_key(&key) {
            return Err(PaymentError::Storage(format!(
                "Payment {} already exists",
                key
            )));
        }

        payments.insert(key, payment.clone());
        Ok(())
    }

    async fn find_payment(&self, id: &str) -> PaymentResult<Payment> {
        let payments = self
            .payments
            .read()
            .map_err(|e| PaymentError::Storage(e.to_string()))?;

        payments
            .get(id)
            .cloned()
            .ok_or_else(|| PaymentError::PaymentNotFound {
                payment_id: id.to_string(),
            })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
