//! # DynamoDB Payment Repository
//!
//! One table per entity, keyed by the entity's hash attribute. Writes are
//! conditional on the key not existing yet, so a record can only be created
//! once. The SDK's own retries are switched off: each call is one attempt.

use crate::conversions::{from_attribute_map, to_attribute_map};
use async_trait::async_trait;
use aws_sdk_dynamodb::config::retry::RetryConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use intent_core::{Payment, PaymentError, PaymentRepository, PaymentResult, StorageItem};
use tracing::{debug, error, instrument};

/// Payment repository on DynamoDB
#[derive(Clone)]
pub struct DynamoPaymentRepository {
    client: Client,
}

impl DynamoPaymentRepository {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration (region, credentials).
    ///
    /// `endpoint` points the client at a local DynamoDB instead of AWS.
    pub async fn from_env(endpoint: Option<&str>) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config)
            .retry_config(RetryConfig::disabled());
        if let Some(url) = endpoint {
            builder = builder.endpoint_url(url);
        }

        Self::new(Client::from_conf(builder.build()))
    }

    async fn put_item<T: StorageItem>(&self, entity: &T) -> PaymentResult<()> {
        let item = to_attribute_map(entity.output()?);
        debug!(
            "PutItem {}.{} = {}",
            T::table_name(),
            T::hash_name(),
            entity.hash_key()
        );

        self.client
            .put_item()
            .table_name(T::table_name())
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", T::hash_name())
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!("DynamoDB PutItem on {} failed: {}", T::table_name(), message);
                PaymentError::Storage(message)
            })?;

        Ok(())
    }

    async fn get_item<T: StorageItem>(&self, hash_key: &str) -> PaymentResult<Option<T>> {
        let output = self
            .client
            .get_item()
            .table_name(T::table_name())
            .key(T::hash_name(), AttributeValue::S(hash_key.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!("DynamoDB GetItem on {} failed: {}", T::table_name(), message);
                PaymentError::Storage(message)
            })?;

        match output.item {
            Some(attributes) => Ok(Some(T::hydrate(from_attribute_map(attributes)?)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PaymentRepository for DynamoPaymentRepository {
    #[instrument(skip(self, payment), fields(payment_id = %payment.id))]
    async fn put_payment(&self, payment: &Payment) -> PaymentResult<()> {
        self.put_item(payment).await?;
        debug!("Stored payment in {}", Payment::table_name());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_payment(&self, id: &str) -> PaymentResult<Payment> {
        self.get_item::<Payment>(id)
            .await?
            .ok_or_else(|| PaymentError::PaymentNotFound {
                payment_id: id.to_string(),
            })
    }

    fn backend_name(&self) -> &'static str {
        "dynamodb"
    }
}
